//! Sheetbridge MCP Server binary
//!
//! Model Context Protocol server for AI agent integration.
//! Run with: `sheetbridge-mcp`
//!
//! Relative workbook paths resolve against `SHEETBRIDGE_FILES_PATH`.
//!
//! Configure in Claude Code or other MCP clients:
//! ```json
//! {
//!   "mcpServers": {
//!     "sheetbridge": {
//!       "command": "sheetbridge-mcp",
//!       "env": { "SHEETBRIDGE_FILES_PATH": "/data/excel" }
//!     }
//!   }
//! }
//! ```

use sheetbridge::mcp::run_mcp_server_sync;
use sheetbridge::paths::PathResolver;

fn main() {
    // Logs go to stderr so stdout stays a clean JSON-RPC channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolver = PathResolver::from_env();
    run_mcp_server_sync(&resolver);
}
