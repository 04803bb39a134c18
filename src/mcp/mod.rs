//! Sheetbridge MCP Server
//!
//! Model Context Protocol server for spreadsheet manipulation.
//! Enables Claude Code, Cursor, and other MCP clients to read and write
//! Excel workbooks programmatically.
//!
//! ## Tools
//!
//! ### Range transfer
//! - `excel_read_range` - Read raw values from a worksheet range
//! - `excel_read_range_metadata` - Read a range with per-cell metadata
//! - `excel_write_range` - Write rows with automatic type detection
//! - `excel_autoformat_range` - Re-infer and format existing cell values
//!
//! ### Workbook and sheet management
//! - `excel_create_workbook` - Create a new workbook file
//! - `excel_create_sheet` - Add a worksheet
//! - `excel_workbook_info` - Sheet names, counts, used ranges
//! - `excel_rename_sheet` / `excel_delete_sheet` / `excel_copy_sheet`
//!
//! ## Usage
//!
//! Configure in MCP client settings:
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

pub mod server;

pub use server::run_mcp_server_sync;
