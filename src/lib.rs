//! Sheetbridge - Excel workbook manipulation behind an MCP tool surface
//!
//! This library reads and writes ranges of Excel worksheets with automatic
//! type inference: raw text like "$1,000.50", "50%", or "2023-12-25" is
//! normalized to a typed value plus a canonical display format before it
//! lands in a cell.
//!
//! # Features
//!
//! - A1-style cell/range reference parsing (base-26 column letters)
//! - Value inference: numbers, percentages, currency, dates, booleans
//! - Range read/write with a per-call sheet boundary snapshot
//! - Per-cell metadata reads including data-validation descriptors
//! - Sheet management (create, rename, delete, copy) and workbook info
//! - JSON-RPC 2.0 MCP server over stdin/stdout
//!
//! # Example
//!
//! ```no_run
//! use sheetbridge::range::{read_range, write_range};
//! use std::path::Path;
//!
//! let path = Path::new("book.xlsx");
//! let rows = vec![vec!["Name".into(), "Amount".into()],
//!                 vec!["Bob".into(), "$1,250.00".into()]];
//! write_range(path, Some("Sheet1"), &rows, "A1", true)?;
//!
//! let data = read_range(path, "Sheet1", "A1", None)?;
//! println!("Rows: {}", data.len());
//! # Ok::<(), sheetbridge::error::BridgeError>(())
//! ```

pub mod address;
pub mod cli;
pub mod error;
pub mod infer;
pub mod mcp;
pub mod paths;
pub mod range;
pub mod sheet;
pub mod types;
pub mod validation;
pub mod workbook;

// Re-export commonly used types
pub use error::{BridgeError, BridgeResult};
pub use types::{CellAddress, CellRange, CellValue, NumberFormat, RangeData, SheetBoundary};
