//! CLI command handlers

pub mod commands;

pub use commands::{
    autoformat, copy_sheet_cmd, delete_sheet_cmd, info, new_sheet, new_workbook, read, read_meta,
    rename_sheet_cmd, write,
};
