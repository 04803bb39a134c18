//! Sheet management: rename, delete, copy.
//!
//! Thin delegation to the workbook container, with the same
//! open-mutate-save discipline as the range operations.

use std::path::Path;

use crate::error::{BridgeError, BridgeResult};
use crate::workbook::{open_workbook, save_workbook, sheet, sheet_mut, sheet_names};

pub fn rename_sheet(path: &Path, old_name: &str, new_name: &str) -> BridgeResult<String> {
    let mut book = open_workbook(path)?;
    if sheet_names(&book).iter().any(|n| n == new_name) {
        return Err(BridgeError::Data(format!(
            "sheet '{}' already exists",
            new_name
        )));
    }
    sheet_mut(&mut book, old_name)?.set_name(new_name);
    save_workbook(&book, path)?;
    Ok(format!("Renamed sheet '{}' to '{}'", old_name, new_name))
}

pub fn delete_sheet(path: &Path, name: &str) -> BridgeResult<String> {
    let mut book = open_workbook(path)?;
    if sheet_names(&book).len() <= 1 {
        return Err(BridgeError::Data(
            "cannot delete the only sheet in the workbook".into(),
        ));
    }
    sheet(&book, name)?;
    book.remove_sheet_by_name(name)
        .map_err(|e| BridgeError::Data(format!("cannot delete sheet '{}': {}", name, e)))?;
    save_workbook(&book, path)?;
    Ok(format!("Deleted sheet '{}'", name))
}

pub fn copy_sheet(path: &Path, source: &str, target: &str) -> BridgeResult<String> {
    let mut book = open_workbook(path)?;
    if sheet_names(&book).iter().any(|n| n == target) {
        return Err(BridgeError::Data(format!(
            "sheet '{}' already exists",
            target
        )));
    }
    let mut copy = sheet(&book, source)?.clone();
    copy.set_name(target);
    book.add_sheet(copy)
        .map_err(|e| BridgeError::Data(format!("cannot copy sheet to '{}': {}", target, e)))?;
    save_workbook(&book, path)?;
    Ok(format!("Copied sheet '{}' to '{}'", source, target))
}
