//! Workbook container glue over umya-spreadsheet.
//!
//! Every operation opens the target file fresh and persists before
//! returning; nothing is cached across calls.

use std::path::Path;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{BridgeError, BridgeResult};
use crate::types::SheetBoundary;

pub fn open_workbook(path: &Path) -> BridgeResult<Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        BridgeError::Workbook(format!("failed to open '{}': {}", path.display(), e))
    })
}

pub fn save_workbook(book: &Spreadsheet, path: &Path) -> BridgeResult<()> {
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| {
        BridgeError::Workbook(format!("failed to save '{}': {}", path.display(), e))
    })
}

pub fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection()
        .iter()
        .map(|ws| ws.get_name().to_string())
        .collect()
}

pub fn sheet<'a>(book: &'a Spreadsheet, name: &str) -> BridgeResult<&'a Worksheet> {
    book.get_sheet_by_name(name)
        .ok_or_else(|| BridgeError::SheetNotFound(name.to_string()))
}

pub fn sheet_mut<'a>(book: &'a mut Spreadsheet, name: &str) -> BridgeResult<&'a mut Worksheet> {
    book.get_sheet_by_name_mut(name)
        .ok_or_else(|| BridgeError::SheetNotFound(name.to_string()))
}

/// Snapshot the minimal rectangle containing all value-bearing cells.
/// An unpopulated sheet reports as a single empty A1 cell.
pub fn boundary(ws: &Worksheet) -> SheetBoundary {
    let mut bounds: Option<SheetBoundary> = None;
    for cell in ws.get_cell_collection() {
        if cell.get_value().is_empty() {
            continue;
        }
        let row = *cell.get_coordinate().get_row_num();
        let col = *cell.get_coordinate().get_col_num();
        bounds = Some(match bounds {
            None => SheetBoundary {
                min_row: row,
                min_col: col,
                max_row: row,
                max_col: col,
            },
            Some(b) => SheetBoundary {
                min_row: b.min_row.min(row),
                min_col: b.min_col.min(col),
                max_row: b.max_row.max(row),
                max_col: b.max_col.max(col),
            },
        });
    }
    bounds.unwrap_or(SheetBoundary {
        min_row: 1,
        min_col: 1,
        max_row: 1,
        max_col: 1,
    })
}

/// True when the sheet has no value-bearing cells at all.
pub fn is_sheet_empty(ws: &Worksheet) -> bool {
    ws.get_cell_collection()
        .iter()
        .all(|cell| cell.get_value().is_empty())
}

/// Create a new workbook with the default sheet and save it.
pub fn create_workbook(path: &Path) -> BridgeResult<()> {
    let book = umya_spreadsheet::new_file();
    save_workbook(&book, path)
}

/// Add a named sheet to an existing workbook.
pub fn create_sheet(path: &Path, name: &str) -> BridgeResult<()> {
    let mut book = open_workbook(path)?;
    book.new_sheet(name)
        .map_err(|e| BridgeError::Data(format!("cannot create sheet '{}': {}", name, e)))?;
    save_workbook(&book, path)
}

/// Workbook metadata: sheet names, count, file size, and optionally the
/// used range of each populated sheet.
pub fn workbook_info(path: &Path, include_ranges: bool) -> BridgeResult<serde_json::Value> {
    let book = open_workbook(path)?;
    let names = sheet_names(&book);
    let size = std::fs::metadata(path)?.len();

    let mut info = serde_json::json!({
        "filename": path.display().to_string(),
        "sheets": names,
        "sheet_count": names.len(),
        "size_bytes": size,
    });

    if include_ranges {
        let mut ranges = serde_json::Map::new();
        for name in &names {
            let ws = sheet(&book, name)?;
            if !is_sheet_empty(ws) {
                ranges.insert(
                    name.clone(),
                    serde_json::Value::String(boundary(ws).to_a1()),
                );
            }
        }
        info["used_ranges"] = serde_json::Value::Object(ranges);
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_book(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("book.xlsx");
        create_workbook(&path).unwrap();
        path
    }

    #[test]
    fn test_create_and_reopen_workbook() {
        let dir = TempDir::new().unwrap();
        let path = temp_book(&dir);
        let book = open_workbook(&path).unwrap();
        assert_eq!(sheet_names(&book), vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = temp_book(&dir);
        let book = open_workbook(&path).unwrap();
        assert!(matches!(
            sheet(&book, "Nope"),
            Err(BridgeError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_boundary_of_empty_sheet() {
        let dir = TempDir::new().unwrap();
        let path = temp_book(&dir);
        let book = open_workbook(&path).unwrap();
        let ws = sheet(&book, "Sheet1").unwrap();
        assert!(is_sheet_empty(ws));
        assert!(boundary(ws).is_empty_sheet());
    }

    #[test]
    fn test_boundary_tracks_populated_rectangle() {
        let dir = TempDir::new().unwrap();
        let path = temp_book(&dir);
        let mut book = open_workbook(&path).unwrap();
        {
            let ws = sheet_mut(&mut book, "Sheet1").unwrap();
            ws.get_cell_mut("B2").set_value("x");
            ws.get_cell_mut("D5").set_value("y");
        }
        let ws = sheet(&book, "Sheet1").unwrap();
        let b = boundary(ws);
        assert_eq!((b.min_row, b.min_col, b.max_row, b.max_col), (2, 2, 5, 4));
        assert_eq!(b.to_a1(), "B2:D5");
    }

    #[test]
    fn test_create_sheet_and_info() {
        let dir = TempDir::new().unwrap();
        let path = temp_book(&dir);
        create_sheet(&path, "Data").unwrap();
        let info = workbook_info(&path, false).unwrap();
        assert_eq!(info["sheet_count"], 2);
        assert_eq!(info["sheets"][1], "Data");
    }
}
