//! End-to-end range transfer tests
//!
//! Exercises write/read/autoformat against real workbook files on disk.

use pretty_assertions::assert_eq;
use serde_json::json;
use sheetbridge::error::BridgeError;
use sheetbridge::range::{auto_format_range, read_range, read_range_with_metadata, write_range};
use sheetbridge::types::CellValue;
use sheetbridge::workbook::{create_workbook, open_workbook, sheet_names};
use std::path::PathBuf;
use tempfile::TempDir;

fn new_book(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("book.xlsx");
    create_workbook(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// WRITE + READ ROUND TRIPS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_write_then_read_with_type_detection() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    let rows = vec![
        vec![json!("Name"), json!("Amount")],
        vec![json!("Bob"), json!("$1,250.00")],
    ];
    let summary = write_range(&path, Some("Sheet1"), &rows, "A1", true).unwrap();
    assert_eq!(summary.active_sheet, "Sheet1");

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0][0], CellValue::Text("Name".to_string()));
    assert_eq!(data[0][1], CellValue::Text("Amount".to_string()));
    assert_eq!(data[1][0], CellValue::Text("Bob".to_string()));
    assert_eq!(data[1][1], CellValue::Number(1250.0));
}

#[test]
fn test_write_percentage_becomes_fraction() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, None, &[vec![json!("50%")]], "A1", true).unwrap();

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data[0][0], CellValue::Number(0.5));
}

#[test]
fn test_write_date_becomes_excel_serial() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, None, &[vec![json!("2023-12-25")]], "A1", true).unwrap();

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    // Days since the 1900-system epoch (1899-12-30).
    assert_eq!(data[0][0], CellValue::Number(45285.0));
}

#[test]
fn test_write_without_detection_keeps_raw_text() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, None, &[vec![json!("50%")]], "A1", false).unwrap();

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data[0][0], CellValue::Text("50%".to_string()));
}

#[test]
fn test_write_at_offset_start() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, None, &[vec![json!("x"), json!("y")]], "B2", true).unwrap();

    let data = read_range(&path, "Sheet1", "B2", Some("C2")).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0][0], CellValue::Text("x".to_string()));
    assert_eq!(data[0][1], CellValue::Text("y".to_string()));
}

#[test]
fn test_write_empty_rows_is_no_data() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    let result = write_range(&path, None, &[], "A1", true);
    assert!(matches!(result, Err(BridgeError::NoData)));
}

#[test]
fn test_write_creates_missing_sheet() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, Some("Data"), &[vec![json!(1)]], "A1", true).unwrap();

    let book = open_workbook(&path).unwrap();
    assert!(sheet_names(&book).iter().any(|n| n == "Data"));
}

#[test]
fn test_write_numeric_json_values_pass_through() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    write_range(&path, None, &[vec![json!(42), json!(2.5)]], "A1", true).unwrap();

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data[0][0], CellValue::Number(42.0));
    assert_eq!(data[0][1], CellValue::Number(2.5));
}

// ═══════════════════════════════════════════════════════════════════════════
// RANGE RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_read_missing_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);

    let result = read_range(&path, "Nope", "A1", None);
    assert!(matches!(result, Err(BridgeError::SheetNotFound(_))));
}

#[test]
fn test_read_beyond_boundary_returns_empty() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("a")]], "A1", true).unwrap();

    let data = read_range(&path, "Sheet1", "Z99", Some("AA100")).unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_read_skips_all_empty_rows() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("top")]], "A1", true).unwrap();
    write_range(&path, None, &[vec![json!("bottom")]], "A3", true).unwrap();

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0][0], CellValue::Text("top".to_string()));
    assert_eq!(data[1][0], CellValue::Text("bottom".to_string()));
}

#[test]
fn test_read_range_embedded_in_start() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(
        &path,
        None,
        &[
            vec![json!("a"), json!("b")],
            vec![json!("c"), json!("d")],
        ],
        "A1",
        true,
    )
    .unwrap();

    let data = read_range(&path, "Sheet1", "A1:A2", None).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].len(), 1);
    assert_eq!(data[1][0], CellValue::Text("c".to_string()));
}

#[test]
fn test_read_reversed_range_fails() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("a")]], "A1", true).unwrap();

    let result = read_range(&path, "Sheet1", "C3", Some("A1"));
    assert!(matches!(result, Err(BridgeError::RangeOrder(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// METADATA READS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_metadata_includes_every_cell() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(
        &path,
        None,
        &[vec![json!("a"), json!("b")], vec![json!("c"), json!("d")]],
        "A1",
        true,
    )
    .unwrap();

    let data = read_range_with_metadata(&path, "Sheet1", "A1", Some("C2"), true).unwrap();
    assert_eq!(data.range, "A1:C2");
    assert_eq!(data.sheet_name, "Sheet1");
    assert_eq!(data.cells.len(), 6);

    let first = &data.cells[0];
    assert_eq!(first.address, "A1");
    assert_eq!(first.row, 1);
    assert_eq!(first.column, 1);
    assert_eq!(first.value, json!("a"));

    // C1/C2 lie past the written data but still appear as empty records.
    let last = &data.cells[5];
    assert_eq!(last.address, "C2");
    assert_eq!(last.value, serde_json::Value::Null);
}

#[test]
fn test_metadata_default_range_from_boundary() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(
        &path,
        None,
        &[vec![json!("a"), json!("b")], vec![json!("c"), json!("d")]],
        "A1",
        true,
    )
    .unwrap();

    let data = read_range_with_metadata(&path, "Sheet1", "A1", None, false).unwrap();
    assert_eq!(data.range, "A1:B2");
    assert_eq!(data.cells.len(), 4);
    assert!(data.cells[0].validation.is_none());
}

#[test]
fn test_metadata_after_currency_write() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(
        &path,
        Some("Sheet1"),
        &[
            vec![json!("Name"), json!("Amount")],
            vec![json!("Bob"), json!("$1,250.00")],
        ],
        "A1",
        true,
    )
    .unwrap();

    let data = read_range_with_metadata(&path, "Sheet1", "A1", None, true).unwrap();
    assert_eq!(data.range, "A1:B2");

    let b2 = data.cells.iter().find(|c| c.address == "B2").unwrap();
    assert_eq!(b2.row, 2);
    assert_eq!(b2.column, 2);
    assert_eq!(b2.value, json!(1250.0));
}

#[test]
fn test_metadata_beyond_boundary_is_defined_empty() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("a")]], "A1", true).unwrap();

    let data = read_range_with_metadata(&path, "Sheet1", "Z99", None, true).unwrap();
    assert_eq!(data.range, "Z99:");
    assert!(data.cells.is_empty());
}

#[test]
fn test_metadata_validation_descriptor_defaults_false() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("a")]], "A1", true).unwrap();

    let data = read_range_with_metadata(&path, "Sheet1", "A1", Some("A1"), true).unwrap();
    let validation = data.cells[0].validation.as_ref().unwrap();
    assert_eq!(validation["has_validation"], json!(false));
}

// ═══════════════════════════════════════════════════════════════════════════
// AUTOFORMAT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_autoformat_converts_raw_text() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    // Stored verbatim, no detection on the way in.
    write_range(
        &path,
        None,
        &[vec![json!("50%"), json!("$100.00")]],
        "A1",
        false,
    )
    .unwrap();

    let count = auto_format_range(&path, "Sheet1", "A1", Some("B1")).unwrap();
    assert_eq!(count, 2);

    let data = read_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(data[0][0], CellValue::Number(0.5));
    assert_eq!(data[0][1], CellValue::Number(100.0));
}

#[test]
fn test_autoformat_defaults_to_whole_sheet() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("25%")]], "C3", false).unwrap();

    // Start is a formality when no end is given; the scan covers all data.
    let count = auto_format_range(&path, "Sheet1", "A1", None).unwrap();
    assert_eq!(count, 1);

    let data = read_range(&path, "Sheet1", "C3", Some("C3")).unwrap();
    assert_eq!(data[0][0], CellValue::Number(0.25));
}

#[test]
fn test_autoformat_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = new_book(&dir);
    write_range(&path, None, &[vec![json!("75%")]], "A1", false).unwrap();

    auto_format_range(&path, "Sheet1", "A1", Some("A1")).unwrap();
    let first = read_range(&path, "Sheet1", "A1", None).unwrap();

    auto_format_range(&path, "Sheet1", "A1", Some("A1")).unwrap();
    let second = read_range(&path, "Sheet1", "A1", None).unwrap();

    assert_eq!(first, second);
    assert_eq!(second[0][0], CellValue::Number(0.75));
}
