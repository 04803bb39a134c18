//! Range resolution and transfer.
//!
//! Orchestrates the address parser and the inference engine against a
//! workbook file: resolve the effective rectangle from a start reference
//! and the sheet's data boundary, then run one row-major pass reading or
//! writing cells. Each operation opens the file fresh, takes a single
//! boundary snapshot, and (for writes) saves once after the last cell.

use std::path::Path;

use tracing::warn;
use umya_spreadsheet::Worksheet;

use crate::address::{self, column_letter};
use crate::error::{BridgeError, BridgeResult};
use crate::infer::infer;
use crate::types::{CellAddress, CellRecord, CellValue, NumberFormat, RangeData, WriteSummary};
use crate::validation::validation_for_cell;
use crate::workbook::{
    boundary, is_sheet_empty, open_workbook, save_workbook, sheet, sheet_mut, sheet_names,
};

/// Read raw values from a range. Rows containing only empty cells are
/// dropped; an empty result signals "no data", not an error.
pub fn read_range(
    path: &Path,
    sheet_name: &str,
    start_cell: &str,
    end_cell: Option<&str>,
) -> BridgeResult<Vec<Vec<CellValue>>> {
    let book = open_workbook(path)?;
    let ws = sheet(&book, sheet_name)?;

    let resolved = match resolve_rect(ws, start_cell, end_cell, false)? {
        Some(rect) => rect,
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in resolved.start.row..=resolved.end.row {
        let mut row_data = Vec::new();
        for col in resolved.start.col..=resolved.end.col {
            row_data.push(read_cell_value(ws, row, col));
        }
        if row_data.iter().any(|v| !v.is_empty()) {
            rows.push(row_data);
        }
    }
    Ok(rows)
}

/// Read a range with per-cell metadata: address, raw value, coordinates,
/// and (optionally) the data-validation descriptor. Every cell of the
/// rectangle is included regardless of emptiness.
pub fn read_range_with_metadata(
    path: &Path,
    sheet_name: &str,
    start_cell: &str,
    end_cell: Option<&str>,
    include_validation: bool,
) -> BridgeResult<RangeData> {
    let book = open_workbook(path)?;
    let ws = sheet(&book, sheet_name)?;

    let resolved = match resolve_rect(ws, start_cell, end_cell, true)? {
        Some(rect) => rect,
        None => {
            // Defined empty outcome for speculative probes past the boundary.
            let start_text = start_cell
                .split_once(':')
                .map(|(s, _)| s)
                .unwrap_or(start_cell);
            return Ok(RangeData {
                range: format!("{}:", start_text),
                sheet_name: sheet_name.to_string(),
                cells: Vec::new(),
            });
        }
    };

    let mut cells = Vec::new();
    for row in resolved.start.row..=resolved.end.row {
        for col in resolved.start.col..=resolved.end.col {
            let addr = CellAddress::new(row, col);
            let validation = if include_validation {
                Some(
                    validation_for_cell(ws, addr)
                        .unwrap_or_else(|| serde_json::json!({ "has_validation": false })),
                )
            } else {
                None
            };
            cells.push(CellRecord {
                address: addr.to_a1(),
                value: read_cell_value(ws, row, col).to_json(),
                row,
                column: col,
                validation,
            });
        }
    }

    Ok(RangeData {
        range: format!(
            "{}{}:{}{}",
            column_letter(resolved.start.col),
            resolved.start.row,
            column_letter(resolved.end.col),
            resolved.end.row
        ),
        sheet_name: sheet_name.to_string(),
        cells,
    })
}

/// Write rows of raw values starting at `start_cell`, running type
/// inference per cell when `auto_detect` is set. All cells are written
/// before the single save; with `auto_detect` off the raw values go in
/// verbatim and no display format is touched.
pub fn write_range(
    path: &Path,
    sheet_name: Option<&str>,
    rows: &[Vec<serde_json::Value>],
    start_cell: &str,
    auto_detect: bool,
) -> BridgeResult<WriteSummary> {
    if rows.is_empty() {
        return Err(BridgeError::NoData);
    }

    let mut book = open_workbook(path)?;

    let target = match sheet_name {
        None => book.get_active_sheet().get_name().to_string(),
        Some(name) => {
            if !sheet_names(&book).iter().any(|n| n == name) {
                book.new_sheet(name).map_err(|e| {
                    BridgeError::Data(format!("cannot create sheet '{}': {}", name, e))
                })?;
            }
            name.to_string()
        }
    };

    let start = parse_start(start_cell)?;

    {
        let ws = sheet_mut(&mut book, &target)?;
        for (i, row) in rows.iter().enumerate() {
            for (j, raw) in row.iter().enumerate() {
                let cell_row = start.row + i as u32;
                let cell_col = start.col + j as u32;
                if auto_detect {
                    let inferred = infer(&json_raw_string(raw));
                    write_cell_value(ws, cell_row, cell_col, &inferred.value);
                    if let Some(format) = inferred.format {
                        set_cell_format(ws, cell_row, cell_col, format);
                    }
                } else {
                    write_raw_json(ws, cell_row, cell_col, raw);
                }
            }
        }
    }

    save_workbook(&book, path)?;

    Ok(WriteSummary {
        message: format!("Data written to {} with type detection", target),
        active_sheet: target,
    })
}

/// Re-infer every populated cell of a range and apply the canonical value
/// and display format where a format token is produced. Returns the number
/// of reformatted cells. Deterministic under repetition.
pub fn auto_format_range(
    path: &Path,
    sheet_name: &str,
    start_cell: &str,
    end_cell: Option<&str>,
) -> BridgeResult<usize> {
    let mut book = open_workbook(path)?;
    sheet(&book, sheet_name)?;

    let (start, end) = match end_cell {
        Some(end_text) => {
            let start = parse_start(start_cell)?;
            let end = address::parse_cell(end_text)
                .map_err(|e| BridgeError::Data(format!("Invalid end cell format: {}", e)))?;
            if end.row < start.row || end.col < start.col {
                return Err(BridgeError::RangeOrder(format!(
                    "end cell {} precedes start cell {}",
                    end.to_a1(),
                    start.to_a1()
                )));
            }
            (start, end)
        }
        None => {
            // No end: scan all data in the sheet from A1.
            let b = boundary(sheet(&book, sheet_name)?);
            (CellAddress::new(1, 1), CellAddress::new(b.max_row, b.max_col))
        }
    };

    let mut formatted = 0usize;
    {
        let ws = sheet_mut(&mut book, sheet_name)?;
        for row in start.row..=end.row {
            for col in start.col..=end.col {
                let current = match read_cell_text(ws, row, col) {
                    Some(text) => text,
                    None => continue,
                };
                let inferred = infer(&current);
                if let Some(format) = inferred.format {
                    if !inferred.value.is_empty() {
                        write_cell_value(ws, row, col, &inferred.value);
                        set_cell_format(ws, row, col, format);
                        formatted += 1;
                    }
                }
            }
        }
    }

    save_workbook(&book, path)?;
    Ok(formatted)
}

//==============================================================================
// Rectangle Resolution
//==============================================================================

struct Rect {
    start: CellAddress,
    end: CellAddress,
}

/// Resolve the effective rectangle for a read.
///
/// A `start:end` start reference is split and overrides a separately
/// supplied end. With no end the sheet's own boundary is used (or just the
/// start cell on an empty sheet); the metadata path keeps a non-default
/// start instead of snapping it to the sheet minimum. A start beyond the
/// data boundary resolves to `None`; the caller returns empty.
fn resolve_rect(
    ws: &Worksheet,
    start_cell: &str,
    end_cell: Option<&str>,
    keep_explicit_start: bool,
) -> BridgeResult<Option<Rect>> {
    let (start_text, end_text) = match start_cell.split_once(':') {
        Some((s, e)) => (s, Some(e)),
        None => (start_cell, end_cell),
    };

    let mut start = parse_start(start_text)?;
    let bounds = boundary(ws);

    let end = match end_text {
        Some(text) => {
            let end = address::parse_cell(text)
                .map_err(|e| BridgeError::Data(format!("Invalid end cell format: {}", e)))?;
            if end.row < start.row || end.col < start.col {
                return Err(BridgeError::RangeOrder(format!(
                    "end cell {} precedes start cell {}",
                    end.to_a1(),
                    start.to_a1()
                )));
            }
            end
        }
        None => {
            if bounds.is_empty_sheet() && is_sheet_empty(ws) {
                // Empty sheet: the range collapses to the start cell.
                start
            } else if keep_explicit_start && start_text != "A1" {
                CellAddress::new(bounds.max_row, bounds.max_col)
            } else {
                start = CellAddress::new(bounds.min_row, bounds.min_col);
                CellAddress::new(bounds.max_row, bounds.max_col)
            }
        }
    };

    if start.row > bounds.max_row || start.col > bounds.max_col {
        warn!(
            "start cell {} is outside the sheet's data boundary ({}); no data will be read",
            start.to_a1(),
            bounds.to_a1()
        );
        return Ok(None);
    }

    Ok(Some(Rect { start, end }))
}

fn parse_start(start_cell: &str) -> BridgeResult<CellAddress> {
    address::parse_cell(start_cell)
        .map_err(|e| BridgeError::Data(format!("Invalid start cell format: {}", e)))
}

//==============================================================================
// Cell Access
//==============================================================================

fn read_cell_value(ws: &Worksheet, row: u32, col: u32) -> CellValue {
    match ws.get_cell((col, row)) {
        None => CellValue::Empty,
        Some(cell) => {
            let text = cell.get_value().to_string();
            if text.is_empty() {
                CellValue::Empty
            } else if let Some(number) = cell.get_value_number() {
                CellValue::Number(number)
            } else {
                CellValue::Text(text)
            }
        }
    }
}

/// The raw stored text of a populated cell, or `None` when absent/blank.
fn read_cell_text(ws: &Worksheet, row: u32, col: u32) -> Option<String> {
    let text = ws.get_cell((col, row))?.get_value().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn write_cell_value(ws: &mut Worksheet, row: u32, col: u32, value: &CellValue) {
    let cell = ws.get_cell_mut((col, row));
    match value {
        CellValue::Empty => {
            cell.set_value("");
        }
        CellValue::Int(i) => {
            cell.set_value_number(*i as f64);
        }
        CellValue::Number(n) => {
            cell.set_value_number(*n);
        }
        CellValue::Bool(b) => {
            cell.set_value_bool(*b);
        }
        CellValue::Date(d) => {
            cell.set_value_number(crate::types::date_to_excel_serial(*d) as f64);
        }
        CellValue::DateTime(dt) => {
            cell.set_value_number(crate::types::datetime_to_excel_serial(*dt));
        }
        CellValue::Text(s) => {
            cell.set_value(s.as_str());
        }
    }
}

fn set_cell_format(ws: &mut Worksheet, row: u32, col: u32, format: NumberFormat) {
    ws.get_cell_mut((col, row))
        .get_style_mut()
        .get_number_format_mut()
        .set_format_code(format.code());
}

fn write_raw_json(ws: &mut Worksheet, row: u32, col: u32, raw: &serde_json::Value) {
    let cell = ws.get_cell_mut((col, row));
    match raw {
        serde_json::Value::Null => {
            cell.set_value("");
        }
        serde_json::Value::Bool(b) => {
            cell.set_value_bool(*b);
        }
        serde_json::Value::Number(n) => {
            cell.set_value_number(n.as_f64().unwrap_or(0.0));
        }
        serde_json::Value::String(s) => {
            cell.set_value(s.as_str());
        }
        other => {
            cell.set_value(other.to_string());
        }
    }
}

/// Render a raw tool argument the way the inference engine expects it.
fn json_raw_string(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
