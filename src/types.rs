use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

//==============================================================================
// Cell Addressing
//==============================================================================

/// A single cell position, 1-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Render as an A1-style reference ("B7").
    pub fn to_a1(&self) -> String {
        format!("{}{}", crate::address::column_letter(self.col), self.row)
    }
}

/// A rectangular span of cells. Invariant after parsing:
/// `start.row <= end.row` and `start.col <= end.col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    /// Render as an A1-style range reference ("A1:C10").
    pub fn to_a1(&self) -> String {
        format!("{}:{}", self.start.to_a1(), self.end.to_a1())
    }
}

//==============================================================================
// Normalized Cell Values
//==============================================================================

/// A cell value after type inference. Serializes untagged so JSON output
/// carries plain scalars ("Bob", 1250.0, true, "2023-12-25").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Int(i64),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Days from the Excel 1900 epoch (1899-12-30, which absorbs the historical
/// 1900 leap-year bug for all dates from March 1900 onward).
pub fn date_to_excel_serial(date: NaiveDate) -> i64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch");
    (date - base).num_days()
}

pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    let days = date_to_excel_serial(dt.date()) as f64;
    let secs = dt.time().num_seconds_from_midnight() as f64;
    days + secs / 86_400.0
}

//==============================================================================
// Display Formats
//==============================================================================

/// Canonical display-format vocabulary chosen by the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// "50%" -> 0.5
    Percentage,
    /// "$1,000.50" -> 1000.5
    CurrencyCents,
    /// "$1,000" -> 1000
    CurrencyWhole,
    /// "3.14" -> 3.14
    DecimalTwo,
    /// "1,000" -> 1000
    Integer,
    /// "2023-12-25"
    Date,
    /// "2023-12-25 10:30"
    DateTime,
}

impl NumberFormat {
    /// The Excel number-format code written to the cell style.
    pub fn code(&self) -> &'static str {
        match self {
            NumberFormat::Percentage => "0.00%",
            NumberFormat::CurrencyCents => "\"$\"#,##0.00",
            NumberFormat::CurrencyWhole => "\"$\"#,##0",
            NumberFormat::DecimalTwo => "0.00",
            NumberFormat::Integer => "0",
            NumberFormat::Date => "mm/dd/yyyy",
            NumberFormat::DateTime => "mm/dd/yyyy h:mm",
        }
    }
}

//==============================================================================
// Sheet Boundary Snapshot
//==============================================================================

/// The minimal rectangle known to contain all populated cells in a sheet.
///
/// Taken once at the start of each operation and never cached across calls;
/// the file may be mutated externally between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetBoundary {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl SheetBoundary {
    /// An unpopulated sheet reports as a single empty A1 cell.
    pub fn is_empty_sheet(&self) -> bool {
        self.min_row == 1 && self.min_col == 1 && self.max_row == 1 && self.max_col == 1
    }

    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            crate::address::column_letter(self.min_col),
            self.min_row,
            crate::address::column_letter(self.max_col),
            self.max_row
        )
    }
}

//==============================================================================
// Transfer Records
//==============================================================================

/// One cell of a metadata read: address, raw value, coordinates, and the
/// optional data-validation descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct CellRecord {
    pub address: String,
    pub value: serde_json::Value,
    pub row: u32,
    pub column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<serde_json::Value>,
}

/// Result of a metadata read over a resolved rectangle.
#[derive(Debug, Clone, Serialize)]
pub struct RangeData {
    pub range: String,
    pub sheet_name: String,
    pub cells: Vec<CellRecord>,
}

/// Result of a range write.
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    pub message: String,
    pub active_sheet: String,
}
