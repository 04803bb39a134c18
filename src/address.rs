//! Cell and range reference parsing.
//!
//! Converts A1-style references ("B7", "A1:C10") into 1-based row/column
//! coordinates. Column letters are base-26 with no zero digit (A=1, Z=26,
//! AA=27). Pure functions, no side effects.

use crate::error::{BridgeError, BridgeResult};
use crate::types::{CellAddress, CellRange};

/// Parse a single cell reference like "B7" (case-insensitive).
pub fn parse_cell(text: &str) -> BridgeResult<CellAddress> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::InvalidAddress("empty cell reference".into()));
    }

    let letter_len = trimmed.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let (letters, digits) = trimmed.split_at(letter_len);

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BridgeError::InvalidAddress(format!(
            "'{}' is not a valid cell reference",
            text
        )));
    }

    let col = column_index(letters)?;
    let row: u32 = digits.parse().map_err(|_| {
        BridgeError::InvalidAddress(format!("'{}' has an invalid row number", text))
    })?;
    if row == 0 {
        return Err(BridgeError::InvalidAddress(format!(
            "'{}' has a row number below 1",
            text
        )));
    }

    Ok(CellAddress::new(row, col))
}

/// Parse a cell or `start:end` range reference. A bare cell reference yields
/// a range whose start and end coincide. An end that precedes the start on
/// either axis is rejected rather than swapped.
pub fn parse_range(text: &str) -> BridgeResult<CellRange> {
    let trimmed = text.trim();
    match trimmed.split_once(':') {
        None => {
            let addr = parse_cell(trimmed)?;
            Ok(CellRange::new(addr, addr))
        }
        Some((start_text, end_text)) => {
            let start = parse_cell(start_text)?;
            let end = parse_cell(end_text)?;
            if end.row < start.row || end.col < start.col {
                return Err(BridgeError::RangeOrder(format!(
                    "end cell {} precedes start cell {}",
                    end.to_a1(),
                    start.to_a1()
                )));
            }
            Ok(CellRange::new(start, end))
        }
    }
}

/// Decode column letters to a 1-based index ("A" -> 1, "AA" -> 27).
pub fn column_index(letters: &str) -> BridgeResult<u32> {
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(BridgeError::InvalidAddress(format!(
                "'{}' contains a non-letter column character",
                letters
            )));
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        col = col
            .checked_mul(26)
            .and_then(|c26| c26.checked_add(digit))
            .ok_or_else(|| {
                BridgeError::InvalidAddress(format!("column '{}' is out of range", letters))
            })?;
    }
    if col == 0 {
        return Err(BridgeError::InvalidAddress("empty column letters".into()));
    }
    Ok(col)
}

/// Render a 1-based column index as letters (1 -> "A", 27 -> "AA").
pub fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII letters")
}
