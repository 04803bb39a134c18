//! Value type inference.
//!
//! Classifies a raw textual cell value as a number, percentage, currency
//! amount, date/time, boolean, or plain text, and picks the canonical
//! display format for it. Detection runs an ordered list of independent
//! detectors; the first match wins, so the order is load-bearing (numeric
//! detection must precede boolean so "1"/"0" stay integers).
//!
//! All parsing is locale-invariant: period decimal separator, comma
//! thousands separator only.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::types::{CellValue, NumberFormat};

/// A normalized value plus the display format chosen for it (absent for
/// plain text and booleans).
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    pub value: CellValue,
    pub format: Option<NumberFormat>,
}

impl Inferred {
    fn new(value: CellValue, format: Option<NumberFormat>) -> Self {
        Self { value, format }
    }
}

type Detector = fn(&str) -> Option<Inferred>;

/// Detection order. Each entry is a pure predicate+converter; the first to
/// produce a value claims the input.
const DETECTORS: &[Detector] = &[
    detect_percentage,
    detect_currency,
    detect_number,
    detect_fallback_numeric,
    detect_date_time,
    detect_boolean,
];

/// Infer the semantic type of a raw cell value.
///
/// Empty or whitespace-only input yields `(Empty, None)`, signalling "no
/// value, do not write a format". A value that fails every detector is
/// returned as unmodified (trimmed) text, never an error.
pub fn infer(raw: &str) -> Inferred {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Inferred::new(CellValue::Empty, None);
    }

    for detector in DETECTORS {
        if let Some(inferred) = detector(trimmed) {
            return inferred;
        }
    }

    Inferred::new(CellValue::Text(trimmed.to_string()), None)
}

/// Trailing `%` over a numeric remainder: divide by 100.
fn detect_percentage(value: &str) -> Option<Inferred> {
    let numeric_part = value.strip_suffix('%')?.replace(',', "");
    if numeric_part.is_empty()
        || !numeric_part
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return None;
    }
    let number: f64 = numeric_part.parse().ok()?;
    Some(Inferred::new(
        CellValue::Number(number / 100.0),
        Some(NumberFormat::Percentage),
    ))
}

/// Leading currency symbol over digits with optional thousands separators
/// and a single optional decimal point. The symbol is mandatory; bare
/// comma-grouped numbers belong to the plain-number detector.
fn detect_currency(value: &str) -> Option<Inferred> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[$€£¥][\d,]+\.?\d*$").expect("valid regex"));
    if !re.is_match(value) {
        return None;
    }
    let numeric_part: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric_to_inferred(
        &numeric_part,
        NumberFormat::CurrencyCents,
        NumberFormat::CurrencyWhole,
    )
}

/// Optional minus, digits with optional thousands separators, optional
/// single decimal point.
fn detect_number(value: &str) -> Option<Inferred> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^-?[\d,]+\.?\d*$").expect("valid regex"));
    if !re.is_match(value) {
        return None;
    }
    let numeric_part = value.replace(',', "");
    numeric_to_inferred(
        &numeric_part,
        NumberFormat::DecimalTwo,
        NumberFormat::Integer,
    )
}

/// Direct conversion for whatever the syntactic patterns miss, e.g.
/// scientific notation ("1e10"). A conversion failure is absorbed silently
/// and inference moves on to date detection.
fn detect_fallback_numeric(value: &str) -> Option<Inferred> {
    if value.contains('.') || value.to_lowercase().contains('e') {
        let number: f64 = value.parse().ok()?;
        Some(Inferred::new(
            CellValue::Number(number),
            Some(NumberFormat::DecimalTwo),
        ))
    } else {
        let number: i64 = value.parse().ok()?;
        Some(Inferred::new(
            CellValue::Int(number),
            Some(NumberFormat::Integer),
        ))
    }
}

/// Split a cleaned numeric string on the presence of a decimal point:
/// float with the "cents" format, integer with the whole format.
fn numeric_to_inferred(
    numeric_part: &str,
    float_format: NumberFormat,
    int_format: NumberFormat,
) -> Option<Inferred> {
    if numeric_part.contains('.') {
        let number: f64 = numeric_part.parse().ok()?;
        Some(Inferred::new(CellValue::Number(number), Some(float_format)))
    } else if let Ok(number) = numeric_part.parse::<i64>() {
        Some(Inferred::new(CellValue::Int(number), Some(int_format)))
    } else {
        // Digit strings wider than i64 still count as integers for display.
        let number: f64 = numeric_part.parse().ok()?;
        Some(Inferred::new(CellValue::Number(number), Some(int_format)))
    }
}

/// Calendar-first date patterns, each alone or followed by a time-of-day.
/// The first full match wins, so MM/DD is preferred over DD/MM.
const DATE_PATTERNS: &[(&str, bool)] = &[
    ("%Y-%m-%d", false),
    ("%m/%d/%Y", false),
    ("%d/%m/%Y", false),
    ("%Y/%m/%d", false),
    ("%Y-%m-%d %H:%M:%S", true),
    ("%m/%d/%Y %H:%M:%S", true),
    ("%d/%m/%Y %H:%M:%S", true),
    ("%Y-%m-%d %H:%M", true),
    ("%m/%d/%Y %H:%M", true),
    ("%d/%m/%Y %H:%M", true),
];

fn detect_date_time(value: &str) -> Option<Inferred> {
    for (pattern, has_time) in DATE_PATTERNS {
        if *has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
                return Some(Inferred::new(
                    CellValue::DateTime(dt),
                    Some(NumberFormat::DateTime),
                ));
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(value, pattern) {
            return Some(Inferred::new(
                CellValue::Date(date),
                Some(NumberFormat::Date),
            ));
        }
    }
    None
}

/// Case-insensitive boolean words. Bare "1"/"0" are listed for parity with
/// the truth sets but are already claimed by numeric detection above.
fn detect_boolean(value: &str) -> Option<Inferred> {
    let lower = value.to_lowercase();
    match lower.as_str() {
        "true" | "yes" | "1" => Some(Inferred::new(CellValue::Bool(true), None)),
        "false" | "no" | "0" => Some(Inferred::new(CellValue::Bool(false), None)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_infers(raw: &str, value: CellValue, format: Option<NumberFormat>) {
        assert_eq!(infer(raw), Inferred::new(value, format), "input: '{}'", raw);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_infers("", CellValue::Empty, None);
        assert_infers("   ", CellValue::Empty, None);
        assert_infers("\t\n", CellValue::Empty, None);
    }

    #[test]
    fn test_percentage() {
        assert_infers("50%", CellValue::Number(0.5), Some(NumberFormat::Percentage));
        assert_infers(
            "12.5%",
            CellValue::Number(0.125),
            Some(NumberFormat::Percentage),
        );
        assert_infers(
            "-5%",
            CellValue::Number(-0.05),
            Some(NumberFormat::Percentage),
        );
        assert_infers(
            "1,200%",
            CellValue::Number(12.0),
            Some(NumberFormat::Percentage),
        );
    }

    #[test]
    fn test_percentage_with_junk_falls_through_to_text() {
        assert_infers("abc%", CellValue::Text("abc%".into()), None);
        assert_infers("%", CellValue::Text("%".into()), None);
    }

    #[test]
    fn test_currency_with_cents() {
        assert_infers(
            "$1,000.50",
            CellValue::Number(1000.50),
            Some(NumberFormat::CurrencyCents),
        );
        assert_infers(
            "€99.99",
            CellValue::Number(99.99),
            Some(NumberFormat::CurrencyCents),
        );
    }

    #[test]
    fn test_currency_whole() {
        assert_infers(
            "$1,000",
            CellValue::Int(1000),
            Some(NumberFormat::CurrencyWhole),
        );
        assert_infers("£5", CellValue::Int(5), Some(NumberFormat::CurrencyWhole));
        assert_infers(
            "¥1200",
            CellValue::Int(1200),
            Some(NumberFormat::CurrencyWhole),
        );
    }

    #[test]
    fn test_comma_grouped_number_is_integer_not_currency() {
        assert_infers("1,000", CellValue::Int(1000), Some(NumberFormat::Integer));
        assert_infers(
            "1,234,567",
            CellValue::Int(1_234_567),
            Some(NumberFormat::Integer),
        );
    }

    #[test]
    fn test_plain_numbers() {
        assert_infers("123", CellValue::Int(123), Some(NumberFormat::Integer));
        assert_infers("-42", CellValue::Int(-42), Some(NumberFormat::Integer));
        assert_infers(
            "3.14",
            CellValue::Number(3.14),
            Some(NumberFormat::DecimalTwo),
        );
        assert_infers(
            "-1,000.25",
            CellValue::Number(-1000.25),
            Some(NumberFormat::DecimalTwo),
        );
    }

    #[test]
    fn test_scientific_notation_via_fallback() {
        assert_infers(
            "1e10",
            CellValue::Number(1e10),
            Some(NumberFormat::DecimalTwo),
        );
        assert_infers(
            "2.5E-3",
            CellValue::Number(2.5e-3),
            Some(NumberFormat::DecimalTwo),
        );
    }

    #[test]
    fn test_dates() {
        let christmas = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_infers(
            "2023-12-25",
            CellValue::Date(christmas),
            Some(NumberFormat::Date),
        );
        assert_infers(
            "12/25/2023",
            CellValue::Date(christmas),
            Some(NumberFormat::Date),
        );
        assert_infers(
            "2023/12/25",
            CellValue::Date(christmas),
            Some(NumberFormat::Date),
        );
    }

    #[test]
    fn test_date_ambiguity_prefers_month_first() {
        // 03/04/2023 parses as March 4th, not April 3rd.
        assert_infers(
            "03/04/2023",
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 3, 4).unwrap()),
            Some(NumberFormat::Date),
        );
        // Day > 12 forces the day-first pattern.
        assert_infers(
            "25/12/2023",
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()),
            Some(NumberFormat::Date),
        );
    }

    #[test]
    fn test_date_times() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 25)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_infers(
            "2023-12-25 10:30:00",
            CellValue::DateTime(dt),
            Some(NumberFormat::DateTime),
        );
        assert_infers(
            "2023-12-25 10:30",
            CellValue::DateTime(dt),
            Some(NumberFormat::DateTime),
        );
        assert_infers(
            "12/25/2023 10:30",
            CellValue::DateTime(dt),
            Some(NumberFormat::DateTime),
        );
    }

    #[test]
    fn test_invalid_date_falls_through_to_text() {
        assert_infers("2023-13-45", CellValue::Text("2023-13-45".into()), None);
    }

    #[test]
    fn test_booleans() {
        assert_infers("true", CellValue::Bool(true), None);
        assert_infers("TRUE", CellValue::Bool(true), None);
        assert_infers("yes", CellValue::Bool(true), None);
        assert_infers("false", CellValue::Bool(false), None);
        assert_infers("No", CellValue::Bool(false), None);
    }

    #[test]
    fn test_bare_one_and_zero_stay_numeric() {
        assert_infers("1", CellValue::Int(1), Some(NumberFormat::Integer));
        assert_infers("0", CellValue::Int(0), Some(NumberFormat::Integer));
    }

    #[test]
    fn test_plain_text() {
        assert_infers("hello", CellValue::Text("hello".into()), None);
        assert_infers("  hello  ", CellValue::Text("hello".into()), None);
        assert_infers("12 Main St", CellValue::Text("12 Main St".into()), None);
    }
}
