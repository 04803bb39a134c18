//! Data-validation lookup.
//!
//! Answers "does this cell carry a validation rule, and what does it say"
//! for the metadata read path. Containment is checked against the rule's
//! declared ranges using the address parser.

use umya_spreadsheet::Worksheet;

use crate::address;
use crate::types::CellAddress;

/// Describe the validation rule covering `addr`, if any.
pub fn validation_for_cell(ws: &Worksheet, addr: CellAddress) -> Option<serde_json::Value> {
    let validations = match ws.get_data_validations() {
        Some(v) => v,
        None => return None,
    };
    for rule in validations.get_data_validation_list() {
        let covered = rule
            .get_sequence_of_references()
            .get_range_collection()
            .iter()
            .any(|range| range_contains(&range.get_range(), addr));
        if !covered {
            continue;
        }

        let mut descriptor = serde_json::json!({
            "has_validation": true,
            "rule_type": format!("{:?}", rule.get_type()),
            "allow_blank": *rule.get_allow_blank(),
        });
        if !rule.get_formula1().is_empty() {
            descriptor["formula1"] = serde_json::Value::String(rule.get_formula1().to_string());
        }
        if !rule.get_formula2().is_empty() {
            descriptor["formula2"] = serde_json::Value::String(rule.get_formula2().to_string());
        }
        if !rule.get_prompt().is_empty() {
            descriptor["prompt"] = serde_json::Value::String(rule.get_prompt().to_string());
        }
        return Some(descriptor);
    }
    None
}

fn range_contains(range_text: &str, addr: CellAddress) -> bool {
    match address::parse_range(range_text) {
        Ok(range) => {
            addr.row >= range.start.row
                && addr.row <= range.end.row
                && addr.col >= range.start.col
                && addr.col <= range.end.col
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        let b2 = CellAddress::new(2, 2);
        assert!(range_contains("A1:C3", b2));
        assert!(range_contains("B2", b2));
        assert!(!range_contains("C3:D4", b2));
        assert!(!range_contains("not-a-range", b2));
    }
}
