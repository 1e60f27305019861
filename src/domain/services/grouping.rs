use serde::Serialize;
use std::collections::HashMap;
use crate::domain::models::{field::FieldType, guest::GuestRecord};

/// Per-value aggregates for one field, in the order values were first seen.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GroupingResult {
    /// Display label of the grouped field.
    pub field: String,
    pub values: Vec<(String, f64)>,
}

impl GroupingResult {
    /// Sum of all aggregates. NaN when any NUMBER value failed to parse.
    pub fn total(&self) -> f64 {
        self.values.iter().map(|(_, aggregate)| aggregate).sum()
    }
}

/// Integer prefix parse with `parseInt(value, 10)` semantics: leading
/// whitespace is skipped, a sign is allowed, and parsing stops at the first
/// non-digit. `None` when no digit was read.
pub fn parse_int_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().map(|n| sign * n)
}

/// Tallies guests by their raw value for `field_id`.
///
/// NUMBER fields sum the parsed values; every other type counts guests.
/// Guests without a value (or with an empty one) are skipped.
pub fn group(guests: &[GuestRecord], field_id: &str, field_type: FieldType) -> Vec<(String, f64)> {
    let mut values: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for guest in guests {
        let value = match guest.value_of(field_id) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };

        let slot = *index.entry(value.to_string()).or_insert_with(|| {
            values.push((value.to_string(), 0.0));
            values.len() - 1
        });

        values[slot].1 += match field_type {
            FieldType::Number => parse_int_prefix(value).unwrap_or(f64::NAN),
            FieldType::Text | FieldType::Choice => 1.0,
        };
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::guest::{Guest, GuestValue};

    fn guest(values: &[(&str, &str)]) -> GuestRecord {
        let guest = Guest::new("event-1".into());
        let values = values.iter().map(|(field_id, value)| GuestValue {
            guest_id: guest.id.clone(),
            field_id: field_id.to_string(),
            field_name: field_id.to_string(),
            field_type: "TEXT".into(),
            value: value.to_string(),
        }).collect();
        GuestRecord { guest, values }
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("10"), Some(10.0));
        assert_eq!(parse_int_prefix("  7"), Some(7.0));
        assert_eq!(parse_int_prefix("-3"), Some(-3.0));
        assert_eq!(parse_int_prefix("+4"), Some(4.0));
        assert_eq!(parse_int_prefix("12 anos"), Some(12.0));
        assert_eq!(parse_int_prefix("3.9"), Some(3.0));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_number_field_sums_and_skips_empty() {
        let guests = vec![
            guest(&[("f1", "10")]),
            guest(&[("f1", "5")]),
            guest(&[("f1", "")]),
        ];
        let values = group(&guests, "f1", FieldType::Number);
        assert_eq!(values, vec![("10".to_string(), 10.0), ("5".to_string(), 5.0)]);

        let result = GroupingResult { field: "Acompanhantes".into(), values };
        assert_eq!(result.total(), 15.0);
    }

    #[test]
    fn test_option_field_counts_in_first_seen_order() {
        let guests = vec![
            guest(&[("f2", "Vegetariano")]),
            guest(&[("f2", "Vegetariano")]),
            guest(&[("f2", "Vegano")]),
        ];
        let values = group(&guests, "f2", FieldType::Choice);
        assert_eq!(values, vec![("Vegetariano".to_string(), 2.0), ("Vegano".to_string(), 1.0)]);
    }

    #[test]
    fn test_values_are_not_normalized() {
        let guests = vec![
            guest(&[("f2", "Vegano")]),
            guest(&[("f2", "vegano")]),
            guest(&[("f2", "Vegano")]),
        ];
        let values = group(&guests, "f2", FieldType::Choice);
        assert_eq!(values, vec![("Vegano".to_string(), 2.0), ("vegano".to_string(), 1.0)]);
    }

    #[test]
    fn test_repeated_number_values_accumulate() {
        let guests = vec![
            guest(&[("f1", "2")]),
            guest(&[("f1", "3")]),
            guest(&[("f1", "2")]),
        ];
        let values = group(&guests, "f1", FieldType::Number);
        assert_eq!(values, vec![("2".to_string(), 4.0), ("3".to_string(), 3.0)]);
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let guests = vec![
            guest(&[("other", "x")]),
            guest(&[("f2", "Vegano"), ("other", "y")]),
        ];
        let values = group(&guests, "f2", FieldType::Choice);
        assert_eq!(values, vec![("Vegano".to_string(), 1.0)]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(group(&[], "f1", FieldType::Number).is_empty());

        let guests = vec![guest(&[("other", "x")])];
        let values = group(&guests, "f1", FieldType::Number);
        assert!(values.is_empty());
        assert_eq!(GroupingResult { field: "x".into(), values }.total(), 0.0);
    }

    #[test]
    fn test_non_numeric_value_poisons_total() {
        let guests = vec![
            guest(&[("f1", "2")]),
            guest(&[("f1", "dois")]),
        ];
        let values = group(&guests, "f1", FieldType::Number);
        assert_eq!(values[0], ("2".to_string(), 2.0));
        assert!(values[1].1.is_nan());

        let result = GroupingResult { field: "Acompanhantes".into(), values };
        assert!(!result.total().is_finite());
    }

    #[test]
    fn test_text_field_falls_through_to_count() {
        let guests = vec![guest(&[("f3", "Ana")]), guest(&[("f3", "Ana")])];
        assert_eq!(group(&guests, "f3", FieldType::Text), vec![("Ana".to_string(), 2.0)]);
    }

    #[test]
    fn test_sum_and_count_laws() {
        let raw = ["1", "4", "", "4", "10", "7", "1"];
        let guests: Vec<GuestRecord> = raw.iter().map(|v| guest(&[("f", *v)])).collect();

        let sums = group(&guests, "f", FieldType::Number);
        let total: f64 = sums.iter().map(|(_, n)| n).sum();
        let expected: f64 = raw.iter().filter(|v| !v.is_empty()).filter_map(|v| parse_int_prefix(v)).sum();
        assert_eq!(total, expected);

        let counts = group(&guests, "f", FieldType::Choice);
        let count: f64 = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(count, raw.iter().filter(|v| !v.is_empty()).count() as f64);
    }
}
