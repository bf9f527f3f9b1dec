//! Duplicate removal: `remove_duplicates`.

use std::collections::HashSet;

use crate::types::{Record, Records};

/// Keep the first occurrence of every distinct record.
///
/// Two records are duplicates when they hold the same set of `(key, value)` pairs regardless of
/// field order. Value comparison is type-sensitive.
pub fn remove_duplicates(records: &[Record]) -> Records {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|record| seen.insert(record.content_key()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::remove_duplicates;
    use crate::types::{Record, Value};

    #[test]
    fn exact_repeat_is_removed_and_order_kept() {
        let a = Record::new().with("id", 1).with("name", "a");
        let b = Record::new().with("id", 2).with("name", "b");
        let c = Record::new().with("id", 3).with("name", "c");
        let input = vec![a.clone(), b.clone(), a.clone(), c.clone()];
        let out = remove_duplicates(&input);
        assert_eq!(out.len(), input.len() - 1);
        assert_eq!(out, vec![a, b, c]);
    }

    #[test]
    fn field_order_does_not_matter() {
        let a = Record::new().with("x", 1).with("y", 2);
        let b = Record::new().with("y", 2).with("x", 1);
        let out = remove_duplicates(&[a.clone(), b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn values_of_different_types_are_distinct() {
        let input = vec![
            Record::new().with("v", 1),
            Record::new().with("v", "1"),
            Record::new().with("v", 1.0),
            Record::new().with("v", true),
            Record::new().with("v", Value::Null),
        ];
        assert_eq!(remove_duplicates(&input).len(), 5);
    }

    #[test]
    fn subset_records_are_not_duplicates() {
        let input = vec![
            Record::new().with("x", 1),
            Record::new().with("x", 1).with("y", Value::Null),
        ];
        assert_eq!(remove_duplicates(&input).len(), 2);
    }

    #[test]
    fn empty_records_collapse_to_one() {
        let out = remove_duplicates(&[Record::new(), Record::new()]);
        assert_eq!(out, vec![Record::new()]);
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            Record::new().with("x", 1),
            Record::new().with("x", 2),
            Record::new().with("x", 1),
        ];
        let once = remove_duplicates(&input);
        assert_eq!(remove_duplicates(&once), once);
    }
}
