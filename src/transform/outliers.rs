//! Outlier flagging: `flag_outliers`.

use crate::stats::{coerce_f64, is_null_like, summarize};
use crate::types::{Record, Records, Value};

/// Numeric field inspected for outliers.
pub const VALUE_FIELD: &str = "value";

/// Boolean field added to every output record.
pub const OUTLIER_FIELD: &str = "is_outlier";

/// Number of population standard deviations above the mean that marks an outlier.
pub const OUTLIER_STD_DEVS: f64 = 2.0;

/// Copy every record with an added `is_outlier` flag.
///
/// The baseline is the population mean and standard deviation of every usable `value` (present,
/// not null-like, and coercible to a number). A record is an outlier iff its own usable `value`
/// is strictly greater than `mean + 2 * std_dev`.
///
/// Records without a usable `value` are flagged `false`. If no record has a usable `value` there
/// is no baseline and every record is flagged `false`.
pub fn flag_outliers(records: &[Record]) -> Records {
    let values: Vec<f64> = records.iter().filter_map(usable_value).collect();
    let threshold = summarize(&values).map(|s| s.upper_bound(OUTLIER_STD_DEVS));

    records
        .iter()
        .map(|record| {
            let is_outlier = match (threshold, usable_value(record)) {
                (Some(limit), Some(v)) => v > limit,
                _ => false,
            };
            let mut out = record.clone();
            out.insert(OUTLIER_FIELD, Value::Bool(is_outlier));
            out
        })
        .collect()
}

fn usable_value(record: &Record) -> Option<f64> {
    let v = record.get(VALUE_FIELD)?;
    if is_null_like(v) {
        return None;
    }
    coerce_f64(v)
}

#[cfg(test)]
mod tests {
    use super::flag_outliers;
    use crate::types::{Record, Value};

    fn flags(records: &[Record]) -> Vec<bool> {
        flag_outliers(records)
            .iter()
            .map(|r| match r.get("is_outlier") {
                Some(Value::Bool(b)) => *b,
                other => panic!("missing is_outlier flag: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn one_far_value_is_flagged() {
        let mut records: Vec<Record> = (0..10).map(|_| Record::new().with("value", 10)).collect();
        records.push(Record::new().with("value", 1000));
        let out = flags(&records);
        assert_eq!(out.iter().filter(|f| **f).count(), 1);
        assert!(out[10]);
    }

    #[test]
    fn unusable_values_are_not_flagged_and_do_not_fail() {
        let records = vec![
            Record::new().with("value", 1),
            Record::new().with("value", "abc"),
            Record::new().with("value", Value::Null),
            Record::new().with("value", ""),
            Record::new().with("other", 5),
        ];
        assert_eq!(flags(&records), vec![false; 5]);
    }

    #[test]
    fn numeric_text_participates_in_baseline() {
        let mut records: Vec<Record> = (0..10).map(|_| Record::new().with("value", "1.0")).collect();
        records.push(Record::new().with("value", " 500 "));
        assert!(flags(&records)[10]);
    }

    #[test]
    fn no_usable_values_flags_everything_false() {
        let records = vec![
            Record::new().with("value", "n/a"),
            Record::new().with("name", "x"),
            Record::new(),
        ];
        let out = flag_outliers(&records);
        assert_eq!(out.len(), 3);
        for r in &out {
            assert_eq!(r.get("is_outlier"), Some(&Value::Bool(false)));
        }
    }

    #[test]
    fn existing_fields_are_kept_and_flag_is_overwritten() {
        let records = vec![Record::new().with("value", 1).with("is_outlier", "stale").with("k", "v")];
        let out = flag_outliers(&records);
        assert_eq!(out[0].keys().collect::<Vec<_>>(), vec!["value", "is_outlier", "k"]);
        assert_eq!(out[0].get("is_outlier"), Some(&Value::Bool(false)));
    }
}
