//! Key/text normalization: `standardize_case`.

use crate::types::{Record, Records, Value};

/// Normalize keys and text values.
///
/// Keys are trimmed, lower-cased and have spaces replaced by `_`. Text values are trimmed and
/// lower-cased; other values are unchanged.
///
/// When two keys of one record normalize to the same name, fields are applied in the record's
/// field order: the later field's value wins, and the key keeps the position of the earlier one.
pub fn standardize_case(records: &[Record]) -> Records {
    records.iter().map(standardize_record).collect()
}

fn standardize_record(record: &Record) -> Record {
    let mut out = Record::new();
    for (k, v) in record.iter() {
        out.insert(standardize_key(k), standardize_value(v));
    }
    out
}

fn standardize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

fn standardize_value(value: &Value) -> Value {
    match value {
        Value::Utf8(s) => Value::Utf8(s.trim().to_lowercase()),
        other => other.clone(),
    }
}
