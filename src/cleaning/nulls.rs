//! Null handling: `drop_nulls` and `fill_nulls`.

use crate::stats::is_null_like;
use crate::types::{Record, Records, Value};

/// Sentinel text written by [`fill_nulls`].
pub const FILL_VALUE: &str = "N/A";

/// Keep a record only if none of its values is null-like.
///
/// A record with no fields passes.
pub fn drop_nulls(records: &[Record]) -> Records {
    records
        .iter()
        .filter(|record| !record.values().any(is_null_like))
        .cloned()
        .collect()
}

/// Replace every null-like value with [`FILL_VALUE`], keeping the field set and order.
pub fn fill_nulls(records: &[Record]) -> Records {
    records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(k, v)| {
                    let v = if is_null_like(v) {
                        Value::Utf8(FILL_VALUE.to_string())
                    } else {
                        v.clone()
                    };
                    (k, v)
                })
                .collect::<Record>()
        })
        .collect()
}
