//! Type coercion: `cast_types`.

use crate::stats::coerce_f64;
use crate::types::{Record, Records, Value};

/// Coerce every value toward a numeric type.
///
/// - text made only of ASCII digits `0`-`9` becomes [`Value::Int64`] (when it fits); other
///   Unicode decimal digits (Arabic-Indic, full-width, ...) are not recognized and stay text
/// - anything else that [`coerce_f64`] accepts becomes [`Value::Float64`], including integers
///   and booleans
/// - values that cannot be coerced are kept unchanged
pub fn cast_types(records: &[Record]) -> Records {
    records
        .iter()
        .map(|record| record.iter().map(|(k, v)| (k, cast_value(v))).collect::<Record>())
        .collect()
}

fn cast_value(value: &Value) -> Value {
    if let Value::Utf8(s) = value {
        if is_digits(s) {
            if let Ok(n) = s.parse::<i64>() {
                return Value::Int64(n);
            }
        }
    }
    match coerce_f64(value) {
        Some(f) => Value::Float64(f),
        None => value.clone(),
    }
}

/// ASCII `0`-`9` only.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
