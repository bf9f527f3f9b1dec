//! Numeric helpers shared by cleaning and transformation strategies.

use crate::types::Value;

/// Text that counts as "missing" alongside [`Value::Null`] and empty text.
pub const NULL_TEXT: &str = "null";

/// Whether a value counts as missing data: null, empty text, or the literal text `"null"`.
pub fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Utf8(s) => s.is_empty() || s == NULL_TEXT,
        _ => false,
    }
}

/// Lossy coercion to `f64`.
///
/// - integers and floats convert directly
/// - booleans become `1.0` / `0.0`
/// - text is parsed after trimming surrounding whitespace
/// - null, and text that does not parse, yield `None`
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Int64(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
        Value::Utf8(s) => s.trim().parse::<f64>().ok(),
    }
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor `N`, not `N - 1`). `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let sq_diff: f64 = values.iter().map(|x| (x - avg).powi(2)).sum();
    Some((sq_diff / values.len() as f64).sqrt())
}

/// Count, mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// `mean + k * std_dev`.
    pub fn upper_bound(&self, k: f64) -> f64 {
        self.mean + k * self.std_dev
    }
}

/// Summarize a sample. `None` if there are no observations.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    Some(Summary {
        count: values.len(),
        mean: mean(values)?,
        std_dev: population_std_dev(values)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{coerce_f64, is_null_like, mean, population_std_dev, summarize};
    use crate::types::Value;

    #[test]
    fn null_like_values() {
        assert!(is_null_like(&Value::Null));
        assert!(is_null_like(&Value::Utf8(String::new())));
        assert!(is_null_like(&Value::Utf8("null".to_string())));
        assert!(!is_null_like(&Value::Utf8("NULL".to_string())));
        assert!(!is_null_like(&Value::Utf8(" ".to_string())));
        assert!(!is_null_like(&Value::Int64(0)));
        assert!(!is_null_like(&Value::Bool(false)));
    }

    #[test]
    fn coerce_f64_handles_each_variant() {
        assert_eq!(coerce_f64(&Value::Int64(3)), Some(3.0));
        assert_eq!(coerce_f64(&Value::Float64(2.5)), Some(2.5));
        assert_eq!(coerce_f64(&Value::Bool(true)), Some(1.0));
        assert_eq!(coerce_f64(&Value::Utf8(" 4.5 ".to_string())), Some(4.5));
        assert_eq!(coerce_f64(&Value::Utf8("1e3".to_string())), Some(1000.0));
        assert_eq!(coerce_f64(&Value::Utf8("abc".to_string())), None);
        assert_eq!(coerce_f64(&Value::Utf8(String::new())), None);
        assert_eq!(coerce_f64(&Value::Null), None);
    }

    #[test]
    fn mean_and_std_dev_use_population_formula() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), Some(5.0));
        assert_eq!(population_std_dev(&xs), Some(2.0));
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn single_observation_has_zero_spread() {
        let s = summarize(&[7.5]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.5);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.upper_bound(2.0), 7.5);
    }
}
