//! Record transformation strategies.
//!
//! Transformations take ownership of their input sequence and return the output sequence, which
//! may have a different shape (e.g. one record per category). Unlike [`crate::cleaning`], an
//! unrecognized strategy name is not an error: [`TransformStrategy::from_name`] maps it to
//! [`TransformStrategy::Identity`], which returns the input untouched.
//!
//! Anomalies inside a strategy (unparseable dates, non-numeric values) never fail the call; they
//! are absorbed into documented fallback values.
//!
//! ## Example
//!
//! ```rust
//! use record_pipeline::transform::{transform, TransformStrategy};
//! use record_pipeline::types::{Record, Value};
//!
//! let records = vec![
//!     Record::new().with("category", "a"),
//!     Record::new().with("category", "b"),
//!     Record::new().with("category", "a"),
//! ];
//!
//! let out = transform(records, TransformStrategy::AggregateByCategory);
//! assert_eq!(out[0].get("count"), Some(&Value::Int64(2)));
//!
//! // Unknown names degrade to identity.
//! assert_eq!(TransformStrategy::from_name("bogus"), TransformStrategy::Identity);
//! ```

pub mod aggregate;
pub mod dates;
pub mod outliers;

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use crate::types::Records;

pub use aggregate::{aggregate_by_category, CATEGORY_FIELD, COUNT_FIELD, UNKNOWN_CATEGORY};
pub use dates::{filter_future_dates, DATE_FORMAT, TIMESTAMP_FIELD};
pub use outliers::{flag_outliers, OUTLIER_FIELD, OUTLIER_STD_DEVS, VALUE_FIELD};

/// Built-in transformation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum TransformStrategy {
    /// `filter_future_dates`
    FilterFutureDates,
    /// `flag_outliers`
    FlagOutliers,
    /// `aggregate_by_category`
    AggregateByCategory,
    /// `identity`: pass the input through unchanged.
    #[default]
    Identity,
}

impl TransformStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [TransformStrategy; 4] = [
        TransformStrategy::FilterFutureDates,
        TransformStrategy::FlagOutliers,
        TransformStrategy::AggregateByCategory,
        TransformStrategy::Identity,
    ];

    /// Resolve a strategy by name. Unknown names resolve to [`TransformStrategy::Identity`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == name)
            .unwrap_or(TransformStrategy::Identity)
    }

    /// The identifier used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            TransformStrategy::FilterFutureDates => "filter_future_dates",
            TransformStrategy::FlagOutliers => "flag_outliers",
            TransformStrategy::AggregateByCategory => "aggregate_by_category",
            TransformStrategy::Identity => "identity",
        }
    }
}

impl fmt::Display for TransformStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for TransformStrategy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for TransformStrategy {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Apply one transformation strategy, using the local clock for date filtering.
pub fn transform(records: Records, strategy: TransformStrategy) -> Records {
    transform_at(records, strategy, Local::now().naive_local())
}

/// Apply one transformation strategy with an explicit "now" for date filtering.
pub fn transform_at(records: Records, strategy: TransformStrategy, now: NaiveDateTime) -> Records {
    match strategy {
        TransformStrategy::FilterFutureDates => filter_future_dates(records, now),
        TransformStrategy::FlagOutliers => flag_outliers(&records),
        TransformStrategy::AggregateByCategory => aggregate_by_category(&records),
        TransformStrategy::Identity => records,
    }
}

/// Apply a transformation selected by name. Never fails.
pub fn transform_by_name(records: Records, name: &str) -> Records {
    transform(records, TransformStrategy::from_name(name))
}
