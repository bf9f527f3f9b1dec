//! Record cleaning strategies.
//!
//! Every strategy borrows its input and returns a newly built [`Records`] sequence; the input is
//! never modified. Strategy names are parsed into the closed [`CleaningStrategy`] enum, and an
//! unknown name is an error ([`PipelineError::UnknownStrategy`]), unlike [`crate::transform`],
//! where unknown names fall back to identity.
//!
//! Currently implemented:
//!
//! - [`drop_nulls()`]: keep only records whose every value is present
//! - [`fill_nulls()`]: replace null-like values with `N/A`
//! - [`cast_types()`]: coerce digit text to integers and numeric text to floats
//! - [`standardize_case()`]: normalize keys to `snake_case` and text values to lower case
//! - [`remove_duplicates()`]: drop later copies of identical records
//!
//! ## Example
//!
//! ```rust
//! use record_pipeline::cleaning::{clean, clean_by_name, CleaningStrategy};
//! use record_pipeline::types::{Record, Value};
//!
//! let records = vec![
//!     Record::new().with("id", "1").with("name", "Ada"),
//!     Record::new().with("id", "2").with("name", Value::Null),
//! ];
//!
//! let kept = clean(&records, CleaningStrategy::DropNulls);
//! assert_eq!(kept.len(), 1);
//!
//! assert!(clean_by_name(&records, "bogus").is_err());
//! ```

pub mod case;
pub mod cast;
pub mod dedup;
pub mod nulls;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Record, Records};

pub use case::standardize_case;
pub use cast::cast_types;
pub use dedup::remove_duplicates;
pub use nulls::{drop_nulls, fill_nulls, FILL_VALUE};

/// Built-in cleaning strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum CleaningStrategy {
    /// `drop_nulls`
    DropNulls,
    /// `fill_nulls`
    FillNulls,
    /// `cast_types`
    CastTypes,
    /// `standardize_case`
    StandardizeCase,
    /// `remove_duplicates`
    RemoveDuplicates,
}

impl CleaningStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [CleaningStrategy; 5] = [
        CleaningStrategy::DropNulls,
        CleaningStrategy::FillNulls,
        CleaningStrategy::CastTypes,
        CleaningStrategy::StandardizeCase,
        CleaningStrategy::RemoveDuplicates,
    ];

    /// The identifier used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CleaningStrategy::DropNulls => "drop_nulls",
            CleaningStrategy::FillNulls => "fill_nulls",
            CleaningStrategy::CastTypes => "cast_types",
            CleaningStrategy::StandardizeCase => "standardize_case",
            CleaningStrategy::RemoveDuplicates => "remove_duplicates",
        }
    }
}

impl fmt::Display for CleaningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CleaningStrategy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| PipelineError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for CleaningStrategy {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Apply one cleaning strategy, producing a new record sequence.
pub fn clean(records: &[Record], strategy: CleaningStrategy) -> Records {
    match strategy {
        CleaningStrategy::DropNulls => drop_nulls(records),
        CleaningStrategy::FillNulls => fill_nulls(records),
        CleaningStrategy::CastTypes => cast_types(records),
        CleaningStrategy::StandardizeCase => standardize_case(records),
        CleaningStrategy::RemoveDuplicates => remove_duplicates(records),
    }
}

/// Apply a cleaning strategy selected by name.
///
/// Fails with [`PipelineError::UnknownStrategy`] if `name` is not a known strategy.
pub fn clean_by_name(records: &[Record], name: &str) -> PipelineResult<Records> {
    let strategy: CleaningStrategy = name.parse()?;
    Ok(clean(records, strategy))
}
