//! Unified source entrypoint.
//!
//! Most callers should use [`load`], which dispatches on a [`SourceKind`] and a locator (a file
//! path or, for [`SourceKind::Api`], a URL).

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Records;

use super::{archive, csv, json, parquet, remote, sqlite};

/// Supported source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SourceKind {
    /// Tabular file: CSV with a header row.
    Csv,
    /// Structured file: JSON array-of-objects or NDJSON.
    Json,
    /// Embedded table: the `raw_data` table of a SQLite database.
    Sqlite,
    /// Archived tabular: every `.csv` inside a zip archive.
    ZipCsv,
    /// Remote JSON endpoint fetched over HTTP.
    Api,
    /// Columnar file: Apache Parquet.
    Parquet,
}

impl SourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Csv,
        SourceKind::Json,
        SourceKind::Sqlite,
        SourceKind::ZipCsv,
        SourceKind::Api,
        SourceKind::Parquet,
    ];

    /// Canonical name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Json => "json",
            SourceKind::Sqlite => "sqlite",
            SourceKind::ZipCsv => "zip_csv",
            SourceKind::Api => "api",
            SourceKind::Parquet => "parquet",
        }
    }

    /// Parse a kind name or one of its aliases (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" | "tabular" => Some(Self::Csv),
            "json" | "ndjson" | "structured" => Some(Self::Json),
            "sqlite" | "db" | "embedded_table" => Some(Self::Sqlite),
            "zip_csv" | "zip" | "archived_tabular" => Some(Self::ZipCsv),
            "api" | "http" | "remote_json" => Some(Self::Api),
            "parquet" | "pq" | "columnar" => Some(Self::Parquet),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PipelineError::UnsupportedSourceKind {
            kind: s.to_string(),
        })
    }
}

impl TryFrom<String> for SourceKind {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Load a record sequence from `locator` using the adapter for `kind`.
///
/// # Examples
///
/// ```no_run
/// use record_pipeline::source::{load, SourceKind};
///
/// # fn main() -> Result<(), record_pipeline::PipelineError> {
/// let records = load(SourceKind::Csv, "input/test.csv")?;
/// println!("records={}", records.len());
///
/// let remote = load(SourceKind::Api, "https://example.com/records.json")?;
/// println!("records={}", remote.len());
/// # Ok(())
/// # }
/// ```
pub fn load(kind: SourceKind, locator: &str) -> PipelineResult<Records> {
    debug!("loading {kind} source from {locator}");
    let records = match kind {
        SourceKind::Csv => csv::load_csv_from_path(locator),
        SourceKind::Json => json::load_json_from_path(locator),
        SourceKind::Sqlite => sqlite::load_sqlite_from_path(locator),
        SourceKind::ZipCsv => archive::load_zip_csv_from_path(locator),
        SourceKind::Api => remote::load_remote_json(locator),
        SourceKind::Parquet => parquet::load_parquet_from_path(locator),
    }?;
    debug!("loaded {} records from {locator}", records.len());
    Ok(records)
}

/// [`load`] with the kind given by name.
///
/// Fails with [`PipelineError::UnsupportedSourceKind`] for an unknown kind.
pub fn load_by_name(kind: &str, locator: &str) -> PipelineResult<Records> {
    load(kind.parse()?, locator)
}
