//! Unified sink entrypoint.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Record;

use super::{console, csv, json, sqlite};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SinkFormat {
    /// Tabular file: CSV.
    Csv,
    /// Structured file: pretty JSON array.
    Json,
    /// Embedded table: SQLite `results` table.
    Sqlite,
    /// One JSON object per line on stdout.
    #[default]
    Console,
}

impl SinkFormat {
    /// Every format, in declaration order.
    pub const ALL: [SinkFormat; 4] = [
        SinkFormat::Csv,
        SinkFormat::Json,
        SinkFormat::Sqlite,
        SinkFormat::Console,
    ];

    /// Canonical name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SinkFormat::Csv => "csv",
            SinkFormat::Json => "json",
            SinkFormat::Sqlite => "sqlite",
            SinkFormat::Console => "print",
        }
    }

    /// Parse a format name or one of its aliases (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" | "tabular" => Some(Self::Csv),
            "json" | "structured" => Some(Self::Json),
            "sqlite" | "db" | "embedded_table" => Some(Self::Sqlite),
            "print" | "console" | "stdout" => Some(Self::Console),
            _ => None,
        }
    }

    /// Whether the format writes to a destination path.
    pub fn needs_destination(self) -> bool {
        !matches!(self, SinkFormat::Console)
    }
}

impl fmt::Display for SinkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SinkFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PipelineError::UnsupportedSinkFormat {
            format: s.to_string(),
        })
    }
}

impl TryFrom<String> for SinkFormat {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Write records using the adapter for `format`.
///
/// File formats without a `destination` write nothing (a warning is logged). The console format
/// ignores `destination`.
pub fn write(records: &[Record], format: SinkFormat, destination: Option<&Path>) -> PipelineResult<()> {
    let path = match (format.needs_destination(), destination) {
        (false, _) => return console::print_records(records),
        (true, None) => {
            warn!("no destination for {format} output; {} records not written", records.len());
            return Ok(());
        }
        (true, Some(path)) => path,
    };

    debug!("writing {} records as {format} to {}", records.len(), path.display());
    match format {
        SinkFormat::Csv => csv::write_csv_to_path(records, path),
        SinkFormat::Json => json::write_json_to_path(records, path),
        SinkFormat::Sqlite => sqlite::write_sqlite_to_path(records, path),
        SinkFormat::Console => console::print_records(records),
    }
}

/// [`write`] with the format given by name.
///
/// Fails with [`PipelineError::UnsupportedSinkFormat`] for an unknown format.
pub fn write_by_name(records: &[Record], format: &str, destination: Option<&Path>) -> PipelineResult<()> {
    write(records, format.parse()?, destination)
}
