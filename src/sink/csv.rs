//! Tabular-file sink: CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Record, Value};

/// Write records as CSV to `path`.
///
/// An empty sequence is a no-op: no file is created, since there is no header to write. Records
/// that do not fit the header are rejected before the file is created.
/// See [`write_csv_to_writer`] for the row rules.
pub fn write_csv_to_path(records: &[Record], path: impl AsRef<Path>) -> PipelineResult<()> {
    if header_of(records)?.is_none() {
        return Ok(());
    }
    let file = File::create(path)?;
    write_csv_to_writer(records, file)
}

/// Write records as CSV to any writer.
///
/// - the header is the first record's field names, in order
/// - each row lists that record's values under the header; missing fields are empty cells
/// - a record with a field that is not in the header is rejected before anything is written
///
/// Cell text follows [`Value::to_text`]; nulls are empty cells.
pub fn write_csv_to_writer<W: Write>(records: &[Record], out: W) -> PipelineResult<()> {
    let Some(header) = header_of(records)? else {
        return Ok(());
    };

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&header)?;
    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|name| record.get(name).and_then(Value::to_text).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Column names shared by the tabular sinks, validated against every record.
pub(crate) fn header_of(records: &[Record]) -> PipelineResult<Option<Vec<&str>>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let header: Vec<&str> = first.keys().collect();
    if header.is_empty() {
        return Err(PipelineError::SchemaMismatch {
            message: "first record has no fields; cannot derive columns".to_string(),
        });
    }

    for (idx0, record) in records.iter().enumerate() {
        if let Some(extra) = record.keys().find(|k| !header.contains(k)) {
            return Err(PipelineError::SchemaMismatch {
                message: format!(
                    "record {} has field '{extra}' not in columns {header:?}",
                    idx0 + 1
                ),
            });
        }
    }
    Ok(Some(header))
}
