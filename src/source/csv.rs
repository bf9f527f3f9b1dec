//! Tabular-file source: CSV with a header row.

use std::io::Read;
use std::path::Path;

use crate::error::PipelineResult;
use crate::types::{Record, Records, Value};

/// Load a CSV file into records.
///
/// Rules:
///
/// - the first row is the header and supplies field names
/// - every cell is kept as raw text ([`Value::Utf8`]), untrimmed, empty cells included
/// - a row shorter than the header gets [`Value::Null`] for its missing columns
/// - cells beyond the header width are ignored
pub fn load_csv_from_path(path: impl AsRef<Path>) -> PipelineResult<Records> {
    let mut rdr = reader_builder().from_path(path)?;
    load_csv_records(&mut rdr)
}

/// Load CSV data from any reader (e.g. an archive entry or an in-memory buffer).
pub fn load_csv_from_reader<R: Read>(input: R) -> PipelineResult<Records> {
    let mut rdr = reader_builder().from_reader(input);
    load_csv_records(&mut rdr)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn load_csv_records<R: Read>(rdr: &mut csv::Reader<R>) -> PipelineResult<Records> {
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = row
                    .get(idx)
                    .map(|cell| Value::Utf8(cell.to_string()))
                    .unwrap_or(Value::Null);
                (name, value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}
