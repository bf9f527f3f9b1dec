//! Structured-file sink: pretty-printed JSON array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::PipelineResult;
use crate::types::Record;

/// Write records to `path` as a JSON array indented by four spaces.
///
/// Unlike the tabular sinks, an empty sequence still writes `[]`.
pub fn write_json_to_path(records: &[Record], path: impl AsRef<Path>) -> PipelineResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_json_to_writer(records, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write records to any writer as a JSON array indented by four spaces.
pub fn write_json_to_writer<W: Write>(records: &[Record], out: W) -> PipelineResult<()> {
    let mut ser = serde_json::Serializer::with_formatter(out, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    Ok(())
}
