//! Console sink.

use std::io::{self, Write};

use crate::error::PipelineResult;
use crate::types::Record;

/// Write one compact JSON object per line.
pub fn write_console<W: Write>(records: &[Record], mut out: W) -> PipelineResult<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// [`write_console`] to standard output.
pub fn print_records(records: &[Record]) -> PipelineResult<()> {
    let stdout = io::stdout();
    write_console(records, stdout.lock())
}
