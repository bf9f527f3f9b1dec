//! Embedded-table sink: a SQLite `results` table.

use std::path::Path;

use rusqlite::{params_from_iter, Connection};

use crate::error::PipelineResult;
use crate::source::sqlite::quote_ident;
use crate::stats::NULL_TEXT;
use crate::types::{Record, Value};

use super::csv::header_of;

/// Table written by [`write_sqlite_to_path`].
pub const RESULTS_TABLE: &str = "results";

/// Append records to the [`RESULTS_TABLE`] table of the database at `path`.
///
/// An empty sequence is a no-op and does not create the database.
pub fn write_sqlite_to_path(records: &[Record], path: impl AsRef<Path>) -> PipelineResult<()> {
    if header_of(records)?.is_none() {
        return Ok(());
    }
    let mut conn = Connection::open(path)?;
    write_sqlite_to_connection(&mut conn, records, RESULTS_TABLE)
}

/// Append records to `table`, creating it if needed.
///
/// Columns are the first record's field names, all declared `TEXT`. Every value is stored as
/// text ([`Value::to_text`]), so the original types are not preserved; a null value is stored
/// as the text `null`. A column the record has no field for is left SQL `NULL`.
/// Column/record mismatches follow the CSV sink rules.
pub fn write_sqlite_to_connection(
    conn: &mut Connection,
    records: &[Record],
    table: &str,
) -> PipelineResult<()> {
    let Some(columns) = header_of(records)? else {
        return Ok(());
    };

    let table = quote_ident(table);
    let quoted: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let column_defs = quoted
        .iter()
        .map(|c| format!("{c} TEXT"))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    let tx = conn.transaction()?;
    tx.execute(&format!("CREATE TABLE IF NOT EXISTS {table} ({column_defs})"), [])?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            quoted.join(", ")
        ))?;
        for record in records {
            let row: Vec<Option<String>> = columns
                .iter()
                .map(|name| record.get(name).map(cell_text))
                .collect();
            stmt.execute(params_from_iter(row))?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn cell_text(value: &Value) -> String {
    value.to_text().unwrap_or_else(|| NULL_TEXT.to_string())
}
