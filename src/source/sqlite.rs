//! Embedded-table source: a SQLite database file.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::error::PipelineResult;
use crate::types::{Record, Records, Value};

/// Table read by [`load_sqlite_from_path`].
pub const SOURCE_TABLE: &str = "raw_data";

/// Load every row of the [`SOURCE_TABLE`] table.
pub fn load_sqlite_from_path(path: impl AsRef<Path>) -> PipelineResult<Records> {
    load_sqlite_table(path, SOURCE_TABLE)
}

/// Load every row of `table` from the database at `path`.
///
/// The database is opened read-only; a missing file is an error rather than a new empty
/// database.
pub fn load_sqlite_table(path: impl AsRef<Path>, table: &str) -> PipelineResult<Records> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    load_sqlite_from_connection(&conn, table)
}

/// Load every row of `table` from an open connection.
///
/// Column types map as INTEGER → `Int64`, REAL → `Float64`, TEXT → `Utf8`, NULL → `Null`.
/// BLOBs are decoded as lossy UTF-8 text.
pub fn load_sqlite_from_connection(conn: &Connection, table: &str) -> PipelineResult<Records> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Record::new();
        for (idx, name) in columns.iter().enumerate() {
            let value = match row.get_ref(idx)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::Int64(v),
                ValueRef::Real(v) => Value::Float64(v),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Value::Utf8(String::from_utf8_lossy(bytes).into_owned())
                }
            };
            record.insert(name.as_str(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Quote a SQL identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{load_sqlite_from_connection, quote_ident};
    use crate::types::Value;
    use rusqlite::Connection;

    #[test]
    fn column_types_map_to_values() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE raw_data (id INTEGER, score REAL, name TEXT, note TEXT);
             INSERT INTO raw_data VALUES (1, 2.5, 'Ada', NULL);
             INSERT INTO raw_data VALUES (2, NULL, 'Grace', 'x');",
        )
        .unwrap();

        let out = load_sqlite_from_connection(&conn, "raw_data").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].keys().collect::<Vec<_>>(), vec!["id", "score", "name", "note"]);
        assert_eq!(out[0].get("id"), Some(&Value::Int64(1)));
        assert_eq!(out[0].get("score"), Some(&Value::Float64(2.5)));
        assert_eq!(out[0].get("name"), Some(&Value::from("Ada")));
        assert_eq!(out[0].get("note"), Some(&Value::Null));
        assert_eq!(out[1].get("score"), Some(&Value::Null));
    }

    #[test]
    fn missing_table_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(load_sqlite_from_connection(&conn, "raw_data").is_err());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("first name"), "\"first name\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
