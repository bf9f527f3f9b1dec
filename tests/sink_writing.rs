use rusqlite::Connection;

use record_pipeline::sink::console::write_console;
use record_pipeline::sink::{write, write_by_name, SinkFormat};
use record_pipeline::source::{load, SourceKind};
use record_pipeline::types::{Record, Value};
use record_pipeline::PipelineError;

fn counts() -> Vec<Record> {
    vec![
        Record::new().with("category", "a").with("count", 2_i64).with("share", 0.5),
        Record::new().with("category", Value::Null).with("count", 1_i64).with("share", 0.25),
    ]
}

#[test]
fn csv_file_reads_back_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write(&counts(), SinkFormat::Csv, Some(&path)).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "category,count,share\na,2,0.5\n,1,0.25\n"
    );
    let back = load(SourceKind::Csv, path.to_str().unwrap()).unwrap();
    assert_eq!(back[0].get("count"), Some(&Value::from("2")));
    assert_eq!(back[1].get("category"), Some(&Value::from("")));
}

#[test]
fn json_file_reads_back_with_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    write(&counts(), SinkFormat::Json, Some(&path)).unwrap();

    let back = load(SourceKind::Json, path.to_str().unwrap()).unwrap();
    assert_eq!(back, counts());
}

#[test]
fn json_sink_writes_an_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    write(&[], SinkFormat::Json, Some(&path)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn sqlite_file_gets_a_results_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.db");
    write_by_name(&counts(), "sqlite", Some(&path)).unwrap();

    let conn = Connection::open(&path).unwrap();
    let rows: Vec<(Option<String>, String)> = conn
        .prepare("SELECT category, count FROM results ORDER BY rowid")
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![(Some("a".to_string()), "2".to_string()), (Some("null".to_string()), "1".to_string())]
    );
}

#[test]
fn empty_input_creates_no_tabular_files() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("none.csv");
    let db_path = dir.path().join("none.db");
    write(&[], SinkFormat::Csv, Some(&csv_path)).unwrap();
    write(&[], SinkFormat::Sqlite, Some(&db_path)).unwrap();
    assert!(!csv_path.exists());
    assert!(!db_path.exists());
}

#[test]
fn record_with_unknown_column_is_a_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        Record::new().with("a", 1),
        Record::new().with("a", 2).with("b", 3),
    ];
    for format in [SinkFormat::Csv, SinkFormat::Sqlite] {
        let path = dir.path().join(format!("bad.{format}"));
        let err = write(&records, format, Some(&path)).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch { .. }), "{format}: {err}");
        assert!(!path.exists(), "{format} created {}", path.display());
    }
}

#[test]
fn console_sink_writes_one_json_object_per_line() {
    let mut buf = Vec::new();
    write_console(&counts(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"category":"a","count":2,"share":0.5}"#,
            r#"{"category":null,"count":1,"share":0.25}"#,
        ]
    );
}

#[test]
fn unsupported_format_is_rejected() {
    let err = write_by_name(&counts(), "xlsx", None).unwrap_err();
    assert_eq!(err.to_string(), "unsupported output format: xlsx");
}
