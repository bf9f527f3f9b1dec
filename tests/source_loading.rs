use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;
use rusqlite::Connection;
use zip::write::SimpleFileOptions;

use record_pipeline::source::{load, load_by_name, SourceKind};
use record_pipeline::types::Value;
use record_pipeline::PipelineError;

fn spawn_one_shot_http(status_line: &str, payload: &[u8]) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status_line = status_line.to_string();
    let payload = payload.to_vec();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request_buf = [0u8; 1024];
        let _ = stream.read(&mut request_buf);
        let headers = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            payload.len()
        );
        stream.write_all(headers.as_bytes()).unwrap();
        stream.write_all(&payload).unwrap();
        let _ = stream.flush();
    });
    (format!("http://{addr}/records"), handle)
}

#[test]
fn csv_fixture_loads_as_raw_text() {
    let out = load(SourceKind::Csv, "tests/fixtures/records.csv").unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(
        out[0].keys().collect::<Vec<_>>(),
        vec!["Name", "Category", "value", "timestamp"]
    );
    assert_eq!(out[0].get("Category"), Some(&Value::from(" Books ")));
    assert_eq!(out[0].get("value"), Some(&Value::from("10")));
    assert_eq!(out[2].get("Category"), Some(&Value::from("")));
}

#[test]
fn json_fixture_keeps_scalar_types() {
    let out = load(SourceKind::Json, "tests/fixtures/records.json").unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].get("id"), Some(&Value::Int64(1)));
    assert_eq!(out[0].get("value"), Some(&Value::Float64(10.5)));
    assert_eq!(out[0].get("active"), Some(&Value::Bool(true)));
    assert_eq!(out[1].get("name"), Some(&Value::Null));
    assert_eq!(out[1].get("value"), Some(&Value::from("12")));
    assert_eq!(out[2].get("tags"), Some(&Value::from("[\"a\",\"b\"]")));
    assert!(out[1].get("tags").is_none());
}

#[test]
fn ndjson_fixture_skips_blank_lines() {
    let out = load_by_name("ndjson", "tests/fixtures/records.ndjson").unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].get("category"), Some(&Value::from("b")));
}

#[test]
fn sqlite_source_reads_raw_data_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE raw_data (id INTEGER, category TEXT, value REAL);
         INSERT INTO raw_data VALUES (1, 'a', 1.5);
         INSERT INTO raw_data VALUES (2, NULL, NULL);",
    )
    .unwrap();
    drop(conn);

    let out = load(SourceKind::Sqlite, path.to_str().unwrap()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].get("id"), Some(&Value::Int64(1)));
    assert_eq!(out[0].get("value"), Some(&Value::Float64(1.5)));
    assert_eq!(out[1].get("category"), Some(&Value::Null));
}

#[test]
fn sqlite_source_without_table_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE other (x INTEGER);")
        .unwrap();

    let err = load(SourceKind::Sqlite, path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, PipelineError::Sqlite(_)));
}

#[test]
fn missing_sqlite_file_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.db");
    assert!(load(SourceKind::Sqlite, path.to_str().unwrap()).is_err());
    assert!(!path.exists());
}

#[test]
fn zip_source_concatenates_csv_members() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.zip");
    {
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("part1.csv", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"id,category\n1,a\n").unwrap();
        zip.start_file("notes.md", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"# notes").unwrap();
        zip.start_file("part2.csv", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"id,category\n2,b\n3,a\n").unwrap();
        zip.finish().unwrap();
    }

    let out = load(SourceKind::ZipCsv, path.to_str().unwrap()).unwrap();
    let ids: Vec<_> = out.iter().filter_map(|r| r.get("id").cloned()).collect();
    assert_eq!(ids, vec![Value::from("1"), Value::from("2"), Value::from("3")]);
}

#[test]
fn api_source_parses_json_body() {
    let (url, handle) = spawn_one_shot_http(
        "200 OK",
        br#"[{"id": 1, "category": "a"}, {"id": 2, "category": null}]"#,
    );
    let out = load(SourceKind::Api, &url).unwrap();
    handle.join().unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].get("category"), Some(&Value::from("a")));
    assert_eq!(out[1].get("category"), Some(&Value::Null));
}

#[test]
fn api_source_reports_non_200_status() {
    let (url, handle) = spawn_one_shot_http("500 Internal Server Error", b"{\"error\":\"boom\"}");
    let err = load(SourceKind::Api, &url).unwrap_err();
    handle.join().unwrap();

    match err {
        PipelineError::RemoteStatus { status, url: failed } => {
            assert_eq!(status, 500);
            assert_eq!(failed, url);
        }
        other => panic!("expected RemoteStatus, got {other:?}"),
    }
}

#[test]
fn api_source_reports_unreachable_host() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = load(SourceKind::Api, &format!("http://{addr}/records")).unwrap_err();
    assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
}

fn write_parquet(path: &Path) {
    let schema = Arc::new(
        parse_message_type(
            r#"
            message schema {
              REQUIRED INT64 id;
              OPTIONAL BINARY name (UTF8);
              REQUIRED DOUBLE score;
              REQUIRED BOOLEAN active;
            }
            "#,
        )
        .unwrap(),
    );
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::Int64ColumnWriter(w) => {
                w.write_batch(&[1_i64, 2_i64], None, None).unwrap();
            }
            ColumnWriter::ByteArrayColumnWriter(w) => {
                w.write_batch(&[ByteArray::from("Ada")], Some(&[1, 0]), None)
                    .unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[98.5_f64, 87.25_f64], None, None).unwrap();
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[true, false], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_source_maps_primitive_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.parquet");
    write_parquet(&path);

    let out = load(SourceKind::Parquet, path.to_str().unwrap()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(
        out[0].keys().collect::<Vec<_>>(),
        vec!["id", "name", "score", "active"]
    );
    assert_eq!(out[0].get("id"), Some(&Value::Int64(1)));
    assert_eq!(out[0].get("name"), Some(&Value::from("Ada")));
    assert_eq!(out[1].get("name"), Some(&Value::Null));
    assert_eq!(out[1].get("score"), Some(&Value::Float64(87.25)));
    assert_eq!(out[1].get("active"), Some(&Value::Bool(false)));
}

#[test]
fn missing_file_is_an_error_for_file_sources() {
    for kind in [SourceKind::Csv, SourceKind::Json, SourceKind::ZipCsv, SourceKind::Parquet] {
        assert!(
            load(kind, "tests/fixtures/does_not_exist").is_err(),
            "{kind} accepted a missing file"
        );
    }
}

#[test]
fn unsupported_kind_is_rejected() {
    let err = load_by_name("excel", "tests/fixtures/records.csv").unwrap_err();
    assert_eq!(err.to_string(), "unsupported source kind: excel");
}
