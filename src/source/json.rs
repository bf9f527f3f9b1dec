//! Structured-file source: JSON.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object, read as one record
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Scalars map onto [`Value`] directly; nested arrays and objects are kept as compact JSON text.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{Record, Records, Value};

/// Load a JSON file into records.
pub fn load_json_from_path(path: impl AsRef<Path>) -> PipelineResult<Records> {
    let text = fs::read_to_string(path)?;
    load_json_from_str(&text)
}

/// Load records from an in-memory JSON string.
pub fn load_json_from_str(input: &str) -> PipelineResult<Records> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => json_values_to_records(items),
            serde_json::Value::Object(_) => json_values_to_records(vec![v]),
            _ => Err(PipelineError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                PipelineError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        json_values_to_records(values)
    }
}

fn json_values_to_records(values: Vec<serde_json::Value>) -> PipelineResult<Records> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx0, v)| match v {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect::<Record>()),
            _ => Err(PipelineError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            }),
        })
        .collect()
}
