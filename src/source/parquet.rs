//! Columnar-file source: Apache Parquet.

use std::path::Path;

use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::PipelineResult;
use crate::types::{Record, Records, Value};

/// Load every row of a Parquet file into records.
///
/// Uses the Parquet record API (`RowIter`). Primitive columns map onto [`Value`]; every other
/// column type (dates, decimals, nested groups, ...) is kept as its display text.
pub fn load_parquet_from_path(path: impl AsRef<Path>) -> PipelineResult<Records> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let mut records = Vec::new();
    for row in reader.into_iter() {
        let row = row?;
        let record: Record = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), convert_parquet_field(field)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn convert_parquet_field(f: &Field) -> Value {
    match f {
        Field::Null => Value::Null,
        Field::Bool(b) => Value::Bool(*b),
        Field::Byte(v) => Value::Int64(i64::from(*v)),
        Field::Short(v) => Value::Int64(i64::from(*v)),
        Field::Int(v) => Value::Int64(i64::from(*v)),
        Field::Long(v) => Value::Int64(*v),
        Field::UByte(v) => Value::Int64(i64::from(*v)),
        Field::UShort(v) => Value::Int64(i64::from(*v)),
        Field::UInt(v) => Value::Int64(i64::from(*v)),
        Field::ULong(v) => match i64::try_from(*v) {
            Ok(n) => Value::Int64(n),
            Err(_) => Value::Float64(*v as f64),
        },
        Field::Float(v) => Value::Float64(f64::from(*v)),
        Field::Double(v) => Value::Float64(*v),
        Field::Str(s) => Value::Utf8(s.clone()),
        other => Value::Utf8(other.to_string()),
    }
}
