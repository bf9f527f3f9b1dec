//! Archived-tabular source: CSV files inside a zip archive.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::debug;
use zip::ZipArchive;

use crate::error::PipelineResult;
use crate::types::Records;

use super::csv::load_csv_from_reader;

/// Load every `.csv` entry of a zip archive, concatenated in archive order.
///
/// Each entry is parsed with the CSV rules of [`super::csv`]; entries with other extensions and
/// directories are skipped.
pub fn load_zip_csv_from_path(path: impl AsRef<Path>) -> PipelineResult<Records> {
    let file = File::open(path)?;
    load_zip_csv_from_reader(file)
}

/// Load every `.csv` entry from an in-memory or on-disk zip archive.
pub fn load_zip_csv_from_reader<R: Read + Seek>(reader: R) -> PipelineResult<Records> {
    let mut archive = ZipArchive::new(reader)?;
    let mut records = Vec::new();

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if !(entry.is_file() && entry.name().ends_with(".csv")) {
            continue;
        }
        let name = entry.name().to_string();
        let mut entry_records = load_csv_from_reader(entry)?;
        debug!("zip entry {name}: {} records", entry_records.len());
        records.append(&mut entry_records);
    }

    Ok(records)
}
