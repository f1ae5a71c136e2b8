//! File access for both input paths: raw benchmark log text and CSV rows.

use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::types::TabularRecord;

/// Buffer size for reading input files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Read a whole benchmark log into memory.
pub fn read_log_file(path: &Path) -> anyhow::Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open benchmark log {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read benchmark log {}", path.display()))?;
    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Load tabular benchmark rows from a CSV file with a header row.
pub fn load_tabular(path: &Path) -> anyhow::Result<Vec<TabularRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open benchmark table {}", path.display()))?;
    parse_tabular(BufReader::with_capacity(BUFFER_SIZE, file))
        .with_context(|| format!("Failed to parse benchmark table {}", path.display()))
}

/// Parse CSV rows carrying `number_of_characters` and `duration_seconds` columns.
///
/// Columns are matched by header name, so their order is free and extra columns are ignored.
pub fn parse_tabular<R: Read>(reader: R) -> anyhow::Result<Vec<TabularRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<TabularRecord>().enumerate() {
        let record = row.with_context(|| format!("Invalid row {}", index + 1))?;
        if !record.duration_seconds.is_finite() || record.duration_seconds < 0.0 {
            anyhow::bail!("Row {} has an invalid duration: {}", index + 1, record.duration_seconds);
        }
        records.push(record);
    }

    Ok(records)
}
