// src/process/mod.rs
pub mod convert;
pub mod header;
pub mod keys;
pub mod raw_table;
pub mod write;

use crate::{config::Config, error::ConvertError};
use convert::{transform_row, CellValue, DataRow};
use header::locate_header;
use raw_table::RawRecords;
use std::fs;
use tracing::{debug, info};

/// Rows in file order.
pub type WeatherDataset = Vec<DataRow>;

/// What one conversion run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSummary {
    pub metadata_lines: usize,
    pub rows: usize,
    /// Cleaned output keys, in header order.
    pub columns: Vec<String>,
    /// Number of header cells that were blank and therefore dropped.
    pub dropped_columns: usize,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
}

/// Parsed export plus the bookkeeping needed for a summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub dataset: WeatherDataset,
    pub summary: ConvertSummary,
}

/// Run locate → parse → transform on an in-memory export.
pub fn convert_str(text: &str, marker: &str) -> Result<Conversion, ConvertError> {
    let location = locate_header(text, marker)?;
    let records = RawRecords::new(location.table)?;

    let mut columns: Vec<String> = Vec::new();
    let mut dropped_columns = 0;
    for h in records.headers() {
        if h.trim().is_empty() {
            dropped_columns += 1;
            continue;
        }
        let key = keys::clean_key(h);
        if !columns.contains(&key) {
            columns.push(key);
        }
    }
    if dropped_columns > 0 {
        debug!(dropped_columns, "blank headers dropped");
    }

    let dataset = records
        .map(|r| r.map(transform_row))
        .collect::<Result<WeatherDataset, _>>()?;

    // the header row starts with the marker, so its first column is the timestamp
    let time_key = columns.first().cloned();
    let time_of = |row: Option<&DataRow>| {
        let key = time_key.as_deref()?;
        row.and_then(|r| r.get(key)).map(|v| match v {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        })
    };
    let summary = ConvertSummary {
        metadata_lines: location.skipped_lines,
        rows: dataset.len(),
        columns,
        dropped_columns,
        first_time: time_of(dataset.first()),
        last_time: time_of(dataset.last()),
    };

    Ok(Conversion { dataset, summary })
}

/// Read the configured export, clean it and write the JSON document.
///
/// Nothing is written unless the whole input converts.
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input_path.display()))]
pub fn convert_file(config: &Config) -> Result<ConvertSummary, ConvertError> {
    let bytes = fs::read(&config.input_path)
        .map_err(|e| ConvertError::InputNotFound(config.input_path.clone(), e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ConvertError::InputDecode(config.input_path.clone(), e))?;

    let Conversion { dataset, summary } = convert_str(&text, &config.header_marker)?;
    info!(
        metadata_lines = summary.metadata_lines,
        rows = summary.rows,
        columns = summary.columns.len(),
        "parsed weather export"
    );

    write::write_dataset(&config.output_path, &dataset, config.indent)?;
    info!(output = %config.output_path.display(), rows = summary.rows, "wrote clean JSON");
    Ok(summary)
}
