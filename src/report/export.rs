//! Filtered-view CSV export and full view-model JSON export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::{
    CleanedDataset, CleanedRecord, EducationLevel, ViewModel, CLEANED_EDUCATION_COLUMN,
    COUNT_COLUMN, EDUCATION_COLUMN, YEAR_COLUMN,
};

/// Build a frame of the filtered records.
///
/// Columns: `tahun`, `pendidikan`, `pendidikan_bersih`, `jumlah_pengangguran_terbuka`.
pub fn filtered_to_dataframe(records: &[CleanedRecord]) -> PolarsResult<DataFrame> {
    let years: Vec<Option<i32>> = records.iter().map(|r| r.year).collect();
    let education: Vec<&str> = records.iter().map(|r| r.education.as_str()).collect();
    let cleaned: Vec<&str> = records.iter().map(|r| r.category.label()).collect();
    let counts: Vec<Option<f64>> = records.iter().map(|r| r.count).collect();

    DataFrame::new(vec![
        Column::new(YEAR_COLUMN.into(), years),
        Column::new(EDUCATION_COLUMN.into(), education),
        Column::new(CLEANED_EDUCATION_COLUMN.into(), cleaned),
        Column::new(COUNT_COLUMN.into(), counts),
    ])
}

/// Serialize the filtered records as CSV bytes
pub fn filtered_csv_bytes(records: &[CleanedRecord]) -> Result<Vec<u8>> {
    let mut df = filtered_to_dataframe(records).context("Failed to build filtered frame")?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(&mut df)
        .context("Failed to serialize filtered rows as CSV")?;
    Ok(buffer)
}

/// Write the filtered records to a CSV file
pub fn write_filtered_csv(records: &[CleanedRecord], output_path: &Path) -> Result<()> {
    let bytes = filtered_csv_bytes(records)?;
    std::fs::write(output_path, bytes)
        .with_context(|| format!("Failed to write CSV file: {}", output_path.display()))
}

/// Metadata about the exported render
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    pub edustat_version: String,
    pub input_file: String,
    /// blake3 digest of the source the view was rendered from
    pub fingerprint: String,
    pub year_min: i32,
    pub year_max: i32,
    pub levels: Vec<EducationLevel>,
}

/// Complete dashboard export
#[derive(Serialize)]
pub struct DashboardExport<'a> {
    pub metadata: ExportMetadata,
    pub view: &'a ViewModel,
}

impl<'a> DashboardExport<'a> {
    pub fn new(dataset: &CleanedDataset, view: &'a ViewModel) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                edustat_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: dataset.source.display().to_string(),
                fingerprint: dataset.fingerprint.clone(),
                year_min: view.params.year_min(),
                year_max: view.params.year_max(),
                levels: view.params.levels().to_vec(),
            },
            view,
        }
    }
}

/// Export the rendered view as pretty-printed JSON
pub fn export_view_json(dataset: &CleanedDataset, view: &ViewModel, output_path: &Path) -> Result<()> {
    let export = DashboardExport::new(dataset, view);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize view to JSON")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON file: {}", output_path.display()))
}
