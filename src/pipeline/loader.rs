//! Dataset loader and cleaner for CSV, Parquet and Excel sources

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use serde::Serialize;

use super::category::{normalize_education, EducationCategory, UNKNOWN_LABEL};
use super::error::{PipelineError, PipelineResult};
use super::missing::{analyze_missing_values, MissingValue};

/// Column holding the year
pub const YEAR_COLUMN: &str = "tahun";
/// Column holding the raw education label
pub const EDUCATION_COLUMN: &str = "pendidikan";
/// Column holding the open-unemployment count
pub const COUNT_COLUMN: &str = "jumlah_pengangguran_terbuka";
/// Column added on export with the cleaned education category
pub const CLEANED_EDUCATION_COLUMN: &str = "pendidikan_bersih";

/// One source row with its resolved education category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub year: Option<i32>,
    /// Education text after filling missing values with `UNKNOWN`
    pub education: String,
    pub category: EducationCategory,
    pub count: Option<f64>,
}

impl CleanedRecord {
    /// Build a record from raw fields, filling and normalizing the education label.
    ///
    /// A NaN or infinite count is treated as absent.
    pub fn new(year: Option<i32>, raw_education: Option<&str>, count: Option<f64>) -> Self {
        let education = raw_education.unwrap_or(UNKNOWN_LABEL).to_string();
        let category = normalize_education(Some(&education));
        Self {
            year,
            education,
            category,
            count: count.filter(|c| c.is_finite()),
        }
    }
}

/// The full cleaned dataset for one snapshot of the source.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub source: PathBuf,
    /// Hex blake3 digest of the source bytes
    pub fingerprint: String,
    pub columns: Vec<String>,
    pub records: Vec<CleanedRecord>,
    /// Null counts per raw column, before any filling
    pub missing: Vec<MissingValue>,
}

impl CleanedDataset {
    /// Clean an already-read frame.
    pub fn from_dataframe(
        df: &DataFrame,
        source: impl Into<PathBuf>,
        fingerprint: impl Into<String>,
    ) -> PipelineResult<Self> {
        let missing = analyze_missing_values(df);
        let records = clean_dataframe(df)?;
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(Self {
            source: source.into(),
            fingerprint: fingerprint.into(),
            columns,
            records,
            missing,
        })
    }

    /// Smallest and largest year present, ignoring rows without a year.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    pub fn has_missing(&self) -> bool {
        self.missing.iter().any(|m| m.null_count > 0)
    }
}

/// Read the raw source into a frame (CSV, Parquet or a spreadsheet based on extension).
///
/// # Arguments
/// * `path` - Source file path
/// * `infer_schema_length` - Rows used for CSV schema inference, 0 for a full scan
pub fn read_source(path: &Path, infer_schema_length: usize) -> PipelineResult<DataFrame> {
    if !path.is_file() {
        return Err(PipelineError::unavailable(path, "file not found"));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish(),
        "parquet" => LazyFrame::scan_parquet(path, Default::default()),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(read_workbook(path)?.lazy()),
        _ => {
            return Err(PipelineError::unavailable(
                path,
                format!(
                    "unsupported file format '{}'. Supported formats: csv, parquet, xlsx, xls, ods",
                    extension
                ),
            ))
        }
    };

    let df = lf
        .and_then(|lf| lf.collect())
        .map_err(|e| PipelineError::unavailable(path, e))?;

    log::info!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Validate required columns and turn every row into a [`CleanedRecord`].
///
/// No row is dropped. A missing education value is filled with `UNKNOWN`
/// before normalization. A non-text education column makes every row
/// `UNKNOWN`. Years and counts that cannot be cast become absent.
pub fn clean_dataframe(df: &DataFrame) -> PipelineResult<Vec<CleanedRecord>> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in [EDUCATION_COLUMN, YEAR_COLUMN, COUNT_COLUMN] {
        if !available.iter().any(|c| c == required) {
            return Err(PipelineError::SchemaError {
                column: required.to_string(),
                available,
            });
        }
    }

    let years = df.column(YEAR_COLUMN)?.cast(&DataType::Int32)?;
    let years = years.i32()?;
    let counts = df.column(COUNT_COLUMN)?.cast(&DataType::Float64)?;
    let counts = counts.f64()?;

    let education = df.column(EDUCATION_COLUMN)?;
    let is_text = matches!(
        education.dtype(),
        DataType::String | DataType::Null | DataType::Categorical(..) | DataType::Enum(..)
    );
    let education_text = education.cast(&DataType::String)?;
    let education_text = education_text.str()?;

    let mut records = Vec::with_capacity(df.height());
    for ((year, text), count) in years
        .into_iter()
        .zip(education_text.into_iter())
        .zip(counts.into_iter())
    {
        let record = if is_text {
            CleanedRecord::new(year, text, count)
        } else {
            CleanedRecord {
                year,
                education: text.unwrap_or(UNKNOWN_LABEL).to_string(),
                category: EducationCategory::Unknown,
                count: count.filter(|c| c.is_finite()),
            }
        };
        records.push(record);
    }

    let without_year = records.iter().filter(|r| r.year.is_none()).count();
    if without_year > 0 {
        log::warn!(
            "{} row(s) have no usable '{}' value and will never match a year filter",
            without_year,
            YEAR_COLUMN
        );
    }

    Ok(records)
}

/// Read the first worksheet of a spreadsheet into a frame.
///
/// The first row is the header. A column whose non-empty cells are all
/// numeric becomes `Float64`, anything else becomes text.
fn read_workbook(path: &Path) -> PipelineResult<DataFrame> {
    let mut workbook = open_workbook_auto(path).map_err(|e| PipelineError::unavailable(path, e))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PipelineError::unavailable(path, "workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| PipelineError::unavailable(path, e))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row
            .iter()
            .enumerate()
            .map(|(i, cell)| cell_text(cell).unwrap_or_else(|| format!("column_{}", i)))
            .collect(),
        None => return Err(PipelineError::unavailable(path, "worksheet is empty")),
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(i)).collect();
            sheet_column(name, &cells)
        })
        .collect();

    log::debug!("Read worksheet '{}' from {}", sheet, path.display());
    Ok(DataFrame::new(columns)?)
}

/// Build one typed column from worksheet cells
fn sheet_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let numeric = cells
        .iter()
        .flatten()
        .all(|cell| cell_number(cell).is_some() || cell_text(cell).is_none());

    if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|c| c.and_then(cell_number)).collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|c| c.and_then(cell_text)).collect();
        Column::new(name.into(), values)
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        _ => None,
    }
}

/// Cell as text; empty and error cells are absent
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
