//! Command-line argument definitions using clap

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{CleanedDataset, EducationLevel, FilterParams, CANONICAL_LEVELS};

/// EduStat - Explore open unemployment by education level
#[derive(Parser, Debug)]
#[command(name = "edustat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV, Parquet or xlsx/xls/ods) with columns
    /// tahun, pendidikan, jumlah_pengangguran_terbuka
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write the rendered view (pivots, statistics, trends) to a JSON file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the filtered rows to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Render once and exit instead of opening the interactive filter menu
    #[arg(long, default_value = "false")]
    pub no_interactive: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Year range and education-level selection shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First year to include. Defaults to the earliest year in the data.
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Last year to include. Defaults to the latest year in the data.
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Education levels to include (comma-separated), e.g. "SD KE BAWAH,SMA".
    /// Accepts labels or codes (SD_KE_BAWAH, SD, SMP, SMA, DIPLOMA_UNIV).
    /// Defaults to all five levels.
    #[arg(short = 'l', long, value_delimiter = ',', value_parser = parse_level)]
    pub levels: Option<Vec<EducationLevel>>,
}

impl FilterArgs {
    /// Resolve the arguments against the dataset's year bounds.
    ///
    /// A bound left unset follows the data, but never crosses the bound that
    /// was given, so `--year-min` past the data yields an empty view.
    pub fn resolve(&self, dataset: &CleanedDataset) -> Result<FilterParams> {
        let bounds = dataset.year_bounds();
        let year_min = match self.year_min {
            Some(year) => year,
            None => bounds
                .map(|(lo, _)| self.year_max.map_or(lo, |max| lo.min(max)))
                .context("The dataset has no years; pass --year-min explicitly")?,
        };
        let year_max = match self.year_max {
            Some(year) => year,
            None => bounds
                .map(|(_, hi)| hi.max(year_min))
                .context("The dataset has no years; pass --year-max explicitly")?,
        };
        let levels = self.levels.as_deref().unwrap_or(&CANONICAL_LEVELS[..]);

        Ok(FilterParams::new(year_min, year_max, levels)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the filtered rows of a dataset to CSV without opening the dashboard
    Export {
        /// Input file path (CSV, Parquet or xlsx/xls/ods)
        input: PathBuf,

        /// Output file path (optional, defaults to input with '_filtered.csv' suffix)
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Number of rows to use for schema inference (CSV only).
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }
}

/// Default path for a filtered export: next to the input with a '_filtered.csv' suffix.
pub fn default_export_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_filtered.csv", stem))
}

/// Default path for the JSON view export
pub fn default_json_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_dashboard.json", stem))
}

/// Value parser for a single education level
fn parse_level(s: &str) -> Result<EducationLevel, String> {
    s.parse()
}
