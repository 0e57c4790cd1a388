//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use edustat::pipeline::{CleanedDataset, CleanedRecord};

pub const HEADER: &str = "tahun,pendidikan,jumlah_pengangguran_terbuka";

/// Create a small unemployment table with raw source labels.
///
/// Three years (2011-2013) covering every canonical level:
/// - `SD KE BAWAH` fed by two raw labels per year
/// - `SMA` fed by "SMA Umum" and "SMA Kejuruan"
/// - `DIPLOMA/UNIV` fed by "Diploma I/II/III/Akademi" and "Universitas"
pub fn create_unemployment_dataframe() -> DataFrame {
    df! {
        "tahun" => [
            2011i32, 2011, 2011, 2011, 2011, 2011, 2011, 2011,
            2012, 2012, 2012, 2012, 2012, 2012, 2012, 2012,
            2013, 2013, 2013, 2013, 2013, 2013, 2013, 2013,
        ],
        "pendidikan" => [
            "Tidak/Belum Pernah Sekolah", "Tidak/Belum Tamat SD", "SD", "SMP",
            "SMA Umum", "SMA Kejuruan", "Diploma I/II/III/Akademi", "Universitas",
            "Tidak/Belum Pernah Sekolah", "Tidak/Belum Tamat SD", "SD", "SMP",
            "SMA Umum", "SMA Kejuruan", "Diploma I/II/III/Akademi", "Universitas",
            "Tidak/Belum Pernah Sekolah", "Tidak/Belum Tamat SD", "SD", "SMP",
            "SMA Umum", "SMA Kejuruan", "Diploma I/II/III/Akademi", "Universitas",
        ],
        "jumlah_pengangguran_terbuka" => [
            10.0f64, 20.0, 100.0, 200.0, 300.0, 100.0, 50.0, 150.0,
            20.0, 30.0, 150.0, 180.0, 350.0, 150.0, 60.0, 200.0,
            30.0, 40.0, 200.0, 160.0, 400.0, 200.0, 70.0, 250.0,
        ],
    }
    .unwrap()
}

/// Write raw CSV text to a file inside a fresh temp directory
pub fn create_temp_csv_text(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("pengangguran.csv");
    write_text(&csv_path, contents);
    (temp_dir, csv_path)
}

/// Overwrite a file with new text
pub fn write_text(path: &Path, contents: &str) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("pengangguran.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("pengangguran.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Cleaned dataset built straight from a frame, without touching disk
pub fn dataset_from(df: &DataFrame) -> CleanedDataset {
    CleanedDataset::from_dataframe(df, "memory.csv", "fixture").unwrap()
}

/// Shorthand for a cleaned record
pub fn record(year: i32, education: &str, count: f64) -> CleanedRecord {
    CleanedRecord::new(Some(year), Some(education), Some(count))
}

/// Assert two floats agree within a tolerance
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}
