//! Missing value analysis over the raw source columns

use polars::prelude::*;
use serde::Serialize;

/// Null statistics for one raw column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValue {
    pub column: String,
    pub null_count: usize,
    /// `null_count / row_count`, 0 for an empty frame
    pub ratio: f64,
}

/// Count nulls in every column of the raw frame.
///
/// Runs before the loader fills anything, so a missing education label is
/// reported here even though the cleaned record carries `UNKNOWN`.
/// NaN in a float column counts as missing.
/// Sorted by null count descending, ties in column order.
pub fn analyze_missing_values(df: &DataFrame) -> Vec<MissingValue> {
    let rows = df.height();

    let mut missing: Vec<MissingValue> = df
        .get_columns()
        .iter()
        .map(|column| {
            let null_count = column.null_count() + nan_count(column);
            let ratio = if rows == 0 {
                0.0
            } else {
                null_count as f64 / rows as f64
            };
            MissingValue {
                column: column.name().to_string(),
                null_count,
                ratio,
            }
        })
        .collect();

    missing.sort_by(|a, b| b.null_count.cmp(&a.null_count));
    missing
}

/// Columns with at least one null
pub fn columns_with_missing(missing: &[MissingValue]) -> Vec<&MissingValue> {
    missing.iter().filter(|m| m.null_count > 0).collect()
}

fn nan_count(column: &Column) -> usize {
    if !column.dtype().is_float() {
        return 0;
    }
    let Ok(floats) = column.cast(&DataType::Float64) else {
        return 0;
    };
    let count = floats
        .f64()
        .map(|ca| ca.into_iter().filter(|v| v.is_some_and(f64::is_nan)).count())
        .unwrap_or(0);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_and_nans_are_counted() {
        let df = df! {
            "tahun" => [2011i32, 2012, 2013, 2014],
            "pendidikan" => [Some("SD"), None, None, Some("SMP")],
            "jumlah_pengangguran_terbuka" => [Some(1.0f64), Some(f64::NAN), None, Some(4.0)],
        }
        .unwrap();

        let missing = analyze_missing_values(&df);
        assert_eq!(missing[0].column, "pendidikan");
        assert_eq!(missing[0].null_count, 2);
        assert_eq!(missing[1].column, "jumlah_pengangguran_terbuka");
        assert_eq!(missing[1].null_count, 2);
        assert_eq!(missing[1].ratio, 0.5);
        assert_eq!(columns_with_missing(&missing).len(), 2);
    }
}
