//! Tests for the year x level pivot and its percentage shares

use edustat::pipeline::{filter_records, EducationLevel, FilterParams, PivotTable, CANONICAL_LEVELS};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, create_unemployment_dataframe, dataset_from, record};

#[test]
fn test_pivot_sums_labels_per_level() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let pivot = PivotTable::from_records(&dataset.records);

    assert_eq!(pivot.years(), &[2011, 2012, 2013]);
    assert_eq!(pivot.levels(), &CANONICAL_LEVELS);
    // "Tidak/Belum Pernah Sekolah" + "Tidak/Belum Tamat SD"
    assert_eq!(pivot.get(2011, EducationLevel::SdKeBawah), Some(30.0));
    // "SMA Umum" + "SMA Kejuruan"
    assert_eq!(pivot.get(2012, EducationLevel::Sma), Some(500.0));
    // "Diploma I/II/III/Akademi" + "Universitas"
    assert_eq!(pivot.get(2013, EducationLevel::DiplomaUniv), Some(320.0));
}

#[test]
fn test_pivot_is_dense() {
    let records = vec![
        record(2011, "SD", 10.0),
        record(2012, "SMA", 20.0),
        record(2013, "SD", 30.0),
    ];

    let pivot = PivotTable::from_records(&records);

    assert_eq!(pivot.years(), &[2011, 2012, 2013]);
    assert_eq!(pivot.levels(), &[EducationLevel::Sd, EducationLevel::Sma]);
    for row in pivot.rows() {
        assert_eq!(row.len(), pivot.levels().len());
    }
    assert_eq!(pivot.get(2012, EducationLevel::Sd), Some(0.0));
    assert_eq!(pivot.get(2011, EducationLevel::Sma), Some(0.0));
    assert_eq!(pivot.get(2011, EducationLevel::Smp), None);
}

#[test]
fn test_percentage_rows_sum_to_hundred() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(
        2011,
        2013,
        &[EducationLevel::Sd, EducationLevel::Smp, EducationLevel::Sma],
    )
    .unwrap();
    let pivot = PivotTable::from_records(&filter_records(&dataset.records, &params));

    let percentages = pivot.percentages();

    assert_eq!(percentages.defined_rows().count(), 3);
    for (year, shares) in percentages.defined_rows() {
        let total: f64 = shares.iter().sum();
        assert_close(total, 100.0, 1e-6);
        assert!(shares.iter().all(|s| (0.0..=100.0).contains(s)), "{}", year);
    }
    // 2011: SD 100, SMP 200, SMA 400
    assert_close(percentages.get(2011, EducationLevel::Sma).unwrap(), 400.0 / 7.0, 1e-9);
}

#[test]
fn test_zero_total_row_has_no_percentages() {
    let records = vec![record(2011, "SD", 0.0), record(2012, "SD", 5.0)];

    let percentages = PivotTable::from_records(&records).percentages();

    assert_eq!(percentages.get(2011, EducationLevel::Sd), None);
    assert_eq!(percentages.get(2012, EducationLevel::Sd), Some(100.0));
    assert_eq!(percentages.defined_rows().count(), 1);
}

#[test]
fn test_empty_view_gives_empty_pivot() {
    let pivot = PivotTable::from_records(&[]);

    assert!(pivot.is_empty());
    assert!(pivot.percentages().is_empty());
    assert!(pivot.row_totals().is_empty());
}

#[test]
fn test_pivot_is_reproducible() {
    let dataset = dataset_from(&create_unemployment_dataframe());

    let a = PivotTable::from_records(&dataset.records);
    let b = PivotTable::from_records(&dataset.records);

    assert_eq!(a, b);
    let bits = |p: &PivotTable| -> Vec<u64> {
        p.rows().iter().flatten().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}
