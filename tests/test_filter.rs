//! Tests for year-range and level filtering

use edustat::pipeline::{
    filter_records, CleanedRecord, EducationLevel, FilterParams, PipelineError, CANONICAL_LEVELS,
};

#[path = "common/mod.rs"]
mod common;

use common::{create_unemployment_dataframe, dataset_from, record};

#[test]
fn test_inverted_range_is_rejected() {
    let err = FilterParams::new(2013, 2011, &CANONICAL_LEVELS).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::InvalidYearRange {
            year_min: 2013,
            year_max: 2011
        }
    ));
}

#[test]
fn test_filter_by_year_and_level() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(2012, 2013, &[EducationLevel::Sma]).unwrap();

    let filtered = filter_records(&dataset.records, &params);

    // Two SMA labels per year, two years
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|r| {
        r.category.level() == Some(EducationLevel::Sma)
            && (2012..=2013).contains(&r.year.unwrap())
    }));
}

#[test]
fn test_filter_is_subset_preserving_order() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(
        2011,
        2013,
        &[EducationLevel::DiplomaUniv, EducationLevel::SdKeBawah],
    )
    .unwrap();

    let filtered = filter_records(&dataset.records, &params);
    let positions: Vec<usize> = filtered
        .iter()
        .map(|f| dataset.records.iter().position(|r| r == f).unwrap())
        .collect();

    assert_eq!(filtered.len(), 12);
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_level_selection_yields_nothing() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(2011, 2013, &[]).unwrap();

    assert!(filter_records(&dataset.records, &params).is_empty());
}

#[test]
fn test_range_outside_data_yields_nothing() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(1990, 1995, &CANONICAL_LEVELS).unwrap();

    assert!(filter_records(&dataset.records, &params).is_empty());
}

#[test]
fn test_unknown_and_yearless_rows_never_match() {
    let records = vec![
        CleanedRecord::new(Some(2011), None, Some(5.0)),
        CleanedRecord::new(None, Some("SMA"), Some(5.0)),
        record(2011, "Pesantren", 5.0),
        record(2011, "SMA", 5.0),
    ];
    let params = FilterParams::new(2000, 2020, &CANONICAL_LEVELS).unwrap();

    let filtered = filter_records(&records, &params);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].education, "SMA");
}

#[test]
fn test_levels_are_kept_in_canonical_order() {
    let params = FilterParams::new(
        2011,
        2011,
        &[
            EducationLevel::DiplomaUniv,
            EducationLevel::Sd,
            EducationLevel::DiplomaUniv,
        ],
    )
    .unwrap();

    assert_eq!(
        params.levels(),
        &[EducationLevel::Sd, EducationLevel::DiplomaUniv]
    );
}

#[test]
fn test_full_range_covers_dataset() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::full_range(&dataset).unwrap();

    assert_eq!((params.year_min(), params.year_max()), (2011, 2013));
    assert_eq!(params.levels(), &CANONICAL_LEVELS);
    assert_eq!(
        filter_records(&dataset.records, &params).len(),
        dataset.records.len()
    );
}
