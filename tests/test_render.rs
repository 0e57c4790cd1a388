//! Tests for a full dashboard render and its exports

use edustat::pipeline::{render, EducationLevel, FilterParams, CANONICAL_LEVELS};
use edustat::report::{export_view_json, filtered_csv_bytes};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::{create_unemployment_dataframe, dataset_from, record};

#[test]
fn test_render_full_dataset() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::full_range(&dataset).unwrap();

    let view = render(&dataset, &params);

    assert_eq!(view.filtered.len(), 24);
    assert_eq!(view.pivot.levels(), &CANONICAL_LEVELS);
    let statistics = view.statistics.as_ref().unwrap();
    assert_eq!(statistics.descriptive.len(), 5);
    assert_eq!(statistics.regressions.len(), 5);

    // SMA records: 300, 100, 350, 150, 400, 200
    let highest = view.highest_mean.as_ref().unwrap();
    assert_eq!(highest.level, EducationLevel::Sma);
    assert_eq!(highest.mean, 250.0);

    let peak = view.peak.as_ref().unwrap();
    assert_eq!((peak.year, peak.level, peak.count), (2013, EducationLevel::Sma, 400.0));
}

#[test]
fn test_ties_go_to_first_occurrence() {
    let dataset_records = vec![record(2011, "SMP", 50.0), record(2011, "SD", 50.0)];
    let params = FilterParams::new(2011, 2011, &CANONICAL_LEVELS).unwrap();
    let mut dataset = dataset_from(&create_unemployment_dataframe());
    dataset.records = dataset_records;

    let view = render(&dataset, &params);

    // Means tie: canonical order wins. Counts tie: record order wins.
    assert_eq!(view.highest_mean.unwrap().level, EducationLevel::Sd);
    assert_eq!(view.peak.unwrap().level, EducationLevel::Smp);
}

#[test]
fn test_empty_selection_renders_empty_view() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(2011, 2013, &[]).unwrap();

    let view = render(&dataset, &params);

    assert!(view.is_empty());
    assert!(view.pivot.is_empty());
    assert!(view.percentages.is_empty());
    assert!(view.correlation.is_empty());
    assert!(view.statistics.is_none());
    assert!(view.highest_mean.is_none());
    assert!(view.peak.is_none());

    let csv = String::from_utf8(filtered_csv_bytes(&view.filtered).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1, "Only the header is written");
}

#[test]
fn test_render_is_deterministic() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(2012, 2013, &[EducationLevel::Sd, EducationLevel::Sma]).unwrap();

    assert_eq!(render(&dataset, &params), render(&dataset, &params));
}

#[test]
fn test_json_export_contains_filter_and_view() {
    let dataset = dataset_from(&create_unemployment_dataframe());
    let params = FilterParams::new(2011, 2012, &[EducationLevel::Sma]).unwrap();
    let view = render(&dataset, &params);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dashboard.json");

    export_view_json(&dataset, &view, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["year_min"], 2011);
    assert_eq!(json["metadata"]["year_max"], 2012);
    assert_eq!(json["metadata"]["levels"][0], "SMA");
    assert_eq!(json["metadata"]["fingerprint"], "fixture");
    assert_eq!(json["view"]["filtered"].as_array().unwrap().len(), 4);
    assert_eq!(json["view"]["highest_mean"]["level"], "SMA");
}
