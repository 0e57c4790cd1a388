//! One full render of the dashboard: filter, aggregate, summarize

use serde::Serialize;

use super::category::EducationLevel;
use super::correlation::CorrelationMatrix;
use super::filter::{filter_records, FilterParams};
use super::loader::{CleanedDataset, CleanedRecord};
use super::pivot::{PercentagePivot, PivotTable};
use super::stats::Statistics;

/// The record with the single largest count in the view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakCount {
    pub year: i32,
    pub level: EducationLevel,
    pub count: f64,
}

/// The level with the largest mean count in the view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighestMean {
    pub level: EducationLevel,
    pub mean: f64,
}

/// Everything the presentation layer needs for one set of parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub params: FilterParams,
    pub filtered: Vec<CleanedRecord>,
    pub pivot: PivotTable,
    pub percentages: PercentagePivot,
    /// `None` when the filtered view is empty
    pub statistics: Option<Statistics>,
    pub correlation: CorrelationMatrix,
    pub highest_mean: Option<HighestMean>,
    pub peak: Option<PeakCount>,
}

impl ViewModel {
    /// True when the filter left nothing to show
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Run the pipeline for one set of parameters.
///
/// Pure: the same snapshot and parameters always produce the same model.
pub fn render(dataset: &CleanedDataset, params: &FilterParams) -> ViewModel {
    let filtered = filter_records(&dataset.records, params);
    let pivot = PivotTable::from_records(&filtered);
    let percentages = pivot.percentages();
    let statistics = Statistics::compute(&filtered, &pivot);
    let correlation = CorrelationMatrix::from_pivot(&pivot);

    let highest_mean = statistics.as_ref().and_then(highest_mean);
    let peak = peak_count(&filtered);

    log::debug!(
        "Rendered {} of {} records for {}-{} ({} level(s))",
        filtered.len(),
        dataset.records.len(),
        params.year_min(),
        params.year_max(),
        params.levels().len()
    );

    ViewModel {
        params: params.clone(),
        filtered,
        pivot,
        percentages,
        statistics,
        correlation,
        highest_mean,
        peak,
    }
}

/// First level (canonical order) with the largest mean
fn highest_mean(statistics: &Statistics) -> Option<HighestMean> {
    statistics
        .descriptive
        .iter()
        .fold(None, |best: Option<HighestMean>, d| match best {
            Some(b) if b.mean >= d.mean => Some(b),
            _ => Some(HighestMean {
                level: d.level,
                mean: d.mean,
            }),
        })
}

/// First record holding the largest count
fn peak_count(view: &[CleanedRecord]) -> Option<PeakCount> {
    view.iter()
        .filter_map(|r| match (r.year, r.category.level(), r.count) {
            (Some(year), Some(level), Some(count)) => Some(PeakCount { year, level, count }),
            _ => None,
        })
        .fold(None, |best: Option<PeakCount>, candidate| match best {
            Some(b) if b.count >= candidate.count => Some(b),
            _ => Some(candidate),
        })
}
