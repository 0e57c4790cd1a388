//! Year-range and education-level filtering

use serde::Serialize;

use super::category::{EducationLevel, CANONICAL_LEVELS};
use super::error::{PipelineError, PipelineResult};
use super::loader::{CleanedDataset, CleanedRecord};

/// User-selected filter parameters for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    year_min: i32,
    year_max: i32,
    levels: Vec<EducationLevel>,
}

impl FilterParams {
    /// Inclusive year range plus the selected levels.
    ///
    /// Levels are kept in canonical order with duplicates removed. An empty
    /// selection is allowed and filters everything out.
    pub fn new(year_min: i32, year_max: i32, levels: &[EducationLevel]) -> PipelineResult<Self> {
        if year_min > year_max {
            return Err(PipelineError::InvalidYearRange { year_min, year_max });
        }
        let levels = CANONICAL_LEVELS
            .iter()
            .copied()
            .filter(|level| levels.contains(level))
            .collect();
        Ok(Self {
            year_min,
            year_max,
            levels,
        })
    }

    /// Full year range of the dataset with every level selected.
    ///
    /// Returns `None` when no record has a year.
    pub fn full_range(dataset: &CleanedDataset) -> Option<Self> {
        let (year_min, year_max) = dataset.year_bounds()?;
        Some(Self {
            year_min,
            year_max,
            levels: CANONICAL_LEVELS.to_vec(),
        })
    }

    pub fn year_min(&self) -> i32 {
        self.year_min
    }

    pub fn year_max(&self) -> i32 {
        self.year_max
    }

    pub fn levels(&self) -> &[EducationLevel] {
        &self.levels
    }

    /// Whether a record passes both the year range and level selection
    pub fn matches(&self, record: &CleanedRecord) -> bool {
        let in_range = record
            .year
            .is_some_and(|y| y >= self.year_min && y <= self.year_max);
        in_range
            && record
                .category
                .level()
                .is_some_and(|level| self.levels.contains(&level))
    }
}

/// Records passing the filter, in their original order
pub fn filter_records(records: &[CleanedRecord], params: &FilterParams) -> Vec<CleanedRecord> {
    records
        .iter()
        .filter(|r| params.matches(r))
        .cloned()
        .collect()
}
