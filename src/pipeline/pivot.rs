//! Year x education-level pivot of summed unemployment counts

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::category::EducationLevel;
use super::loader::CleanedRecord;

/// Dense pivot: one row per year (ascending), one column per education
/// level present in the view (canonical order). Absent combinations are 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    years: Vec<i32>,
    levels: Vec<EducationLevel>,
    /// `cells[row][col]`
    cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Sum counts per (year, level) over a filtered view.
    ///
    /// Records without a year or a canonical level are ignored, as are
    /// absent counts. Sums accumulate in view order.
    pub fn from_records(view: &[CleanedRecord]) -> Self {
        let mut sums: BTreeMap<(i32, EducationLevel), f64> = BTreeMap::new();
        let mut years = BTreeSet::new();
        let mut levels = BTreeSet::new();

        for record in view {
            let (Some(year), Some(level)) = (record.year, record.category.level()) else {
                continue;
            };
            years.insert(year);
            levels.insert(level);
            *sums.entry((year, level)).or_insert(0.0) += record.count.unwrap_or(0.0);
        }

        let years: Vec<i32> = years.into_iter().collect();
        let levels: Vec<EducationLevel> = levels.into_iter().collect();
        let cells = years
            .iter()
            .map(|&year| {
                levels
                    .iter()
                    .map(|&level| sums.get(&(year, level)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self {
            years,
            levels,
            cells,
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn levels(&self) -> &[EducationLevel] {
        &self.levels
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// No rows or no columns
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.levels.is_empty()
    }

    /// Cell value; 0 for a year/level pair inside the table with no records,
    /// `None` when the year or level is not part of the table.
    pub fn get(&self, year: i32, level: EducationLevel) -> Option<f64> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = self.levels.iter().position(|&l| l == level)?;
        Some(self.cells[row][col])
    }

    /// All values of one level, in year order
    pub fn column(&self, level: EducationLevel) -> Option<Vec<f64>> {
        let col = self.levels.iter().position(|&l| l == level)?;
        Some(self.cells.iter().map(|row| row[col]).collect())
    }

    /// Sum of each row across all displayed levels
    pub fn row_totals(&self) -> Vec<f64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// Row-normalized percentages (0-100).
    pub fn percentages(&self) -> PercentagePivot {
        let rows = self
            .cells
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum();
                if total == 0.0 {
                    None
                } else {
                    Some(row.iter().map(|v| v / total * 100.0).collect())
                }
            })
            .collect();

        PercentagePivot {
            years: self.years.clone(),
            levels: self.levels.clone(),
            rows,
        }
    }
}

/// Pivot cells as a share of their row total.
///
/// A row whose total is zero has no defined percentages and is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentagePivot {
    years: Vec<i32>,
    levels: Vec<EducationLevel>,
    rows: Vec<Option<Vec<f64>>>,
}

impl PercentagePivot {
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn levels(&self) -> &[EducationLevel] {
        &self.levels
    }

    pub fn rows(&self) -> &[Option<Vec<f64>>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.levels.is_empty()
    }

    /// Percentage for one cell; `None` for undefined rows or unknown keys
    pub fn get(&self, year: i32, level: EducationLevel) -> Option<f64> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = self.levels.iter().position(|&l| l == level)?;
        self.rows[row].as_ref().map(|values| values[col])
    }

    /// Defined rows only, paired with their year
    pub fn defined_rows(&self) -> impl Iterator<Item = (i32, &[f64])> {
        self.years
            .iter()
            .zip(self.rows.iter())
            .filter_map(|(&year, row)| row.as_deref().map(|values| (year, values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, education: &str, count: f64) -> CleanedRecord {
        CleanedRecord::new(Some(year), Some(education), Some(count))
    }

    #[test]
    fn test_columns_follow_canonical_order() {
        let view = vec![
            record(2011, "SMA", 1.0),
            record(2011, "SD KE BAWAH", 2.0),
            record(2011, "Universitas", 3.0),
        ];
        let pivot = PivotTable::from_records(&view);
        assert_eq!(
            pivot.levels(),
            &[
                EducationLevel::SdKeBawah,
                EducationLevel::Sma,
                EducationLevel::DiplomaUniv
            ]
        );
    }

    #[test]
    fn test_absent_counts_do_not_contribute() {
        let view = vec![
            record(2011, "SD", 5.0),
            CleanedRecord::new(Some(2011), Some("SD"), None),
        ];
        let pivot = PivotTable::from_records(&view);
        assert_eq!(pivot.get(2011, EducationLevel::Sd), Some(5.0));
    }

    #[test]
    fn test_zero_total_row_is_undefined() {
        let view = vec![record(2011, "SD", 0.0), record(2012, "SD", 4.0)];
        let pct = PivotTable::from_records(&view).percentages();
        assert_eq!(pct.rows()[0], None);
        assert_eq!(pct.get(2012, EducationLevel::Sd), Some(100.0));
        assert_eq!(pct.defined_rows().count(), 1);
    }
}
