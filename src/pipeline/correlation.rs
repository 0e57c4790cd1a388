//! Correlation between education levels across years
//!
//! Pearson correlation of pivot columns, computed over the zero-filled pivot
//! rows. This is the matrix behind a level-vs-level heatmap.

use faer::Mat;
use serde::Serialize;

use super::category::EducationLevel;
use super::pivot::PivotTable;

/// Square correlation matrix over pivot columns.
///
/// A cell is `None` when either of its levels is constant over the years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    levels: Vec<EducationLevel>,
    values: Vec<Vec<Option<f64>>>,
}

/// A pair of levels with their correlation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub level1: EducationLevel,
    pub level2: EducationLevel,
    pub correlation: f64,
}

impl CorrelationMatrix {
    /// Compute correlations between every pair of pivot columns.
    ///
    /// Algorithm:
    /// 1. Standardize each column: z = (x - mean) / (std * sqrt(n)), population std
    /// 2. Correlation matrix: R = Z^T * Z
    ///
    /// Pivots with fewer than two years produce an empty matrix.
    pub fn from_pivot(pivot: &PivotTable) -> Self {
        let n_rows = pivot.years().len();
        if n_rows < 2 || pivot.levels().is_empty() {
            return Self {
                levels: Vec::new(),
                values: Vec::new(),
            };
        }

        let levels = pivot.levels().to_vec();
        let standardized: Vec<Option<Vec<f64>>> = levels
            .iter()
            .map(|&level| pivot.column(level).and_then(|col| standardize(&col)))
            .collect();

        // Only non-constant columns enter the matrix
        let valid: Vec<(usize, &Vec<f64>)> = standardized
            .iter()
            .enumerate()
            .filter_map(|(i, col)| col.as_ref().map(|v| (i, v)))
            .collect();

        let mut z = Mat::<f64>::zeros(n_rows, valid.len());
        for (col_idx, (_, values)) in valid.iter().enumerate() {
            for (row_idx, &v) in values.iter().enumerate() {
                z[(row_idx, col_idx)] = v;
            }
        }
        let corr = z.transpose() * &z;

        let mut values = vec![vec![None; levels.len()]; levels.len()];
        for (a, &(i, _)) in valid.iter().enumerate() {
            for (b, &(j, _)) in valid.iter().enumerate() {
                values[i][j] = Some(if i == j {
                    1.0
                } else {
                    corr[(a, b)].clamp(-1.0, 1.0)
                });
            }
        }

        Self { levels, values }
    }

    pub fn levels(&self) -> &[EducationLevel] {
        &self.levels
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Correlation between two levels, if both are in the matrix and non-constant
    pub fn get(&self, a: EducationLevel, b: EducationLevel) -> Option<f64> {
        let i = self.levels.iter().position(|&l| l == a)?;
        let j = self.levels.iter().position(|&l| l == b)?;
        self.values[i][j]
    }

    /// Upper-triangle pairs sorted by absolute correlation, descending
    pub fn pairs(&self) -> Vec<CorrelatedPair> {
        let n = self.levels.len();
        let mut pairs: Vec<CorrelatedPair> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                self.values[i][j].map(|correlation| CorrelatedPair {
                    level1: self.levels[i],
                    level2: self.levels[j],
                    correlation,
                })
            })
            .collect();

        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }
}

/// Scale a column so that the dot product of two scaled columns is their
/// Pearson correlation. `None` for a constant column.
fn standardize(values: &[f64]) -> Option<Vec<f64>> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq_dev: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    if sum_sq_dev == 0.0 {
        return None;
    }
    let norm = sum_sq_dev.sqrt();
    Some(values.iter().map(|x| (x - mean) / norm).collect())
}
