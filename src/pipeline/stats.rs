//! Descriptive statistics and per-level linear trend
//!
//! Descriptive statistics read the ungrouped filtered records so the
//! zero-filled pivot cells cannot skew the variance. Regression runs on the
//! pivot: count against year, one fit per level.

use serde::Serialize;
use statrs::statistics::Statistics as _;

use super::category::{EducationLevel, CANONICAL_LEVELS};
use super::loader::CleanedRecord;
use super::pivot::PivotTable;

/// Mean, spread and range of the counts for one education level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub level: EducationLevel,
    /// Number of records with a count
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined for a single value
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Same statistics rounded to whole counts for display
    pub fn rounded(&self) -> Self {
        Self {
            mean: self.mean.round(),
            std_dev: self.std_dev.map(f64::round),
            min: self.min.round(),
            max: self.max.round(),
            ..self.clone()
        }
    }
}

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

impl Trend {
    /// `Rising` only for a strictly positive slope
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
        }
    }
}

/// Least-squares fit `count = slope * year + intercept` for one level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    pub level: EducationLevel,
    pub slope: f64,
    pub intercept: f64,
    /// Squared Pearson correlation between year and count
    pub r_squared: f64,
    pub trend: Trend,
    /// Number of (year, count) points in the fit
    pub points: usize,
}

/// Statistics block of a render; absent entirely when the view is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub descriptive: Vec<DescriptiveStats>,
    pub regressions: Vec<RegressionResult>,
}

impl Statistics {
    /// `None` signals "no data" for an empty view.
    pub fn compute(view: &[CleanedRecord], pivot: &PivotTable) -> Option<Self> {
        if view.is_empty() {
            return None;
        }
        Some(Self {
            descriptive: describe(view),
            regressions: regress(pivot),
        })
    }

    pub fn descriptive_for(&self, level: EducationLevel) -> Option<&DescriptiveStats> {
        self.descriptive.iter().find(|d| d.level == level)
    }

    pub fn regression_for(&self, level: EducationLevel) -> Option<&RegressionResult> {
        self.regressions.iter().find(|r| r.level == level)
    }
}

/// Descriptive statistics per level, in canonical order.
///
/// Levels without any counted record are omitted.
pub fn describe(view: &[CleanedRecord]) -> Vec<DescriptiveStats> {
    CANONICAL_LEVELS
        .iter()
        .filter_map(|&level| {
            let values: Vec<f64> = view
                .iter()
                .filter(|r| r.category.level() == Some(level))
                .filter_map(|r| r.count)
                .collect();
            describe_values(level, &values)
        })
        .collect()
}

fn describe_values(level: EducationLevel, values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }
    let std_dev = if values.len() > 1 {
        Some(values.iter().std_dev())
    } else {
        None
    };
    Some(DescriptiveStats {
        level,
        count: values.len(),
        mean: values.iter().mean(),
        std_dev,
        min: values.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
        max: values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
    })
}

/// Fit every pivot column against the pivot's years.
///
/// Nothing is fitted when the pivot has fewer than two years.
pub fn regress(pivot: &PivotTable) -> Vec<RegressionResult> {
    if pivot.years().len() < 2 {
        return Vec::new();
    }
    let years: Vec<f64> = pivot.years().iter().map(|&y| f64::from(y)).collect();

    pivot
        .levels()
        .iter()
        .filter_map(|&level| {
            let counts = pivot.column(level)?;
            linear_regression(&years, &counts).map(|fit| RegressionResult {
                level,
                slope: fit.slope,
                intercept: fit.intercept,
                r_squared: fit.r * fit.r,
                trend: Trend::from_slope(fit.slope),
                points: years.len(),
            })
        })
        .collect()
}

/// Ordinary least-squares line through `(x, y)` points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation; 0 when either variable is constant
    pub r: f64,
}

/// Simple linear regression using centered sums.
///
/// Returns `None` for fewer than two points, mismatched lengths or constant `x`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    Some(LinearFit {
        slope,
        intercept,
        r,
    })
}
