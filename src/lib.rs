//! EduStat: Open Unemployment by Education Level
//!
//! A library for loading yearly open-unemployment counts, normalizing the
//! education labels into five canonical levels, and deriving pivots, shares,
//! descriptive statistics, correlations and linear trends per level.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
