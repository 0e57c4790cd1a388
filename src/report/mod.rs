//! Report module - dashboard rendering and exports

pub mod dashboard;
pub mod export;

pub use dashboard::*;
pub use export::*;
