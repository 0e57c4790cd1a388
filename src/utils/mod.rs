//! Utility modules for terminal styling and progress

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
