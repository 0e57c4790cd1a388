//! Pipeline module - load, clean, filter, aggregate and summarize

pub mod cache;
pub mod category;
pub mod correlation;
pub mod error;
pub mod filter;
pub mod loader;
pub mod missing;
pub mod pivot;
pub mod stats;
pub mod view;

pub use cache::*;
pub use category::*;
pub use correlation::*;
pub use error::*;
pub use filter::*;
pub use loader::*;
pub use missing::*;
pub use pivot::*;
pub use stats::*;
pub use view::*;
