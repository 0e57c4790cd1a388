//! CLI module - argument parsing, interactive prompts and the export command

mod args;
pub mod export;
mod prompts;

pub use args::*;
pub use prompts::*;
