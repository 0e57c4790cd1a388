//! Non-interactive export of the filtered rows

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::args::{default_export_path, FilterArgs};
use crate::pipeline::{filter_records, load_dataset};
use crate::report::write_filtered_csv;
use crate::utils::create_spinner;

/// Load, clean and filter a source, then write the filtered rows to CSV.
///
/// # Arguments
/// * `input` - Source CSV, Parquet or spreadsheet file
/// * `output` - Optional output path. Defaults to `<stem>_filtered.csv` next to the input
/// * `filter` - Year range and level selection; unset values cover the whole dataset
/// * `infer_schema_length` - Number of rows to use for CSV schema inference
pub fn run_export(
    input: &Path,
    output: Option<&Path>,
    filter: &FilterArgs,
    infer_schema_length: usize,
) -> Result<()> {
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_export_path(input));

    println!("\n {} Exporting filtered rows", style("◆").cyan().bold());
    println!("   Input:  {}", style(input.display()).dim());
    println!("   Output: {}", style(output_path.display()).dim());
    println!();

    let spinner = create_spinner("Loading and cleaning source...");
    let dataset = load_dataset(input, infer_schema_length)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    spinner.finish_with_message(format!(
        "{} Loaded {} rows",
        style("✓").green(),
        dataset.records.len()
    ));

    let params = filter.resolve(&dataset)?;
    let filtered = filter_records(&dataset.records, &params);

    let spinner = create_spinner("Writing CSV...");
    write_filtered_csv(&filtered, &output_path)?;
    spinner.finish_with_message(format!("{} CSV written", style("✓").green()));

    println!();
    println!(
        "   {} of {} rows kept ({}-{}, {} level(s))",
        style(filtered.len()).yellow(),
        style(dataset.records.len()).yellow(),
        params.year_min(),
        params.year_max(),
        params.levels().len()
    );
    println!();
    println!(" {} Export complete!", style("✓").green().bold());

    Ok(())
}
