//! EduStat: open unemployment by education level
//!
//! Loads a yearly table of open-unemployment counts, normalizes the
//! education labels and renders an interactive dashboard of pivots,
//! shares, descriptive statistics, correlations and linear trends.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console::style;
use env_logger::Env;

use edustat::cli::{
    self, confirm_overwrite, default_export_path, default_json_path, prompt_levels,
    prompt_menu_action, prompt_output_path, prompt_year_range, Cli, Commands, MenuAction,
};
use edustat::pipeline::{render, CleanedDataset, DatasetCache, FilterParams, ViewModel};
use edustat::report::{display_dashboard, export_view_json, write_filtered_csv};
use edustat::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_count, print_filter_card, print_info, print_success, print_warning,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Export {
                input,
                output,
                filter,
                infer_schema_length,
            } => cli::export::run_export(input, output.as_deref(), filter, *infer_schema_length),
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;

    print_banner(env!("CARGO_PKG_VERSION"));

    let spinner = create_spinner("Loading and cleaning source...");
    let mut cache = match DatasetCache::open(input, cli.infer_schema_length) {
        Ok(cache) => cache,
        Err(e) => {
            finish_with_warning(&spinner, "Could not load source");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let mut dataset = cache.cached();
    print_dataset_info(&dataset);

    let mut params = cli.filter.resolve(&dataset)?;
    let mut view = show(&dataset, input, &params);

    if let Some(path) = &cli.csv {
        write_filtered_csv(&view.filtered, path)?;
        print_success(&format!("Filtered rows written to {}", path.display()));
    }
    if let Some(path) = &cli.json {
        export_view_json(&dataset, &view, path)?;
        print_success(&format!("Dashboard written to {}", path.display()));
    }

    if cli.no_interactive {
        print_completion();
        return Ok(());
    }

    loop {
        println!();
        match prompt_menu_action()? {
            MenuAction::ChangeYears => match dataset.year_bounds() {
                Some(bounds) => {
                    let (year_min, year_max) = prompt_year_range(bounds, &params)?;
                    params = FilterParams::new(year_min, year_max, params.levels())?;
                }
                None => {
                    print_warning("The dataset has no years to choose from.");
                    continue;
                }
            },
            MenuAction::ChangeLevels => {
                let levels = prompt_levels(&params)?;
                params = FilterParams::new(params.year_min(), params.year_max(), &levels)?;
            }
            MenuAction::Reset => {
                if let Some(full) = FilterParams::full_range(&dataset) {
                    params = full;
                }
            }
            MenuAction::Reload => {
                let spinner = create_spinner("Reloading source...");
                match cache.reload() {
                    Ok(_) => finish_with_success(&spinner, "Source reloaded"),
                    Err(e) => {
                        finish_with_warning(&spinner, "Reload failed");
                        print_warning(&format!("{}. Keeping the previous data.", e));
                    }
                }
            }
            MenuAction::ExportCsv => {
                let path = prompt_output_path("CSV output path", &default_export_path(input))?;
                if confirm_overwrite(&path)? {
                    write_filtered_csv(&view.filtered, &path)?;
                    print_success(&format!("Filtered rows written to {}", path.display()));
                }
                continue;
            }
            MenuAction::ExportJson => {
                let path = prompt_output_path("JSON output path", &default_json_path(input))?;
                if confirm_overwrite(&path)? {
                    export_view_json(&dataset, &view, &path)?;
                    print_success(&format!("Dashboard written to {}", path.display()));
                }
                continue;
            }
            MenuAction::Quit => break,
        }

        match cache.snapshot() {
            Ok(snapshot) => {
                if !Arc::ptr_eq(&snapshot, &dataset) {
                    print_info("Source changed on disk, using the new data.");
                    print_dataset_info(&snapshot);
                }
                dataset = snapshot;
            }
            Err(e) => print_warning(&format!("{}. Keeping the previous data.", e)),
        }

        view = show(&dataset, input, &params);
    }

    print_completion();
    Ok(())
}

/// Render and print one dashboard
fn show(dataset: &CleanedDataset, input: &Path, params: &FilterParams) -> ViewModel {
    println!();
    print_filter_card(input, params);
    let view = render(dataset, params);
    display_dashboard(dataset, &view);
    view
}

fn print_dataset_info(dataset: &CleanedDataset) {
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", dataset.records.len());
    println!("      Columns: {}", dataset.columns.len());
    match dataset.year_bounds() {
        Some((lo, hi)) => println!("      Years: {} - {}", lo, hi),
        None => println!("      Years: (none)"),
    }
    let unmatched = dataset
        .records
        .iter()
        .filter(|r| r.category.level().is_none())
        .count();
    if unmatched > 0 {
        print_count(
            "row(s) outside the five education levels",
            unmatched,
            Some("(unknown or unrecognized labels)"),
        );
    }
}
