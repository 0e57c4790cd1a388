//! Terminal dashboard: renders a view model as styled tables

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    columns_with_missing, CleanedDataset, CleanedRecord, CorrelationMatrix, MissingValue,
    PercentagePivot, PivotTable, Statistics, Trend, ViewModel,
};
use crate::utils::{print_indented, print_info, print_section_header, print_warning};

/// Rows of the filtered view shown before truncating
pub const PREVIEW_ROWS: usize = 15;

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{:.0}", value)).set_alignment(CellAlignment::Right)
}

/// Null counts per raw column, only for columns that have any
pub fn missing_table(missing: &[MissingValue]) -> Table {
    let mut table = new_table(vec!["Column".into(), "Missing".into(), "Ratio".into()]);
    for m in columns_with_missing(missing) {
        table.add_row(vec![
            Cell::new(&m.column),
            Cell::new(m.null_count).fg(Color::Red),
            Cell::new(format!("{:.1}%", m.ratio * 100.0)),
        ]);
    }
    table
}

/// First `limit` filtered records
pub fn records_table(records: &[CleanedRecord], limit: usize) -> Table {
    let mut table = new_table(vec![
        "Year".into(),
        "Education".into(),
        "Level".into(),
        "Unemployed".into(),
    ]);
    for r in records.iter().take(limit) {
        table.add_row(vec![
            Cell::new(r.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(&r.education),
            Cell::new(r.category.label()),
            r.count.map(number_cell).unwrap_or_else(|| Cell::new("")),
        ]);
    }
    table
}

/// Mean, std, min and max per level, rounded to whole counts
pub fn descriptive_table(statistics: &Statistics) -> Table {
    let mut table = new_table(vec![
        "Level".into(),
        "n".into(),
        "Mean".into(),
        "Std".into(),
        "Min".into(),
        "Max".into(),
    ]);
    for d in statistics.descriptive.iter().map(|d| d.rounded()) {
        table.add_row(vec![
            Cell::new(d.level.label()),
            Cell::new(d.count),
            number_cell(d.mean),
            d.std_dev.map(number_cell).unwrap_or_else(|| Cell::new("-")),
            number_cell(d.min),
            number_cell(d.max),
        ]);
    }
    table
}

/// Summed counts, one row per year
pub fn pivot_table(pivot: &PivotTable) -> Table {
    let mut header = vec!["Year".to_string()];
    header.extend(pivot.levels().iter().map(|l| l.label().to_string()));
    header.push("Total".to_string());

    let mut table = new_table(header);
    for ((year, row), total) in pivot
        .years()
        .iter()
        .zip(pivot.rows())
        .zip(pivot.row_totals())
    {
        let mut cells = vec![Cell::new(year)];
        cells.extend(row.iter().map(|&v| number_cell(v)));
        cells.push(number_cell(total).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    table
}

/// Row shares in percent; undefined rows are shown as dashes
pub fn percentage_table(percentages: &PercentagePivot) -> Table {
    let mut header = vec!["Year".to_string()];
    header.extend(percentages.levels().iter().map(|l| l.label().to_string()));

    let mut table = new_table(header);
    for (year, row) in percentages.years().iter().zip(percentages.rows()) {
        let mut cells = vec![Cell::new(year)];
        match row {
            Some(values) => cells.extend(
                values
                    .iter()
                    .map(|v| Cell::new(format!("{:.1}%", v)).set_alignment(CellAlignment::Right)),
            ),
            None => cells.extend(percentages.levels().iter().map(|_| Cell::new("-"))),
        }
        table.add_row(cells);
    }
    table
}

/// Fitted line, R² and trend per level
pub fn regression_table(statistics: &Statistics) -> Table {
    let mut table = new_table(vec![
        "Level".into(),
        "Equation".into(),
        "R²".into(),
        "Trend".into(),
    ]);
    for r in &statistics.regressions {
        let trend_color = match r.trend {
            Trend::Rising => Color::Red,
            Trend::Falling => Color::Green,
        };
        table.add_row(vec![
            Cell::new(r.level.label()),
            Cell::new(format!("y = {:.0}x + {:.0}", r.slope, r.intercept)),
            Cell::new(format!("{:.2}", r.r_squared)),
            Cell::new(r.trend.as_str()).fg(trend_color),
        ]);
    }
    table
}

/// Level-by-level correlation matrix
pub fn correlation_table(correlation: &CorrelationMatrix) -> Table {
    let mut header = vec![String::new()];
    header.extend(correlation.levels().iter().map(|l| l.label().to_string()));

    let mut table = new_table(header);
    for (level, row) in correlation.levels().iter().zip(correlation.rows()) {
        let mut cells = vec![Cell::new(level.label()).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|v| match v {
            Some(r) => {
                let color = if *r >= 0.5 {
                    Color::Red
                } else if *r <= -0.5 {
                    Color::Blue
                } else {
                    Color::White
                };
                Cell::new(format!("{:.2}", r)).fg(color)
            }
            None => Cell::new("-"),
        }));
        table.add_row(cells);
    }
    table
}

/// Summary of the most strongly correlated pair of levels
pub fn strongest_pair_line(correlation: &CorrelationMatrix) -> Option<String> {
    let pair = correlation.pairs().into_iter().next()?;
    Some(format!(
        "Strongest pair: {} / {} (r = {:.2})",
        pair.level1.label(),
        pair.level2.label(),
        pair.correlation
    ))
}

/// Print every dashboard section for one render
pub fn display_dashboard(dataset: &CleanedDataset, view: &ViewModel) {
    if dataset.has_missing() {
        print_section_header("Missing Values");
        print_warning("The source has missing values:");
        print_indented(&missing_table(&dataset.missing).to_string());
    }

    print_section_header("Filtered Data");
    if view.is_empty() {
        print_info("No rows match the current filter.");
    } else {
        print_indented(&records_table(&view.filtered, PREVIEW_ROWS).to_string());
        if view.filtered.len() > PREVIEW_ROWS {
            println!(
                "      {}",
                style(format!(
                    "... {} more row(s), export to CSV for the full view",
                    view.filtered.len() - PREVIEW_ROWS
                ))
                .dim()
            );
        }
    }

    print_section_header("Descriptive Statistics");
    match &view.statistics {
        Some(statistics) => print_indented(&descriptive_table(statistics).to_string()),
        None => print_info("No data for descriptive statistics."),
    }

    print_section_header("Unemployment per Year and Level");
    if view.pivot.is_empty() {
        print_info("Select at least one level and year to show the pivot.");
    } else {
        print_indented(&pivot_table(&view.pivot).to_string());
    }

    print_section_header("Share per Level (%)");
    if view.percentages.is_empty() {
        print_info("Select at least one level and year to show shares.");
    } else {
        print_indented(&percentage_table(&view.percentages).to_string());
    }

    print_section_header("Correlation between Levels");
    if view.correlation.is_empty() {
        print_info("At least two years are needed for correlations.");
    } else {
        print_indented(&correlation_table(&view.correlation).to_string());
        if let Some(line) = strongest_pair_line(&view.correlation) {
            println!("      {}", line);
        }
    }

    print_section_header("Linear Trend per Level");
    match &view.statistics {
        Some(statistics) if !statistics.regressions.is_empty() => {
            print_indented(&regression_table(statistics).to_string())
        }
        Some(_) => print_info("At least two years are needed for a trend."),
        None => print_info("No data for linear regression."),
    }

    print_section_header("Highlights");
    match (&view.highest_mean, &view.peak) {
        (Some(highest), Some(peak)) => {
            println!(
                "      Highest mean: {} ({:.0})",
                style(highest.level.label()).yellow().bold(),
                highest.mean
            );
            println!(
                "      Peak count:   {} in {} ({})",
                style(format!("{:.0}", peak.count)).yellow().bold(),
                style(peak.year).yellow().bold(),
                peak.level.label()
            );
        }
        _ => print_info("No data for the current filter."),
    }
}
