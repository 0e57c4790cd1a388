//! Terminal styling utilities for the dashboard output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::FilterParams;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
pub static SCHOOL: Emoji<'_, '_> = Emoji("🎓 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗██████╗ ██╗   ██╗███████╗████████╗ █████╗ ████████╗
    ██╔════╝██╔══██╗██║   ██║██╔════╝╚══██╔══╝██╔══██╗╚══██╔══╝
    █████╗  ██║  ██║██║   ██║███████╗   ██║   ███████║   ██║
    ██╔══╝  ██║  ██║██║   ██║╚════██║   ██║   ██╔══██║   ██║
    ███████╗██████╔╝╚██████╔╝███████║   ██║   ██║  ██║   ██║
    ╚══════╝╚═════╝  ╚═════╝ ╚══════╝   ╚═╝   ╚═╝  ╚═╝   ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        CHART,
        style("Open unemployment by education level").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the current filter as a configuration card
pub fn print_filter_card(input: &Path, params: &FilterParams) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);
    let levels = if params.levels().is_empty() {
        "(none)".to_string()
    } else {
        params
            .levels()
            .iter()
            .map(|l| l.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Filter").cyan().bold(),
        " ".repeat(box_width - 13)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(input, 38)
    );
    println!(
        "    │  {} Years:  {:<39}│",
        CALENDAR,
        format!("{} - {}", params.year_min(), params.year_max())
    );
    println!(
        "    │  {} Levels: {:<39}│",
        SCHOOL,
        truncate_string(&levels, 38)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a section header with styling
pub fn print_section_header(title: &str) {
    println!();
    println!(
        "    {} {}",
        style("◆").cyan().bold(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!("    {} {}", ROCKET, style("EduStat session finished").green().bold());
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Print a table indented to line up with the section headers
pub fn print_indented(block: &str) {
    for line in block.lines() {
        println!("    {}", line);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
