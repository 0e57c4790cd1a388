//! Interactive prompts using dialoguer

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::pipeline::{EducationLevel, FilterParams, CANONICAL_LEVELS};

/// Action picked from the main menu between renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ChangeYears,
    ChangeLevels,
    Reset,
    Reload,
    ExportCsv,
    ExportJson,
    Quit,
}

const MENU: [(&str, MenuAction); 7] = [
    ("Change year range", MenuAction::ChangeYears),
    ("Change education levels", MenuAction::ChangeLevels),
    ("Reset filter", MenuAction::Reset),
    ("Reload source", MenuAction::Reload),
    ("Export filtered rows (CSV)", MenuAction::ExportCsv),
    ("Export dashboard (JSON)", MenuAction::ExportJson),
    ("Quit", MenuAction::Quit),
];

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt before overwriting an existing file
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    confirm_step(&format!("{} exists. Overwrite?", path.display()))
}

/// Show the main menu
pub fn prompt_menu_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MENU.iter().map(|(label, _)| *label).collect();
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MENU[selection].1)
}

/// Ask for a new inclusive year range within the data's bounds
pub fn prompt_year_range(bounds: (i32, i32), current: &FilterParams) -> Result<(i32, i32)> {
    let (lo, hi) = bounds;

    let year_min: i32 = Input::new()
        .with_prompt(format!("First year ({}-{})", lo, hi))
        .default(current.year_min().clamp(lo, hi))
        .validate_with(|y: &i32| -> Result<(), String> {
            if (lo..=hi).contains(y) {
                Ok(())
            } else {
                Err(format!("Year must be between {} and {}", lo, hi))
            }
        })
        .interact_text()?;

    let year_max: i32 = Input::new()
        .with_prompt(format!("Last year ({}-{})", year_min, hi))
        .default(current.year_max().clamp(year_min, hi))
        .validate_with(|y: &i32| -> Result<(), String> {
            if (year_min..=hi).contains(y) {
                Ok(())
            } else {
                Err(format!("Year must be between {} and {}", year_min, hi))
            }
        })
        .interact_text()?;

    Ok((year_min, year_max))
}

/// Ask which education levels to include; an empty pick is allowed
pub fn prompt_levels(current: &FilterParams) -> Result<Vec<EducationLevel>> {
    let labels: Vec<&str> = CANONICAL_LEVELS.iter().map(|l| l.label()).collect();
    let checked: Vec<bool> = CANONICAL_LEVELS
        .iter()
        .map(|l| current.levels().contains(l))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Education levels (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact()?;

    Ok(picked.into_iter().map(|i| CANONICAL_LEVELS[i]).collect())
}

/// Ask for an output path, offering a default
pub fn prompt_output_path(prompt: &str, default: &Path) -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path))
}
