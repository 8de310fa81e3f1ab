//! Interactive prompts. Callers check `UiContext::interactive` first;
//! these functions always talk to the terminal.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use grubwiz::{Backup, BackupTag};

use crate::ui::context::UiContext;
use crate::ui::theme::GrubwizTheme;

pub fn confirm(ui: &UiContext, prompt: &str, default: bool) -> Result<bool> {
    let theme = GrubwizTheme::new(ui.unicode);
    Ok(Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask for a backup tag. An empty answer means no backup.
pub fn backup_tag(ui: &UiContext, prompt: &str, default: &str) -> Result<Option<BackupTag>> {
    let theme = GrubwizTheme::new(ui.unicode);
    let answer: String = Input::with_theme(&theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let input = input.trim();
            if input.is_empty() || BackupTag::is_valid(input) {
                Ok(())
            } else {
                Err("use 1-64 characters from [-_A-Za-z0-9], or leave empty to skip".to_string())
            }
        })
        .interact_text()?;

    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(BackupTag::new(answer)?))
}

/// Pick a backup, newest first. Escape cancels.
pub fn select_backup(ui: &UiContext, prompt: &str, backups: &[Backup]) -> Result<Option<String>> {
    let theme = GrubwizTheme::new(ui.unicode);
    let names: Vec<String> = backups.iter().rev().map(Backup::file_name).collect();
    let picked = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()?;
    Ok(picked.map(|i| names[i].clone()))
}
