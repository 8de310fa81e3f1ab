use anyhow::{bail, Result};
use grubwiz::domain::ports::FileSystem;
use grubwiz::presentation::{BackupCommand, CommitArgs};
use grubwiz::{BackupOutcome, Checksum, LocalFs};
use serde_json::json;

use super::commit::commit_session;
use super::App;
use crate::ui::json::emit;
use crate::ui::primitives::icon::Icon;
use crate::ui::prompt;
use crate::ui::views::backups::{backup_json, render_backup_list};

pub fn cmd_backup(app: &App, action: &BackupCommand) -> Result<()> {
    match action {
        BackupCommand::Create { tag } => create(app, tag),
        BackupCommand::List => list(app),
        BackupCommand::Delete { name, yes } => delete(app, name.as_deref(), *yes),
        BackupCommand::Restore { name, commit } => restore(app, name.as_deref(), commit),
    }
}

fn create(app: &App, tag: &str) -> Result<()> {
    let session = app.open_session()?;
    let outcome = app.backups.create_backup(session.loaded(), tag)?;

    if app.ui.json {
        emit(json!({
            "event": "backup_created",
            "created": outcome.is_created(),
            "backup": backup_json(outcome.backup()),
        }))?;
        return Ok(());
    }
    match &outcome {
        BackupOutcome::Created(b) => println!(
            "{} created {}",
            Icon::Backup.colored(app.ui.color, app.ui.unicode),
            b.path().display()
        ),
        BackupOutcome::Existing(b) => println!("{} already exists", b.file_name()),
    }
    Ok(())
}

fn list(app: &App) -> Result<()> {
    let backups = app.backups.list_backups()?;
    // The target may be unreadable (e.g. deleted); the list is still useful
    let current = LocalFs::new()
        .read(app.target())
        .ok()
        .map(|bytes| Checksum::from_bytes(&bytes));

    if app.ui.json {
        emit(json!({
            "event": "backups",
            "dir": app.backups.dir().display().to_string(),
            "current": current.as_ref().map(Checksum::as_str),
            "backups": backups.iter().map(backup_json).collect::<Vec<_>>(),
        }))?;
    } else {
        print!(
            "{}",
            render_backup_list(&backups, current.as_ref(), app.ui.color, app.ui.unicode)
        );
    }
    Ok(())
}

/// The named backup, or one picked interactively
fn resolve_name(app: &App, name: Option<&str>, verb: &str) -> Result<Option<String>> {
    if let Some(name) = name {
        return Ok(Some(name.to_string()));
    }
    if !app.ui.interactive {
        bail!("name the backup to {verb} (see `grubwiz backup list`)");
    }
    let backups = app.backups.list_backups()?;
    if backups.is_empty() {
        bail!("no backups in {}", app.backups.dir().display());
    }
    prompt::select_backup(&app.ui, &format!("Backup to {verb}"), &backups)
}

fn delete(app: &App, name: Option<&str>, yes: bool) -> Result<()> {
    let Some(name) = resolve_name(app, name, "delete")? else {
        return Ok(());
    };
    if !yes {
        if !app.ui.interactive {
            bail!("refusing to delete {name} without --yes");
        }
        if !prompt::confirm(&app.ui, &format!("Delete {name} permanently?"), false)? {
            return Ok(());
        }
    }

    app.backups.delete_backup(&name)?;
    if app.ui.json {
        emit(json!({ "event": "backup_deleted", "name": name }))?;
    } else {
        println!("{} deleted {name}", Icon::Trash.colored(app.ui.color, app.ui.unicode));
    }
    Ok(())
}

fn restore(app: &App, name: Option<&str>, args: &CommitArgs) -> Result<()> {
    let Some(name) = resolve_name(app, name, "restore")? else {
        return Ok(());
    };
    let mut session = app.open_session()?;
    session.restore_from(&app.backups, &name)?;
    commit_session(app, &mut session, args, &format!("restore {name}"))
}
