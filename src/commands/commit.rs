use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use grubwiz::presentation::cli::DEFAULT_TAG;
use grubwiz::presentation::CommitArgs;
use grubwiz::{BackupDecision, BackupTag, CommitResult, EditSession, LocalFs};
use serde_json::json;

use super::App;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::json::emit;
use crate::ui::primitives::icon::Icon;
use crate::ui::prompt;
use crate::ui::views::backups::render_backup_state;
use crate::ui::views::check::{finding_json, render_check_summary, render_findings};
use crate::ui::views::diff::render_unified_diff;

const DIFF_CONTEXT: usize = 3;

/// Check, confirm and write the pending edits of `session`.
///
/// `action` names the edit in prompts and output, e.g. `set GRUB_TIMEOUT`.
pub fn commit_session(
    app: &App,
    session: &mut EditSession<LocalFs>,
    args: &CommitArgs,
    action: &str,
) -> Result<()> {
    let ui = &app.ui;

    if !session.is_dirty() {
        if ui.json {
            emit(json!({ "event": "commit", "action": action, "written": false, "changed": false }))?;
        } else {
            println!("{} nothing to change", Icon::Success.colored(ui.color, ui.unicode));
        }
        return Ok(());
    }

    // Reject a bad --tag before anything is shown or asked
    let explicit_tag = args.tag.as_deref().map(BackupTag::new).transpose()?;

    let suppressions = app.suppressions();
    let evaluation = session.evaluate(&app.registry(), suppressions.state());

    if !ui.json {
        print!("{}", render_unified_diff(&session.unified_diff(DIFF_CONTEXT), ui.color));
        let findings = render_findings(&evaluation, false, ui.color, ui.unicode);
        if !findings.is_empty() {
            println!();
            print!("{findings}");
        }
        println!();
        print!("{}", render_check_summary(&evaluation, ui.color, ui.unicode));
    }

    if evaluation.blocks_commit() && !args.force {
        if ui.json {
            emit(json!({
                "event": "commit",
                "action": action,
                "written": false,
                "blocked": true,
                "findings": evaluation.visible().map(finding_json).collect::<Vec<_>>(),
            }))?;
        }
        bail!("commit blocked by critical or error findings; use --force to write anyway");
    }

    if args.dry_run {
        if ui.json {
            emit(json!({
                "event": "commit",
                "action": action,
                "written": false,
                "dry_run": true,
                "diff": session.unified_diff(DIFF_CONTEXT),
            }))?;
        } else {
            println!("dry run: {} left unchanged", session.target().display());
        }
        return Ok(());
    }

    if !args.yes {
        if !ui.interactive {
            bail!("refusing to write {} without --yes", session.target().display());
        }
        let prompt = format!("{action}: write {}?", session.target().display());
        if !prompt::confirm(ui, &prompt, false)? {
            println!("aborted");
            return Ok(());
        }
    }

    let decision = match explicit_tag {
        Some(tag) => BackupDecision::Tag(tag),
        None => ask_for_backup(app, session, args)?,
    };

    let result = session.commit(&app.backups, decision)?;
    report_commit(app, session, &result, action)?;

    if result.written && !args.no_regenerate {
        regenerate(app)?;
    }
    Ok(())
}

/// Offer a backup when the content about to be replaced is in no backup
fn ask_for_backup(
    app: &App,
    session: &EditSession<LocalFs>,
    args: &CommitArgs,
) -> Result<BackupDecision> {
    let state = session.backup_state(&app.backups)?;
    tracing::debug!("current content: {}", render_backup_state(&state));
    if !state.needs_backup() || !app.config.backups.prompt_on_new_content {
        return Ok(BackupDecision::Skip);
    }
    if args.yes || !app.ui.interactive {
        tracing::info!("current content has no backup; skipping (pass --tag to keep one)");
        return Ok(BackupDecision::Skip);
    }

    let prompt = format!(
        "{} is not backed up. Backup tag (empty to skip)",
        session.target().display()
    );
    Ok(match prompt::backup_tag(&app.ui, &prompt, DEFAULT_TAG)? {
        Some(tag) => BackupDecision::Tag(tag),
        None => BackupDecision::Skip,
    })
}

fn report_commit(
    app: &App,
    session: &EditSession<LocalFs>,
    result: &CommitResult,
    action: &str,
) -> Result<()> {
    let ui = &app.ui;
    let backup_name = result.backup.as_ref().map(|b| b.backup().file_name());

    if ui.json {
        emit(json!({
            "event": "commit",
            "action": action,
            "written": result.written,
            "checksum": result.checksum.as_str(),
            "backup": backup_name,
            "file": session.target().display().to_string(),
        }))?;
        return Ok(());
    }

    let summary = ResultSummary::success(format!("Wrote {}", session.target().display()));
    print!("{}", summary.render(ui.color, ui.unicode));
    if let Some(name) = backup_name {
        println!("  {} backup {name}", Icon::Backup.colored(ui.color, ui.unicode));
    }
    Ok(())
}

/// Run `commit.regenerate`. Its outcome is reported, not interpreted.
fn regenerate(app: &App) -> Result<()> {
    let Some((program, args)) = app.config.commit.regenerate.split_first() else {
        return Ok(());
    };
    let shown = app.config.commit.regenerate.join(" ");
    tracing::info!("running {shown}");

    let mut command = Command::new(program);
    command.args(args);
    if app.ui.json {
        // Keep stdout for NDJSON events
        command.stdout(Stdio::from(std::io::stderr()));
    }
    let status = command
        .status()
        .with_context(|| format!("failed to start `{shown}`"))?;

    if app.ui.json {
        emit(json!({ "event": "regenerate", "command": shown, "success": status.success(), "code": status.code() }))?;
    } else if status.success() {
        println!("{} ran `{shown}`", Icon::Success.colored(app.ui.color, app.ui.unicode));
    }

    if !status.success() {
        bail!("file written, but `{shown}` failed ({status})");
    }
    Ok(())
}
