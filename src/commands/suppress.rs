use anyhow::Result;
use grubwiz::presentation::{normalize_finding_id, normalize_key};
use grubwiz::FindingId;
use serde_json::json;

use super::App;
use crate::ui::json::emit;
use crate::ui::primitives::icon::Icon;

fn report(app: &App, event: &str, subject: &str, changed: bool, done: &str, already: &str) -> Result<()> {
    if app.ui.json {
        emit(json!({ "event": event, "subject": subject, "changed": changed }))?;
    } else if changed {
        println!("{} {subject} {done}", Icon::Success.colored(app.ui.color, app.ui.unicode));
    } else {
        println!("{subject} {already}");
    }
    Ok(())
}

pub fn cmd_hide(app: &App, key: &str) -> Result<()> {
    let key = normalize_key(key);
    let changed = app.suppressions().hide_param(&key)?;
    report(app, "hide", &key, changed, "hidden", "was already hidden")
}

pub fn cmd_unhide(app: &App, key: &str) -> Result<()> {
    let key = normalize_key(key);
    let changed = app.suppressions().show_param(&key)?;
    report(app, "unhide", &key, changed, "shown again", "was not hidden")
}

pub fn cmd_suppress(app: &App, id: &str) -> Result<()> {
    let id = normalize_finding_id(id);
    let parsed = FindingId::parse(&id)?;
    if !app.registry().identities().any(|known| *known == parsed) {
        tracing::warn!("no check reports {id}; suppressing anyway");
    }
    let changed = app.suppressions().suppress_finding(&id)?;
    report(app, "suppress", &id, changed, "suppressed", "was already suppressed")
}

pub fn cmd_unsuppress(app: &App, id: &str) -> Result<()> {
    let id = normalize_finding_id(id);
    let changed = app.suppressions().unsuppress_finding(&id)?;
    report(app, "unsuppress", &id, changed, "no longer suppressed", "was not suppressed")
}

pub fn cmd_reset(app: &App) -> Result<()> {
    let changed = app.suppressions().show_all()?;
    report(
        app,
        "reset",
        "all hidden variables and suppressed findings",
        changed,
        "cleared",
        "were already clear",
    )
}
