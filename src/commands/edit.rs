use anyhow::{bail, Result};
use grubwiz::param_catalog;
use grubwiz::presentation::{normalize_key, CommitArgs};
use serde_json::json;

use super::commit::commit_session;
use super::App;
use crate::ui::json::emit;

pub fn cmd_get(app: &App, key: &str) -> Result<()> {
    let key = normalize_key(key);
    let session = app.open_session()?;
    let value = session.model().get(&key);

    if app.ui.json {
        emit(json!({ "event": "get", "key": key, "value": value }))?;
    }
    match value {
        Some(value) => {
            if !app.ui.json {
                println!("{value}");
            }
            Ok(())
        }
        None => bail!("{key} is not set in {}", app.target().display()),
    }
}

pub fn cmd_set(app: &App, key: &str, value: &str, args: &CommitArgs) -> Result<()> {
    let key = normalize_key(key);
    param_catalog::validate_input(&key, value)?;
    let mut session = app.open_session()?;
    session.set(&key, value)?;
    commit_session(app, &mut session, args, &format!("set {key}"))
}

pub fn cmd_unset(app: &App, key: &str, args: &CommitArgs) -> Result<()> {
    let key = normalize_key(key);
    let mut session = app.open_session()?;
    if !session.unset(&key) {
        tracing::debug!("{key} was not set");
    }
    commit_session(app, &mut session, args, &format!("unset {key}"))
}
