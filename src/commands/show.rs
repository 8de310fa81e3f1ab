use anyhow::Result;

use super::App;
use crate::ui::json::emit;
use crate::ui::views::show::{render_settings, settings_json};

pub fn cmd_show(app: &App, all: bool) -> Result<()> {
    let session = app.open_session()?;
    let suppressions = app.suppressions();

    if app.ui.json {
        emit(settings_json(session.model(), suppressions.state(), all))?;
    } else {
        print!(
            "{}",
            render_settings(
                session.model(),
                suppressions.state(),
                all,
                app.ui.color,
                app.ui.unicode
            )
        );
    }
    Ok(())
}
