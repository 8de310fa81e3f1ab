use anyhow::Result;

use super::App;
use crate::ui::json::emit;
use crate::ui::views::check::{
    evaluation_json, render_check_header, render_check_summary, render_findings,
};

/// Evaluate the file as it is on disk. Exits with status 1 when a critical
/// or error finding is not suppressed.
pub fn cmd_check(app: &App, all: bool) -> Result<()> {
    let ui = &app.ui;
    let session = app.open_session()?;
    let suppressions = app.suppressions();
    let evaluation = session.evaluate(&app.registry(), suppressions.state());

    if ui.json {
        emit(evaluation_json(session.target(), &evaluation))?;
    } else {
        print!("{}", render_check_header(session.target(), ui.color, ui.unicode));
        let findings = render_findings(&evaluation, all, ui.color, ui.unicode);
        if !findings.is_empty() {
            println!();
            print!("{findings}");
        }
        print!("\n{}", render_check_summary(&evaluation, ui.color, ui.unicode));
    }

    if evaluation.blocks_commit() {
        std::process::exit(1);
    }
    Ok(())
}
