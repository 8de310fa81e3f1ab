use grubwiz::{Backup, BackupState, Checksum};
use serde_json::json;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Backups oldest first, one per line; the one matching `current` is marked
pub fn render_backup_list(
    backups: &[Backup],
    current: Option<&Checksum>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if backups.is_empty() {
        return format!("{}\n", ColoredText::dim("no backups").render(supports_color));
    }

    let mut out = String::new();
    for backup in backups {
        let name = backup.name();
        let is_current = current == Some(name.checksum());
        let marker = if is_current {
            Icon::Success.colored(supports_color, supports_unicode)
        } else {
            " ".repeat(Icon::Success.render(supports_unicode).chars().count())
        };
        out.push_str(&format!(
            "{} {}  {}  {}\n",
            marker,
            ColoredText::dim(name.timestamp().format("%Y-%m-%d %H:%M:%S").to_string())
                .render(supports_color),
            ColoredText::info(format!("{:<12}", name.tag().as_str())).render(supports_color),
            backup.file_name()
        ));
    }
    out
}

/// One-line description of how the file relates to the backups
pub fn render_backup_state(state: &BackupState) -> String {
    match state {
        BackupState::Empty => "no backups yet".to_string(),
        BackupState::UpToDate(b) => format!("matches the latest backup ({})", b.file_name()),
        BackupState::Known(b) => format!("matches backup {}", b.file_name()),
        BackupState::NewContent => "content is not in any backup".to_string(),
    }
}

pub fn backup_json(backup: &Backup) -> serde_json::Value {
    let name = backup.name();
    json!({
        "name": backup.file_name(),
        "timestamp": name.timestamp().format("%Y-%m-%dT%H:%M:%S").to_string(),
        "checksum": name.checksum().as_str(),
        "tag": name.tag().as_str(),
        "path": backup.path().display().to_string(),
    })
}
