use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Advisory,
    Arrow,
    Hidden,
    Check,
    Backup,
    Diff,
    Trash,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Advisory) => theme::icons::ADVISORY,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Hidden) => theme::icons::HIDDEN,
            (true, Icon::Check) => theme::icons::CHECK,
            (true, Icon::Backup) => theme::icons::BACKUP,
            (true, Icon::Diff) => theme::icons::DIFF,
            (true, Icon::Trash) => theme::icons::TRASH,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Advisory) => theme::icons_ascii::ADVISORY,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Hidden) => theme::icons_ascii::HIDDEN,
            (false, Icon::Check) => theme::icons_ascii::CHECK,
            (false, Icon::Backup) => theme::icons_ascii::BACKUP,
            (false, Icon::Diff) => theme::icons_ascii::DIFF,
            (false, Icon::Trash) => theme::icons_ascii::TRASH,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Trash => theme::colors::WARNING,
            Icon::Advisory | Icon::Check | Icon::Backup | Icon::Diff => theme::colors::INFO,
            Icon::Arrow | Icon::Hidden => theme::colors::DIM,
        };
        format!("{}", s.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Success.render(false), theme::icons_ascii::SUCCESS);
    }

    #[test]
    fn icon_renders_unicode_when_supported() {
        assert_eq!(Icon::Warning.render(true), theme::icons::WARNING);
    }

    #[test]
    fn uncolored_icon_has_no_escape() {
        assert_eq!(Icon::Backup.colored(false, false), "[BACKUP]");
    }
}
