use crossterm::style::Stylize;

use crate::ui::theme;

/// Color a unified diff line by line. Without color the text is returned
/// unchanged.
pub fn render_unified_diff(unified: &str, supports_color: bool) -> String {
    if !supports_color {
        return unified.to_string();
    }

    let mut out = String::with_capacity(unified.len());
    for line in unified.split_inclusive('\n') {
        let body = line.trim_end_matches('\n');
        let styled = if body.starts_with("+++") || body.starts_with("---") {
            format!("{}", body.bold())
        } else if body.starts_with("@@") {
            format!("{}", body.with(theme::colors::INFO))
        } else if body.starts_with('+') {
            format!("{}", body.with(theme::colors::SUCCESS))
        } else if body.starts_with('-') {
            format!("{}", body.with(theme::colors::ERROR))
        } else {
            body.to_string()
        };
        out.push_str(&styled);
        if line.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
