use crossterm::style::Color;
use dialoguer::theme::Theme;
use grubwiz::Severity;
use std::fmt;

/// Design tokens for the grubwiz CLI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ADVISORY: &str = "ℹ";
    pub const ARROW: &str = "↳";
    pub const POINTER: &str = "›";
    pub const HIDDEN: &str = "◌";

    // Command identifiers (used in headers).
    pub const CHECK: &str = "🔍";
    pub const BACKUP: &str = "📦";
    pub const DIFF: &str = "Δ";
    pub const TRASH: &str = "🗑";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ADVISORY: &str = "[INFO]";
    pub const ARROW: &str = "[>]";
    pub const POINTER: &str = ">";
    pub const HIDDEN: &str = "[h]";

    pub const CHECK: &str = "[CHECK]";
    pub const BACKUP: &str = "[BACKUP]";
    pub const DIFF: &str = "[DIFF]";
    pub const TRASH: &str = "[DEL]";
}

/// Color for a severity label
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical | Severity::Error => colors::ERROR,
        Severity::Warning => colors::WARNING,
        Severity::Advisory => colors::INFO,
    }
}

/// Icon for a severity label
pub fn severity_icon(severity: Severity, unicode: bool) -> &'static str {
    match (unicode, severity) {
        (true, Severity::Critical | Severity::Error) => icons::ERROR,
        (true, Severity::Warning) => icons::WARNING,
        (true, Severity::Advisory) => icons::ADVISORY,
        (false, Severity::Critical | Severity::Error) => icons_ascii::ERROR,
        (false, Severity::Warning) => icons_ascii::WARNING,
        (false, Severity::Advisory) => icons_ascii::ADVISORY,
    }
}

// ----------------------------------------------------------------------------
// GrubwizTheme - dialoguer theme using the design tokens above
// ----------------------------------------------------------------------------

/// Custom theme for dialoguer prompts.
///
/// Wraps `ColorfulTheme` and overrides select items and validation errors
/// so they use the grubwiz icons, with ASCII fallbacks.
pub struct GrubwizTheme {
    unicode: bool,
    inner: dialoguer::theme::ColorfulTheme,
}

impl GrubwizTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            inner: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    /// Marker in front of the highlighted select item
    pub fn pointer_icon(&self) -> &'static str {
        if self.unicode {
            icons::POINTER
        } else {
            icons_ascii::POINTER
        }
    }

    pub fn error_icon(&self) -> &'static str {
        if self.unicode {
            icons::ERROR
        } else {
            icons_ascii::ERROR
        }
    }
}

impl Theme for GrubwizTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        write!(f, "{} {}", self.error_icon(), err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        self.inner.format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        self.inner
            .format_confirm_prompt_selection(f, prompt, selection)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        self.inner.format_input_prompt(f, prompt, default)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        self.inner.format_input_prompt_selection(f, prompt, sel)
    }

    fn format_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_select_prompt(f, prompt)
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        active: bool,
    ) -> fmt::Result {
        if active {
            write!(f, "{} {}", self.pointer_icon(), text)
        } else {
            write!(f, "  {}", text)
        }
    }
}
