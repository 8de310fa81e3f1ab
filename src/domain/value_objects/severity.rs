//! Finding severity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation finding.
///
/// Variants are declared in display order, so the derived `Ord` sorts
/// critical findings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Leaves the machine unbootable or the menu unreachable
    Critical,
    /// Contradictory settings that GRUB will not honour as written
    Error,
    /// Works, but hides diagnostics or is fragile
    Warning,
    /// Suggestions
    Advisory,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Advisory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Advisory => "advisory",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sev| sev.as_str() == s)
    }

    /// Critical and error findings gate a commit unless suppressed
    pub fn blocks_commit(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
