//! Finding identity value object

use std::fmt;

use super::Severity;
use crate::domain::entities::is_valid_key;
use crate::error::{GrubwizError, GrubwizResult};

/// Stable identity of a finding: `<KEY>.<severity>`.
///
/// Including the severity keeps a suppression aimed at an advisory from
/// hiding a critical finding on the same variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FindingId {
    key: String,
    severity: Severity,
}

impl FindingId {
    pub fn new(key: impl Into<String>, severity: Severity) -> Self {
        Self {
            key: key.into(),
            severity,
        }
    }

    /// Parse `KEY.severity`
    pub fn parse(s: &str) -> GrubwizResult<Self> {
        let invalid = || GrubwizError::InvalidFindingId { id: s.to_string() };
        let (key, sev) = s.rsplit_once('.').ok_or_else(invalid)?;
        let severity = Severity::parse(sev).ok_or_else(invalid)?;
        if !is_valid_key(key) {
            return Err(invalid());
        }
        Ok(Self::new(key, severity))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.key, self.severity)
    }
}
