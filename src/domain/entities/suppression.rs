//! Suppression state entity
//!
//! Two independent sets: variables hidden from the editing view, and
//! finding identities whose findings are marked suppressed. Neither set
//! changes what the validation engine computes.

use std::collections::BTreeSet;

use crate::domain::entities::is_valid_key;
use crate::domain::value_objects::FindingId;
use crate::error::{GrubwizError, GrubwizResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionState {
    hidden_params: BTreeSet<String>,
    suppressed_findings: BTreeSet<String>,
}

impl SuppressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_sets(
        hidden_params: BTreeSet<String>,
        suppressed_findings: BTreeSet<String>,
    ) -> Self {
        Self {
            hidden_params,
            suppressed_findings,
        }
    }

    pub fn hidden_params(&self) -> &BTreeSet<String> {
        &self.hidden_params
    }

    pub fn suppressed_findings(&self) -> &BTreeSet<String> {
        &self.suppressed_findings
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_params.contains(key)
    }

    pub fn is_suppressed(&self, id: &FindingId) -> bool {
        self.suppressed_findings.contains(&id.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.hidden_params.is_empty() && self.suppressed_findings.is_empty()
    }

    /// Returns whether the set changed
    pub fn hide_param(&mut self, key: &str) -> GrubwizResult<bool> {
        if !is_valid_key(key) {
            return Err(GrubwizError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.hidden_params.insert(key.to_string()))
    }

    pub fn show_param(&mut self, key: &str) -> bool {
        self.hidden_params.remove(key)
    }

    pub fn suppress_finding(&mut self, id: &FindingId) -> bool {
        self.suppressed_findings.insert(id.to_string())
    }

    pub fn unsuppress_finding(&mut self, id: &FindingId) -> bool {
        self.suppressed_findings.remove(&id.to_string())
    }

    /// Clear both sets
    pub fn show_all(&mut self) -> bool {
        let changed = !self.is_empty();
        self.hidden_params.clear();
        self.suppressed_findings.clear();
        changed
    }
}
