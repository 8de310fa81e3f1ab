//! Validation engine
//!
//! Checks are read-only over the [`ConfigModel`] and report findings into a
//! [`FindingSink`]. The registry runs them all, marks suppressed findings,
//! and sorts the result for display.
//!
//! Every finding identity (`KEY.severity`) is owned by exactly one check, so
//! a suppression always refers to a single, well-defined condition.

mod checks;


use std::collections::HashMap;
use std::sync::Arc;

pub use checks::builtin_checks;

use crate::domain::entities::{ConfigModel, SuppressionState};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{FindingId, Severity};
use crate::error::{GrubwizError, GrubwizResult};

/// A rule over the whole configuration
pub trait Check: Send + Sync {
    /// Short, stable name used in logs and registry errors
    fn name(&self) -> &'static str;

    /// Every identity this check may report
    fn identities(&self) -> Vec<FindingId>;

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink);
}

/// Collects the findings of a single check.
///
/// Reports with the same identity are merged into one finding whose message
/// joins the individual messages with `"; "`.
#[derive(Debug, Default)]
pub struct FindingSink {
    reports: Vec<(FindingId, String)>,
}

impl FindingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, key: &str, severity: Severity, message: impl Into<String>) {
        let id = FindingId::new(key, severity);
        let message = message.into();
        match self.reports.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, text)) => {
                text.push_str("; ");
                text.push_str(&message);
            }
            None => self.reports.push((id, message)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    fn into_reports(self) -> Vec<(FindingId, String)> {
        self.reports
    }
}

/// A single validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    id: FindingId,
    message: String,
    suppressed: bool,
}

impl Finding {
    pub fn id(&self) -> &FindingId {
        &self.id
    }

    pub fn key(&self) -> &str {
        self.id.key()
    }

    pub fn severity(&self) -> Severity {
        self.id.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

/// Sorted findings of one evaluation, suppressed ones included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    findings: Vec<Finding>,
}

impl Evaluation {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings not suppressed
    pub fn visible(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.suppressed)
    }

    /// Findings the user has suppressed
    pub fn suppressed(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.suppressed)
    }

    /// Number of unsuppressed findings of `severity`
    pub fn count(&self, severity: Severity) -> usize {
        self.visible().filter(|f| f.severity() == severity).count()
    }

    /// True when an unsuppressed critical or error finding exists
    pub fn blocks_commit(&self) -> bool {
        self.visible().any(|f| f.severity().blocks_commit())
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn get(&self, id: &FindingId) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == *id)
    }
}

/// Ordered set of checks with unique finding identities
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
    owners: HashMap<FindingId, &'static str>,
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.checks.iter().map(|c| c.name()))
            .finish()
    }
}

impl CheckRegistry {
    /// A registry with no checks
    pub fn empty() -> Self {
        Self {
            checks: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Built-in checks; `fs` is used only for theme/background path lookups
    pub fn builtin(fs: Arc<dyn FileSystem>) -> Self {
        let mut registry = Self::empty();
        for check in builtin_checks(fs) {
            if let Err(err) = registry.register(check) {
                tracing::error!("skipping built-in check: {err}");
            }
        }
        registry
    }

    /// Add a check, rejecting identities already owned by another check
    pub fn register(&mut self, check: Box<dyn Check>) -> GrubwizResult<()> {
        let identities = check.identities();
        for id in &identities {
            if let Some(owner) = self.owners.get(id) {
                return Err(GrubwizError::DuplicateFindingIdentity {
                    id: id.to_string(),
                    owner: owner.to_string(),
                });
            }
        }
        for id in identities {
            self.owners.insert(id, check.name());
        }
        self.checks.push(check);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// All identities any registered check may report
    pub fn identities(&self) -> impl Iterator<Item = &FindingId> {
        self.owners.keys()
    }

    /// Run every check and sort the findings for display.
    ///
    /// Order: severity (critical first), then first appearance of the key in
    /// the file (absent keys last), then key, then registration order.
    pub fn evaluate(&self, model: &ConfigModel, suppressions: &SuppressionState) -> Evaluation {
        let mut findings = Vec::new();
        for check in &self.checks {
            let mut sink = FindingSink::new();
            check.run(model, &mut sink);
            for (id, message) in sink.into_reports() {
                if self.owners.get(&id) != Some(&check.name()) {
                    tracing::warn!(
                        check = check.name(),
                        "dropping finding {id} not declared by its check"
                    );
                    continue;
                }
                let suppressed = suppressions.is_suppressed(&id);
                findings.push(Finding {
                    id,
                    message,
                    suppressed,
                });
            }
        }

        findings.sort_by(|a, b| {
            let pos = |f: &Finding| model.position(f.key()).unwrap_or(usize::MAX);
            a.severity()
                .cmp(&b.severity())
                .then_with(|| pos(a).cmp(&pos(b)))
                .then_with(|| a.key().cmp(b.key()))
        });

        tracing::debug!(
            total = findings.len(),
            suppressed = findings.iter().filter(|f| f.suppressed).count(),
            "evaluated configuration"
        );
        Evaluation { findings }
    }
}
