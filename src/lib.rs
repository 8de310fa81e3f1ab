//! grubwiz - safe editing of the GRUB defaults file
//!
//! grubwiz loads `/etc/default/grub` into a model that re-serializes
//! byte-for-byte, screens edits with a registry of validation checks, and
//! takes content-addressed backups before anything is written.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{BackupDecision, CommitResult, EditSession};
pub use config::Config;
pub use domain::entities::{Backup, BackupName, ConfigModel, QuoteStyle, SuppressionState};
pub use domain::policies::{param_catalog, ParamSpec};
pub use domain::services::{parse, serialize, CheckRegistry, Evaluation, Finding};
pub use domain::value_objects::{BackupTag, Checksum, FindingId, Severity};
pub use error::{GrubwizError, GrubwizResult};
pub use infrastructure::{BackupManager, BackupOutcome, BackupState, LocalFs, MemoryFs, SuppressionStore};
