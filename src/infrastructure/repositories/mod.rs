//! Repository Implementations
//!
//! Persistence for backups and suppressions, both through the FileSystem port.

mod backup;
mod suppression;

pub use backup::{BackupManager, BackupOutcome, BackupState};
pub use suppression::SuppressionStore;
