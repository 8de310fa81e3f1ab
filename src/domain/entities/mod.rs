//! Domain Entities
//!
//! - `ConfigModel` - The parsed GRUB defaults file
//! - `BackupName` / `Backup` - Snapshots in the backup directory
//! - `SuppressionState` - Hidden variables and suppressed findings

mod backup;
mod config_model;
mod suppression;

pub use backup::{Backup, BackupName};
pub use config_model::{is_valid_key, Assignment, ConfigEntry, ConfigModel, QuoteStyle};
pub use suppression::SuppressionState;
