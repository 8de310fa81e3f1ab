//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory) and config dir lookup
//! - `repositories/` - Backup directory and suppression file

pub mod fs;
pub mod repositories;

pub use fs::{LocalFs, MemoryFs};
pub use repositories::{BackupManager, BackupOutcome, BackupState, SuppressionStore};
