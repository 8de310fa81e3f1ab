//! Error types for grubwiz
//!
//! Uses `thiserror` for library errors. Validation findings are never
//! errors; they are returned as data by the validation engine.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::Checksum;

/// Result type alias for grubwiz operations
pub type GrubwizResult<T> = Result<T, GrubwizError>;

/// Main error type for grubwiz operations
#[derive(Error, Debug)]
pub enum GrubwizError {
    /// Content could not be decoded as text
    #[error("configuration is not valid UTF-8 text (byte offset {offset}): {message}")]
    Parse { offset: usize, message: String },

    /// Backup tag outside `[-_A-Za-z0-9]{1,64}`
    #[error("invalid backup tag '{tag}' - use 1-64 characters from [-_A-Za-z0-9]")]
    InvalidTag { tag: String },

    /// A backup with the identical name already exists
    #[error("backup '{name}' already exists")]
    BackupCollision { name: String },

    /// Backup missing from the backup directory
    #[error("backup not found: {name}")]
    NotFound { name: String },

    /// Backup exists but cannot be read or fails its checksum
    #[error("backup '{name}' is corrupt: {message}")]
    Corrupt { name: String, message: String },

    /// Target file changed on disk since it was loaded
    #[error(
        "{path} was modified by another program (loaded {expected}, now {found}) - reload before committing"
    )]
    ConcurrentModification {
        path: PathBuf,
        expected: Checksum,
        found: Checksum,
    },

    /// Suppression store or backup could not be persisted
    #[error("failed to persist {path}: {message}")]
    PersistenceWrite { path: PathBuf, message: String },

    /// Target configuration file does not exist
    #[error("configuration file not found: {path}")]
    TargetMissing { path: PathBuf },

    /// Variable name is not a shell identifier in upper case
    #[error("invalid variable name '{key}' - expected [A-Z_][A-Z0-9_]*")]
    InvalidKey { key: String },

    /// Value rejected for a variable (line breaks, or outside its known format)
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Finding identity not of the form `KEY.severity`
    #[error("invalid finding id '{id}' - expected KEY.severity (e.g. GRUB_TIMEOUT.error)")]
    InvalidFindingId { id: String },

    /// Two registered checks declare the same finding identity
    #[error("finding identity '{id}' is already claimed by check '{owner}'")]
    DuplicateFindingIdentity { id: String, owner: String },

    /// Invalid application configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// File system failure not covered by a more specific variant
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
