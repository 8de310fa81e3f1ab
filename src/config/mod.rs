//! Configuration module for grubwiz
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GRUBWIZ_*)
//! 3. User config (~/.config/grubwiz/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, ENV_BACKUP_DIR, ENV_SUPPRESSIONS, ENV_TARGET};
pub use types::{
    BackupsConfig, ColorMode, CommitConfig, Config, OutputConfig, PathsConfig, DEFAULT_TARGET,
};
