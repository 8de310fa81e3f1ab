//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GrubwizResult;
use crate::infrastructure::fs::{grubwiz_app_dir, APP_DIR};

use super::loader::{self, ConfigWarning};

/// GRUB defaults file edited when nothing else is configured
pub const DEFAULT_TARGET: &str = "/etc/default/grub";

/// File locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_target")]
    pub target: PathBuf,

    /// Defaults to `<config dir>/grubwiz/backups`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Defaults to `<config dir>/grubwiz/hidden-items.toml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppressions: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            backup_dir: None,
            suppressions: None,
        }
    }
}

fn default_target() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET)
}

/// Backup behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupsConfig {
    /// Offer a tagged backup before committing over content that is not
    /// in the backup history yet
    #[serde(default = "default_true")]
    pub prompt_on_new_content: bool,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            prompt_on_new_content: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Commit behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CommitConfig {
    /// Command run after a successful commit, e.g. `["update-grub"]`
    #[serde(default)]
    pub regenerate: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub backups: BackupsConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GrubwizResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GrubwizResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Defaults, then the user config file, then `GRUBWIZ_*` variables
    pub fn load_layered(explicit: Option<&Path>) -> GrubwizResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(explicit)
    }

    /// Apply environment variable overrides (GRUBWIZ_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |name| std::env::var_os(name))
    }

    /// `<config dir>/grubwiz/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        grubwiz_app_dir().map(|dir| dir.join("config.toml"))
    }

    /// Backup directory after applying the default
    pub fn backup_dir(&self) -> PathBuf {
        self.paths
            .backup_dir
            .clone()
            .unwrap_or_else(|| app_dir().join("backups"))
    }

    /// Suppression file after applying the default
    pub fn suppressions_path(&self) -> PathBuf {
        self.paths
            .suppressions
            .clone()
            .unwrap_or_else(|| app_dir().join("hidden-items.toml"))
    }
}

fn app_dir() -> PathBuf {
    grubwiz_app_dir().unwrap_or_else(|| {
        tracing::warn!("no config directory for this user, using ./{APP_DIR}");
        PathBuf::from(APP_DIR)
    })
}
