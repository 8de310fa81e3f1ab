//! TOML Suppression Repository
//!
//! Persists [`SuppressionState`] as two comma-separated lists:
//!
//! ```toml
//! params = "GRUB_BADRAM,GRUB_GFXMODE"
//! warns = "GRUB_GFXMODE.advisory"
//! ```
//!
//! Every mutation rewrites the whole file atomically. A failed write is
//! reported but the in-memory change stays, so the caller can warn that it
//! will not survive a restart.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::SuppressionState;
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::FindingId;
use crate::error::{GrubwizError, GrubwizResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct HiddenItemsFile {
    #[serde(default)]
    params: String,
    #[serde(default)]
    warns: String,
}

fn split_list(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_list(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

/// Suppression state bound to its file
#[derive(Debug)]
pub struct SuppressionStore<F: FileSystem> {
    fs: F,
    path: PathBuf,
    state: SuppressionState,
}

impl<F: FileSystem> SuppressionStore<F> {
    /// Empty state that saves to `path`; nothing is read
    pub fn empty(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            state: SuppressionState::new(),
        }
    }

    /// Load from `path`. An absent file yields empty sets; an unreadable or
    /// unparsable one is `Corrupt`.
    pub fn load(fs: F, path: impl Into<PathBuf>) -> GrubwizResult<Self> {
        let path = path.into();
        let corrupt = |message: String| GrubwizError::Corrupt {
            name: path.display().to_string(),
            message,
        };

        let bytes = match fs.read(&path) {
            Ok(bytes) => bytes,
            Err(FsError::NotFound(_)) => {
                tracing::debug!("no suppression file at {}", path.display());
                return Ok(Self::empty(fs, path));
            }
            Err(e) => return Err(corrupt(e.to_string())),
        };
        let text = String::from_utf8(bytes).map_err(|e| corrupt(e.to_string()))?;
        let file: HiddenItemsFile = toml::from_str(&text).map_err(|e| corrupt(e.to_string()))?;

        let state = SuppressionState::from_sets(split_list(&file.params), split_list(&file.warns));
        Ok(Self { fs, path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SuppressionState {
        &self.state
    }

    /// Rewrite the file from the in-memory state
    pub fn save(&self) -> GrubwizResult<()> {
        let persist = |message: String| GrubwizError::PersistenceWrite {
            path: self.path.clone(),
            message,
        };
        let file = HiddenItemsFile {
            params: join_list(self.state.hidden_params()),
            warns: join_list(self.state.suppressed_findings()),
        };
        let text = toml::to_string(&file).map_err(|e| persist(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(dir)
                .map_err(|e| persist(e.to_string()))?;
        }
        self.fs
            .write_atomic(&self.path, text.as_bytes())
            .map_err(|e| persist(e.to_string()))?;
        tracing::debug!("saved suppressions to {}", self.path.display());
        Ok(())
    }

    pub fn hide_param(&mut self, key: &str) -> GrubwizResult<bool> {
        let changed = self.state.hide_param(key)?;
        self.save()?;
        Ok(changed)
    }

    pub fn show_param(&mut self, key: &str) -> GrubwizResult<bool> {
        let changed = self.state.show_param(key);
        self.save()?;
        Ok(changed)
    }

    /// Suppress by identity string (`KEY.severity`)
    pub fn suppress_finding(&mut self, id: &str) -> GrubwizResult<bool> {
        let id = FindingId::parse(id)?;
        let changed = self.state.suppress_finding(&id);
        self.save()?;
        Ok(changed)
    }

    pub fn unsuppress_finding(&mut self, id: &str) -> GrubwizResult<bool> {
        let id = FindingId::parse(id)?;
        let changed = self.state.unsuppress_finding(&id);
        self.save()?;
        Ok(changed)
    }

    /// Clear both sets with a single save
    pub fn show_all(&mut self) -> GrubwizResult<bool> {
        let changed = self.state.show_all();
        self.save()?;
        Ok(changed)
    }
}
