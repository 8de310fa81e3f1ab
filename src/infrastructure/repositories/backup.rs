//! Backup Repository
//!
//! Owns the backup directory. Backups are plain files named
//! `YYYYMMDD.HHMMSS.<checksum>.<tag>.txt` holding the exact bytes of the
//! configuration file at the time. Files are only ever created (no-clobber)
//! or explicitly deleted, never rewritten.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::domain::entities::{Backup, BackupName};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::{BackupTag, Checksum};
use crate::error::{GrubwizError, GrubwizResult};

/// Result of a create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new file was written
    Created(Backup),
    /// An identically named backup was already present
    Existing(Backup),
}

impl BackupOutcome {
    pub fn backup(&self) -> &Backup {
        match self {
            BackupOutcome::Created(b) | BackupOutcome::Existing(b) => b,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, BackupOutcome::Created(_))
    }
}

/// How some content relates to the backup history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupState {
    /// No backups exist
    Empty,
    /// Content matches the most recent backup
    UpToDate(Backup),
    /// Content matches an older backup
    Known(Backup),
    /// Content is not in any backup; the caller should offer to take one
    NewContent,
}

impl BackupState {
    /// Only content missing from the history is worth prompting for
    pub fn needs_backup(&self) -> bool {
        matches!(self, BackupState::NewContent)
    }
}

/// Backup/restore manager for a single backup directory
#[derive(Debug, Clone)]
pub struct BackupManager<F: FileSystem> {
    fs: F,
    dir: PathBuf,
}

impl<F: FileSystem> BackupManager<F> {
    pub fn new(fs: F, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn backup_for(&self, name: BackupName) -> Backup {
        let path = self.dir.join(name.to_string());
        Backup::new(name, path)
    }

    /// All backups, oldest first. Files that do not match the naming
    /// pattern are ignored.
    pub fn list_backups(&self) -> GrubwizResult<Vec<Backup>> {
        let names = match self.fs.list_files(&self.dir) {
            Ok(names) => names,
            Err(FsError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut parsed: Vec<BackupName> = names
            .iter()
            .filter_map(|n| {
                let name = BackupName::parse(n);
                if name.is_none() {
                    tracing::trace!("ignoring foreign file in backup dir: {n}");
                }
                name
            })
            .collect();
        parsed.sort();
        Ok(parsed.into_iter().map(|n| self.backup_for(n)).collect())
    }

    /// Most recent backup
    pub fn latest(&self) -> GrubwizResult<Option<Backup>> {
        Ok(self.list_backups()?.pop())
    }

    /// Back up `content` now under `tag`
    pub fn create_backup(&self, content: &[u8], tag: &str) -> GrubwizResult<BackupOutcome> {
        let tag = BackupTag::new(tag)?;
        self.create_backup_at(content, &tag, Local::now().naive_local())
    }

    /// Back up `content` under an explicit timestamp.
    ///
    /// Creating the same (second, content, tag) twice yields one file; the
    /// second call reports `Existing`.
    pub fn create_backup_at(
        &self,
        content: &[u8],
        tag: &BackupTag,
        timestamp: NaiveDateTime,
    ) -> GrubwizResult<BackupOutcome> {
        let name = BackupName::new(timestamp, Checksum::from_bytes(content), tag.clone());
        let backup = self.backup_for(name);
        match self.write_backup(&backup, content) {
            Ok(()) => {
                tracing::info!("created backup {}", backup.file_name());
                Ok(BackupOutcome::Created(backup))
            }
            Err(GrubwizError::BackupCollision { name }) => {
                tracing::debug!("backup {name} already exists");
                Ok(BackupOutcome::Existing(backup))
            }
            Err(e) => Err(e),
        }
    }

    fn write_backup(&self, backup: &Backup, content: &[u8]) -> GrubwizResult<()> {
        let persist = |e: FsError| GrubwizError::PersistenceWrite {
            path: backup.path().to_path_buf(),
            message: e.to_string(),
        };
        self.fs.create_dir_all(&self.dir).map_err(persist)?;
        match self.fs.write_new(backup.path(), content) {
            Ok(()) => Ok(()),
            Err(FsError::AlreadyExists(_)) => Err(GrubwizError::BackupCollision {
                name: backup.file_name(),
            }),
            Err(e) => Err(persist(e)),
        }
    }

    /// Permanently remove a backup
    pub fn delete_backup(&self, name: &str) -> GrubwizResult<()> {
        let not_found = || GrubwizError::NotFound {
            name: name.to_string(),
        };
        let parsed = BackupName::parse(name).ok_or_else(not_found)?;
        let backup = self.backup_for(parsed);
        match self.fs.remove(backup.path()) {
            Ok(()) => {
                tracing::info!("deleted backup {name}");
                Ok(())
            }
            Err(FsError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(GrubwizError::PersistenceWrite {
                path: backup.path().to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Bytes of a backup, verified against the checksum in its name
    pub fn restore(&self, name: &str) -> GrubwizResult<Vec<u8>> {
        let parsed = BackupName::parse(name).ok_or_else(|| GrubwizError::NotFound {
            name: name.to_string(),
        })?;
        let backup = self.backup_for(parsed);
        let content = match self.fs.read(backup.path()) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => {
                return Err(GrubwizError::NotFound {
                    name: name.to_string(),
                })
            }
            Err(e) => {
                return Err(GrubwizError::Corrupt {
                    name: name.to_string(),
                    message: e.to_string(),
                })
            }
        };

        let expected = backup.name().checksum();
        if !expected.matches(&content) {
            return Err(GrubwizError::Corrupt {
                name: name.to_string(),
                message: format!(
                    "content checksum {} does not match {}",
                    Checksum::from_bytes(&content),
                    expected
                ),
            });
        }
        Ok(content)
    }

    /// Relate `content` to the backup history
    pub fn assess(&self, content: &[u8]) -> GrubwizResult<BackupState> {
        let backups = self.list_backups()?;
        let checksum = Checksum::from_bytes(content);
        let Some(latest) = backups.last() else {
            return Ok(BackupState::Empty);
        };
        if *latest.name().checksum() == checksum {
            return Ok(BackupState::UpToDate(latest.clone()));
        }
        Ok(backups
            .iter()
            .rev()
            .find(|b| *b.name().checksum() == checksum)
            .map(|b| BackupState::Known(b.clone()))
            .unwrap_or(BackupState::NewContent))
    }

    /// Take the `orig` backup when the directory has none
    pub fn ensure_initial(&self, content: &[u8]) -> GrubwizResult<BackupState> {
        match self.assess(content)? {
            BackupState::Empty => {
                let outcome = self.create_backup_at(
                    content,
                    &BackupTag::original(),
                    Local::now().naive_local(),
                )?;
                Ok(BackupState::UpToDate(outcome.backup().clone()))
            }
            state => Ok(state),
        }
    }
}
