//! Edit session for the target configuration file
//!
//! Load, edit, check, commit. The session remembers the exact bytes it
//! loaded; commit refuses to write when the file on disk no longer matches
//! them.

use std::path::{Path, PathBuf};

use crate::domain::entities::{ConfigModel, SuppressionState};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::services::{parse, serialize, CheckRegistry, DiffResult, Differ, Evaluation};
use crate::domain::value_objects::{BackupTag, Checksum};
use crate::error::{GrubwizError, GrubwizResult};
use crate::infrastructure::repositories::{BackupManager, BackupOutcome, BackupState};

/// Whether to snapshot the superseded content on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupDecision {
    Skip,
    Tag(BackupTag),
}

/// What a commit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    /// Backup taken of the previous content, if one was requested
    pub backup: Option<BackupOutcome>,
    /// False when the model matched the file and nothing was written
    pub written: bool,
    /// Checksum of the file as it now stands
    pub checksum: Checksum,
}

/// An open configuration file and its pending edits
#[derive(Debug)]
pub struct EditSession<F: FileSystem> {
    fs: F,
    target: PathBuf,
    model: ConfigModel,
    loaded: Vec<u8>,
    loaded_checksum: Checksum,
}

impl<F: FileSystem> EditSession<F> {
    /// Read and parse `target`, then make sure the backup directory holds at
    /// least one snapshot.
    pub fn open<B: FileSystem>(
        fs: F,
        target: impl Into<PathBuf>,
        backups: &BackupManager<B>,
    ) -> GrubwizResult<Self> {
        let target = target.into();
        let loaded = read_target(&fs, &target)?;
        let model = parse(&loaded)?;
        let state = backups.ensure_initial(&loaded)?;
        tracing::debug!(
            "opened {} ({} entries, backups: {:?})",
            target.display(),
            model.len(),
            state
        );
        let loaded_checksum = Checksum::from_bytes(&loaded);
        Ok(Self {
            fs,
            target,
            model,
            loaded,
            loaded_checksum,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn model(&self) -> &ConfigModel {
        &self.model
    }

    /// Bytes as last loaded from or written to disk
    pub fn loaded(&self) -> &[u8] {
        &self.loaded
    }

    pub fn loaded_checksum(&self) -> &Checksum {
        &self.loaded_checksum
    }

    pub fn set(&mut self, key: &str, value: &str) -> GrubwizResult<bool> {
        self.model.set(key, value)
    }

    pub fn unset(&mut self, key: &str) -> bool {
        self.model.unset(key)
    }

    pub fn evaluate(&self, registry: &CheckRegistry, suppressions: &SuppressionState) -> Evaluation {
        registry.evaluate(&self.model, suppressions)
    }

    /// Serialized model, i.e. what a commit would write
    pub fn pending(&self) -> Vec<u8> {
        serialize(&self.model)
    }

    pub fn is_dirty(&self) -> bool {
        self.pending() != self.loaded
    }

    /// Line diff from the loaded content to the pending content
    pub fn diff(&self) -> DiffResult {
        Differ::new().diff(
            &String::from_utf8_lossy(&self.loaded),
            &String::from_utf8_lossy(&self.pending()),
        )
    }

    /// Unified diff text for display
    pub fn unified_diff(&self, context: usize) -> String {
        let label = self.target.display().to_string();
        Differ::new().unified(
            &String::from_utf8_lossy(&self.loaded),
            &String::from_utf8_lossy(&self.pending()),
            &label,
            &format!("{label} (pending)"),
            context,
        )
    }

    /// Relate the content a commit would supersede to the backup history
    pub fn backup_state<B: FileSystem>(
        &self,
        backups: &BackupManager<B>,
    ) -> GrubwizResult<BackupState> {
        backups.assess(&self.loaded)
    }

    /// Write the model to disk.
    ///
    /// Fails with `ConcurrentModification` when the file changed since it
    /// was loaded; in that case nothing is backed up or written.
    pub fn commit<B: FileSystem>(
        &mut self,
        backups: &BackupManager<B>,
        decision: BackupDecision,
    ) -> GrubwizResult<CommitResult> {
        let on_disk = read_target(&self.fs, &self.target)?;
        let found = Checksum::from_bytes(&on_disk);
        if found != self.loaded_checksum || on_disk != self.loaded {
            return Err(GrubwizError::ConcurrentModification {
                path: self.target.clone(),
                expected: self.loaded_checksum.clone(),
                found,
            });
        }

        let backup = match decision {
            BackupDecision::Skip => None,
            BackupDecision::Tag(tag) => {
                Some(backups.create_backup_at(&self.loaded, &tag, chrono::Local::now().naive_local())?)
            }
        };

        let pending = self.pending();
        let written = pending != self.loaded;
        if written {
            self.fs
                .write_atomic(&self.target, &pending)
                .map_err(|e| GrubwizError::PersistenceWrite {
                    path: self.target.clone(),
                    message: e.to_string(),
                })?;
            self.loaded_checksum = Checksum::from_bytes(&pending);
            self.loaded = pending;
            tracing::info!(
                "wrote {} ({})",
                self.target.display(),
                self.loaded_checksum
            );
        } else {
            tracing::debug!("{} unchanged, skipping write", self.target.display());
        }

        Ok(CommitResult {
            backup,
            written,
            checksum: self.loaded_checksum.clone(),
        })
    }

    /// Replace the model with the content of a backup. The on-disk baseline
    /// is kept, so the restored content is written by the next commit.
    pub fn restore_from<B: FileSystem>(
        &mut self,
        backups: &BackupManager<B>,
        name: &str,
    ) -> GrubwizResult<()> {
        let content = backups.restore(name)?;
        self.model = parse(&content)?;
        tracing::debug!("restored model from backup {name}");
        Ok(())
    }

    /// Re-read the target, discarding edits
    pub fn reload(&mut self) -> GrubwizResult<()> {
        let loaded = read_target(&self.fs, &self.target)?;
        self.model = parse(&loaded)?;
        self.loaded_checksum = Checksum::from_bytes(&loaded);
        self.loaded = loaded;
        Ok(())
    }
}

fn read_target<F: FileSystem>(fs: &F, target: &Path) -> GrubwizResult<Vec<u8>> {
    fs.read(target).map_err(|e| match e {
        FsError::NotFound(_) => GrubwizError::TargetMissing {
            path: target.to_path_buf(),
        },
        e => GrubwizError::Fs(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::MemoryFs;

    const TARGET: &str = "/etc/default/grub";
    const BACKUPS: &str = "/cfg/grubwiz/backups";

    fn setup(content: &str) -> (MemoryFs, BackupManager<MemoryFs>) {
        let fs = MemoryFs::new();
        fs.insert(Path::new(TARGET), content.as_bytes().to_vec());
        let backups = BackupManager::new(fs.clone(), BACKUPS);
        (fs, backups)
    }

    #[test]
    fn open_missing_target_fails() {
        let fs = MemoryFs::new();
        let backups = BackupManager::new(fs.clone(), BACKUPS);
        let err = EditSession::open(fs, TARGET, &backups).unwrap_err();
        assert!(matches!(err, GrubwizError::TargetMissing { .. }));
    }

    #[test]
    fn open_rejects_non_utf8_and_takes_no_backup() {
        let fs = MemoryFs::new();
        fs.insert(Path::new(TARGET), vec![b'A', b'=', 0xff, b'\n']);
        let backups = BackupManager::new(fs.clone(), BACKUPS);
        let err = EditSession::open(fs, TARGET, &backups).unwrap_err();
        assert!(matches!(err, GrubwizError::Parse { offset: 2, .. }));
        assert!(backups.list_backups().unwrap().is_empty());
    }

    #[test]
    fn open_takes_original_backup_once() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        EditSession::open(fs.clone(), TARGET, &backups).unwrap();
        EditSession::open(fs, TARGET, &backups).unwrap();

        let list = backups.list_backups().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name().tag().as_str(), "orig");
    }

    #[test]
    fn clean_session_is_not_dirty() {
        let (fs, backups) = setup("# comment\nGRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs, TARGET, &backups).unwrap();
        assert!(!session.is_dirty());
        assert!(!session.set("GRUB_TIMEOUT", "5").unwrap());
        assert!(!session.is_dirty());
        assert!(!session.diff().has_changes());
    }

    #[test]
    fn commit_writes_pending_content() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
        session.set("GRUB_TIMEOUT", "10").unwrap();
        assert!(session.is_dirty());

        let result = session.commit(&backups, BackupDecision::Skip).unwrap();
        assert!(result.written);
        assert!(result.backup.is_none());
        assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), b"GRUB_TIMEOUT=10\n");
        assert!(!session.is_dirty());
        assert_eq!(result.checksum, Checksum::from_bytes(b"GRUB_TIMEOUT=10\n"));
    }

    #[test]
    fn commit_detects_external_change() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
        session.set("GRUB_TIMEOUT", "10").unwrap();
        fs.insert(Path::new(TARGET), b"GRUB_TIMEOUT=7\n".to_vec());
        let before = backups.list_backups().unwrap().len();

        let tag = BackupTag::new("pre-edit").unwrap();
        let err = session.commit(&backups, BackupDecision::Tag(tag)).unwrap_err();
        assert!(matches!(err, GrubwizError::ConcurrentModification { .. }));
        assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), b"GRUB_TIMEOUT=7\n");
        assert_eq!(backups.list_backups().unwrap().len(), before);
        assert_eq!(session.model().get("GRUB_TIMEOUT"), Some("10"));

        session.reload().unwrap();
        assert_eq!(session.model().get("GRUB_TIMEOUT"), Some("7"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn tagged_commit_backs_up_previous_content() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs, TARGET, &backups).unwrap();
        session.set("GRUB_TIMEOUT", "10").unwrap();

        let tag = BackupTag::new("before-timeout").unwrap();
        let result = session.commit(&backups, BackupDecision::Tag(tag)).unwrap();
        let outcome = result.backup.unwrap();
        assert_eq!(outcome.backup().name().tag().as_str(), "before-timeout");
        assert_eq!(
            backups.restore(&outcome.backup().file_name()).unwrap(),
            b"GRUB_TIMEOUT=5\n"
        );
    }

    #[test]
    fn failed_write_is_persistence_error() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
        session.set("GRUB_TIMEOUT", "10").unwrap();
        fs.set_fail_writes(true);

        let err = session.commit(&backups, BackupDecision::Skip).unwrap_err();
        assert!(matches!(err, GrubwizError::PersistenceWrite { .. }));
        assert!(session.is_dirty());
    }

    #[test]
    fn restore_replaces_model_without_writing() {
        let (fs, backups) = setup("GRUB_TIMEOUT=5\n");
        let mut session = EditSession::open(fs.clone(), TARGET, &backups).unwrap();
        let orig = backups.latest().unwrap().unwrap().file_name();
        session.set("GRUB_TIMEOUT", "10").unwrap();
        session.commit(&backups, BackupDecision::Skip).unwrap();

        session.restore_from(&backups, &orig).unwrap();
        assert_eq!(session.model().get("GRUB_TIMEOUT"), Some("5"));
        assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), b"GRUB_TIMEOUT=10\n");

        session.commit(&backups, BackupDecision::Skip).unwrap();
        assert_eq!(fs.contents(Path::new(TARGET)).unwrap(), b"GRUB_TIMEOUT=5\n");
    }
}
