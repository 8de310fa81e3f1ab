//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Mode for files that did not exist before the write
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Local file system implementation
///
/// Every write stages a temp file in the destination directory, fsyncs it,
/// and renames it into place.
///
/// With an owner, files written and directories created are handed to that
/// uid/gid. grubwiz uses this under `sudo` so the invoking user keeps
/// control of their backups.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs {
    owner: Option<(u32, u32)>,
}

impl LocalFs {
    pub fn new() -> Self {
        Self { owner: None }
    }

    /// A file system whose writes end up owned by `uid:gid`
    pub fn owned_by(uid: u32, gid: u32) -> Self {
        Self {
            owner: Some((uid, gid)),
        }
    }

    /// Hand `path` to the owner, if there is one. Failure is logged, not
    /// returned: the content is written either way.
    fn give_away(&self, path: &Path) {
        #[cfg(unix)]
        if let Some((uid, gid)) = self.owner {
            if let Err(err) = std::os::unix::fs::chown(path, Some(uid), Some(gid)) {
                tracing::warn!("could not change owner of {} to {uid}:{gid}: {err}", path.display());
            }
        }
        #[cfg(not(unix))]
        let _ = path;
    }

    /// Write `content` to a synced temp file next to `path`, carrying over
    /// the permissions of the file it will replace.
    fn stage(&self, path: &Path, content: &[u8]) -> FsResult<NamedTempFile> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let io = |e| FsError::from_io(path, e);

        let mut tmp = NamedTempFile::new_in(dir).map_err(io)?;
        tmp.write_all(content).map_err(io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(path)
                .map(|m| m.permissions().mode() & 0o7777)
                .unwrap_or(NEW_FILE_MODE);
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(mode))
                .map_err(io)?;
        }

        tmp.as_file().sync_all().map_err(io)?;
        self.give_away(tmp.path());
        Ok(tmp)
    }

    /// Make the rename itself durable. Failure here is not fatal: the new
    /// content is already in place.
    fn sync_parent(path: &Path) {
        #[cfg(unix)]
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
                tracing::debug!("could not sync {}: {err}", dir.display());
            }
        }
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let tmp = self.stage(path, content)?;
        tmp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Self::sync_parent(path);
        Ok(())
    }

    fn write_new(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let tmp = self.stage(path, content)?;
        tmp.persist_noclobber(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Self::sync_parent(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let missing: Vec<&Path> = path
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .collect();
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))?;
        for dir in missing.into_iter().rev() {
            self.give_away(dir);
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<String>> {
        let io = |e| FsError::from_io(dir, e);
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io)? {
            let entry = entry.map_err(io)?;
            if !entry.file_type().map_err(io)?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
