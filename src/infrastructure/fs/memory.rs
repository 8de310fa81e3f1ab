//! In-memory file system
//!
//! Cloning shares the underlying storage, so a test can keep a handle and
//! inspect or tamper with files the engine owns.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    fail_writes: bool,
    writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<State>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put a file in place directly, bypassing failure injection
    pub fn insert(&self, path: &Path, content: Vec<u8>) {
        self.lock().files.insert(path.to_path_buf(), content);
    }

    /// Current content of a file
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// Make every subsequent write fail like a full disk
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Files whose parent is `dir`
    pub fn files_in(&self, dir: &Path) -> Vec<PathBuf> {
        self.lock()
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }

    fn write(&self, path: &Path, content: &[u8], clobber: bool) -> FsResult<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(FsError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("no space left on device"),
            });
        }
        if !clobber && state.files.contains_key(path) {
            return Err(FsError::AlreadyExists(path.to_path_buf()));
        }
        state.files.insert(path.to_path_buf(), content.to_vec());
        state.writes += 1;
        Ok(())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.write(path, content, true)
    }

    fn write_new(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.write(path, content, false)
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.lock()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut state = self.lock();
        for dir in path.ancestors() {
            state.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<String>> {
        let state = self.lock();
        let names: Vec<String> = state
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        if names.is_empty() && !state.dirs.contains(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(names)
    }
}
