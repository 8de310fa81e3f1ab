//! FileSystem port - abstraction over file I/O operations
//!
//! The engine reaches the disk only through this trait, so sessions,
//! backups and suppressions run unchanged against the in-memory
//! implementation in tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A no-clobber write found the destination occupied
    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error for `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - the real disk, atomic writes via temp file + rename
/// - `MemoryFs` - in-memory, with write-failure injection for tests
pub trait FileSystem: Send + Sync {
    /// Read a whole file
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Replace `path` atomically: readers see the old or the new content,
    /// never a mix
    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Create `path` atomically, failing with `AlreadyExists` instead of
    /// replacing an existing file
    fn write_new(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Names of the regular files directly inside `dir`
    fn list_files(&self, dir: &Path) -> FsResult<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_display() {
        let err = FsError::NotFound(PathBuf::from("test.txt"));
        assert!(err.to_string().contains("test.txt"));
    }

    #[test]
    fn fs_error_from_io_classifies_kind() {
        let path = Path::new("/etc/default/grub");
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(FsError::from_io(path, not_found).is_not_found());

        let exists = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "taken");
        assert!(matches!(
            FsError::from_io(path, exists),
            FsError::AlreadyExists(_)
        ));

        let other = std::io::Error::other("disk full");
        let err = FsError::from_io(path, other);
        assert!(err.to_string().contains("disk full"));
    }
}
