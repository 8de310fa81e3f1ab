//! Backup entity
//!
//! A backup is identified entirely by its file name:
//! `YYYYMMDD.HHMMSS.<checksum>.<tag>.txt`. Parsing the name recovers the
//! timestamp, checksum and tag, so listing a directory needs no index file.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::value_objects::{BackupTag, Checksum};

const TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";
const EXTENSION: &str = "txt";

/// Parsed backup file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupName {
    timestamp: NaiveDateTime,
    checksum: Checksum,
    tag: BackupTag,
}

impl BackupName {
    /// Build a name; the timestamp is truncated to whole seconds
    pub fn new(timestamp: NaiveDateTime, checksum: Checksum, tag: BackupTag) -> Self {
        use chrono::Timelike;
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            timestamp,
            checksum,
            tag,
        }
    }

    /// Parse a file name, returning `None` for anything that is not a backup
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        let [date, time, sum, tag, ext] = parts.as_slice() else {
            return None;
        };
        if *ext != EXTENSION || date.len() != 8 || time.len() != 6 {
            return None;
        }

        let timestamp =
            NaiveDateTime::parse_from_str(&format!("{date}.{time}"), TIMESTAMP_FORMAT).ok()?;
        let checksum = Checksum::parse(sum)?;
        if checksum.as_str() != *sum {
            // Upper-case hex would not round-trip to the same file name
            return None;
        }
        let tag = BackupTag::new(tag).ok()?;
        Some(Self {
            timestamp,
            checksum,
            tag,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    pub fn tag(&self) -> &BackupTag {
        &self.tag
    }
}

impl fmt::Display for BackupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.checksum,
            self.tag,
            EXTENSION
        )
    }
}

impl PartialOrd for BackupName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Oldest first; same-second backups fall back to name order.
impl Ord for BackupName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

/// A backup as listed in the backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    name: BackupName,
    path: PathBuf,
}

impl Backup {
    pub fn new(name: BackupName, path: PathBuf) -> Self {
        Self { name, path }
    }

    pub fn name(&self) -> &BackupName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name in the backup directory
    pub fn file_name(&self) -> String {
        self.name.to_string()
    }
}
