//! Backup tag value object

use std::fmt;

use crate::error::{GrubwizError, GrubwizResult};

/// User-supplied label embedded in a backup file name.
///
/// Restricted to 1-64 characters from `[-_A-Za-z0-9]` so that it can never
/// introduce a path separator or the `.` used as the name field delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackupTag(String);

impl BackupTag {
    /// Maximum tag length
    pub const MAX_LEN: usize = 64;

    /// Tag used for the automatic first backup of an unmanaged file
    pub const ORIGINAL: &'static str = "orig";

    /// Validate and wrap a tag
    pub fn new(tag: &str) -> GrubwizResult<Self> {
        if Self::is_valid(tag) {
            Ok(Self(tag.to_string()))
        } else {
            Err(GrubwizError::InvalidTag {
                tag: tag.to_string(),
            })
        }
    }

    /// The `orig` tag
    pub fn original() -> Self {
        Self(Self::ORIGINAL.to_string())
    }

    /// Check a candidate tag without allocating
    pub fn is_valid(tag: &str) -> bool {
        !tag.is_empty()
            && tag.len() <= Self::MAX_LEN
            && tag
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BackupTag {
    type Err = GrubwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_word_characters() {
        assert!(BackupTag::new("orig").is_ok());
        assert!(BackupTag::new("before-nomodeset_2").is_ok());
        assert!(BackupTag::new(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn rejects_space_slash_and_dot() {
        for bad in ["my tag", "a/b", "v1.2", ""] {
            let err = BackupTag::new(bad).unwrap_err();
            assert!(matches!(err, GrubwizError::InvalidTag { .. }), "{bad}");
        }
    }

    #[test]
    fn rejects_over_long_tag() {
        assert!(BackupTag::new(&"a".repeat(65)).is_err());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(BackupTag::new("café").is_err());
    }
}
