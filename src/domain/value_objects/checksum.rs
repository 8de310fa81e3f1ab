//! Content Checksum Value Object
//!
//! An 8-hex-digit identifier of a byte sequence, used to name backups and
//! to detect external modification of the target file.

use std::fmt;

/// Content checksum value object
///
/// The first 32 bits of the SHA-256 digest, rendered as 8 lowercase hex
/// digits. This is a collision-avoidance label for humans, not a security
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum(String);

impl Checksum {
    /// Number of hex digits in a checksum
    pub const LEN: usize = 8;

    /// Compute the checksum of exact byte content
    pub fn from_bytes(content: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(content);
        let hex: String = digest[..Self::LEN / 2]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self(hex)
    }

    /// Parse a checksum string (case-insensitive, normalized to lowercase)
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `content` hashes to this checksum
    pub fn matches(&self, content: &[u8]) -> bool {
        *self == Self::from_bytes(content)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
