//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod backup_tag;
mod checksum;
mod finding_id;
mod severity;

pub use backup_tag::BackupTag;
pub use checksum::Checksum;
pub use finding_id::FindingId;
pub use severity::Severity;
