//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `EditSession` - Load, edit, check and commit the target file

pub mod session;

pub use session::{BackupDecision, CommitResult, EditSession};
