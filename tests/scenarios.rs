//! Scenario tests for grubwiz.
//!
//! Each scenario walks the library through a complete edit workflow against
//! the in-memory file system, so external changes and write failures can be
//! staged precisely.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/first_edit.rs"]
mod first_edit;

#[path = "scenarios/concurrent_edit.rs"]
mod concurrent_edit;

#[path = "scenarios/backup_history.rs"]
mod backup_history;
