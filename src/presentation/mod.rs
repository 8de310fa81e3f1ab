//! Presentation Layer
//!
//! This layer handles CLI argument parsing (via clap). Rendering and
//! command execution live in the binary.

pub mod cli;

pub use cli::{
    normalize_finding_id, normalize_key, BackupCommand, Cli, ColorWhen, Commands, CommitArgs,
};
