//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--file, --backup-dir, --json, --color, --verbose) are inherited by all subcommands
//! - Commands that write the target share [`CommitArgs`], so every prompt has a flag equivalent

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Prefix shared by every GRUB variable
pub const KEY_PREFIX: &str = "GRUB_";

/// Tag offered when prompting for a backup before commit
pub const DEFAULT_TAG: &str = "custom";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// grubwiz - safe editor for /etc/default/grub
#[derive(Parser, Debug)]
#[command(name = "grubwiz")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Keys may be given with or without the GRUB_ prefix.")]
pub struct Cli {
    /// GRUB defaults file to edit
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory holding backups
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/grubwiz/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for scripts
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options for commands that write the target file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitArgs {
    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Back up the current content under this tag before writing
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Commit even when error or critical findings remain
    #[arg(short, long)]
    pub force: bool,

    /// Do not run the configured regeneration command
    #[arg(long)]
    pub no_regenerate: bool,

    /// Show the change and findings without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the variables set in the file
    Show {
        /// Include hidden variables
        #[arg(long)]
        all: bool,
    },

    /// Print the value of one variable
    Get { key: String },

    /// Set a variable and commit
    Set {
        key: String,
        #[arg(allow_negative_numbers = true)]
        value: String,
        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Remove a variable and commit
    Unset {
        key: String,
        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Validate the file (exits non-zero on error or critical findings)
    Check {
        /// Also list suppressed findings
        #[arg(long)]
        all: bool,
    },

    /// Manage backups
    Backup {
        #[command(subcommand)]
        action: BackupCommand,
    },

    /// Hide a variable from `show`
    Hide { key: String },

    /// Show a hidden variable again
    Unhide { key: String },

    /// Suppress a finding by identity (e.g. GRUB_GFXMODE.advisory)
    Suppress { id: String },

    /// Stop suppressing a finding
    Unsuppress { id: String },

    /// Clear all hidden variables and suppressed findings
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Back up the current file
    Create {
        /// Backup tag ([-_A-Za-z0-9], at most 64 characters)
        #[arg(default_value = DEFAULT_TAG)]
        tag: String,
    },

    /// List backups, oldest first
    List,

    /// Delete a backup permanently
    Delete {
        /// Backup file name (prompts for one when omitted)
        name: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a backup's content back to the file
    Restore {
        /// Backup file name (prompts for one when omitted)
        name: Option<String>,
        #[command(flatten)]
        commit: CommitArgs,
    },
}

/// Upper-case `key` and add the `GRUB_` prefix when missing
pub fn normalize_key(key: &str) -> String {
    let key = key.trim().to_ascii_uppercase();
    if key.starts_with(KEY_PREFIX) {
        key
    } else {
        format!("{KEY_PREFIX}{key}")
    }
}

/// Normalize the key part of a `KEY.severity` identity
pub fn normalize_finding_id(id: &str) -> String {
    match id.trim().rsplit_once('.') {
        Some((key, severity)) => {
            format!("{}.{}", normalize_key(key), severity.to_ascii_lowercase())
        }
        None => id.trim().to_string(),
    }
}
