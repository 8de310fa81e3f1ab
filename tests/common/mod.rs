//! Common test utilities for grubwiz CLI and scenario tests.
//!
//! `TestEnv` gives every test its own GRUB defaults file, backup directory
//! and config home, so nothing touches the real `/etc/default/grub`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Stock Ubuntu defaults file (hidden menu, zero timeout)
pub const UBUNTU_DEFAULTS: &str = r#"# If you change this file, run 'update-grub' afterwards to update
# /boot/grub/grub.cfg.
# For full documentation of the options in this file, see:
#   info -f grub -n 'Simple configuration'

GRUB_DEFAULT=0
GRUB_TIMEOUT_STYLE=hidden
GRUB_TIMEOUT=0
GRUB_DISTRIBUTOR=`lsb_release -i -s 2> /dev/null || echo Debian`
GRUB_CMDLINE_LINUX_DEFAULT="quiet splash"
GRUB_CMDLINE_LINUX=""

# Uncomment to disable graphical terminal (grub-pc only)
#GRUB_TERMINAL=console
"#;

/// A defaults file with no critical or error findings
pub const CLEAN_DEFAULTS: &str = r#"# managed by hand
GRUB_DEFAULT=0
GRUB_TIMEOUT_STYLE=menu
GRUB_TIMEOUT=5
GRUB_DISTRIBUTOR=`lsb_release -i -s 2> /dev/null || echo Debian`
GRUB_CMDLINE_LINUX_DEFAULT="quiet splash"
GRUB_CMDLINE_LINUX=""
"#;

/// Result of running the grubwiz binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Parse every stdout line as a JSON event
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON: {l}: {e}"))
            })
            .collect()
    }

    /// The first event with the given `event` field
    pub fn event(&self, name: &str) -> serde_json::Value {
        self.events()
            .into_iter()
            .find(|e| e["event"] == name)
            .unwrap_or_else(|| panic!("no {name} event in:\n{}", self.stdout))
    }
}

/// Isolated environment: a target file, a backup dir and a config home
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new(content: &str) -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(root.path().join("home")).expect("Failed to create home");
        std::fs::write(root.path().join("grub"), content).expect("Failed to write target");
        Self { root }
    }

    pub fn target(&self) -> PathBuf {
        self.root.path().join("grub")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.path().join("backups")
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn suppressions_file(&self) -> PathBuf {
        self.home().join(".config/grubwiz/hidden-items.toml")
    }

    pub fn read_target(&self) -> String {
        std::fs::read_to_string(self.target()).expect("Failed to read target")
    }

    pub fn write_target(&self, content: &str) {
        std::fs::write(self.target(), content).expect("Failed to write target");
    }

    /// Backup file names, sorted (which is oldest first)
    pub fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.backup_dir()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    pub fn write_config(&self, toml: &str) {
        let path = self.home().join(".config/grubwiz/config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, toml).unwrap();
    }

    /// Run grubwiz against this environment's target and backup dir
    pub fn run(&self, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_grubwiz"));
        cmd.args(args)
            .arg("--file")
            .arg(self.target())
            .arg("--backup-dir")
            .arg(self.backup_dir())
            .arg("--color")
            .arg("never");
        self.isolate(&mut cmd);
        to_result(cmd.output().expect("Failed to execute grubwiz"))
    }

    /// Run grubwiz with `--json`
    pub fn run_json(&self, args: &[&str]) -> TestResult {
        let mut full = args.to_vec();
        full.push("--json");
        self.run(&full)
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.current_dir(self.root.path())
            .env("GRUBWIZ_TEST_HOME", self.home())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env_remove("GRUBWIZ_TARGET")
            .env_remove("GRUBWIZ_BACKUP_DIR")
            .env_remove("GRUBWIZ_SUPPRESSIONS")
            .env_remove("RUST_LOG");
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// True when `path` holds exactly `content`
pub fn file_is(path: &Path, content: &str) -> bool {
    std::fs::read_to_string(path).map(|c| c == content).unwrap_or(false)
}
