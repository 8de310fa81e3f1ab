//! Command implementations for the grubwiz binary.
//!
//! [`App`] resolves paths once (config file, environment, then CLI flags) and
//! hands out the session, backup manager and suppression store.
//!
//! Under `sudo`, backups and suppressions are written as the invoking user.
//! The target file keeps its own owner.

pub mod backup;
pub mod check;
pub mod commit;
pub mod edit;
pub mod show;
pub mod suppress;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use grubwiz::config::{Config, ConfigWarning};
use grubwiz::infrastructure::fs::invoking_user;
use grubwiz::presentation::Cli;
use grubwiz::{BackupManager, CheckRegistry, EditSession, LocalFs, SuppressionStore};

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;

pub struct App {
    pub config: Config,
    pub ui: UiContext,
    pub target: PathBuf,
    pub backups: BackupManager<LocalFs>,
    suppressions_path: PathBuf,
    /// Writes grubwiz's own files as the invoking user
    user_fs: LocalFs,
}

impl App {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (config, warnings) = Config::load_layered(cli.config.as_deref())
            .context("loading grubwiz configuration")?;
        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
        if !ui.json {
            for warning in &warnings {
                eprint!("{}", render_config_warning(warning, ui.color));
            }
        }

        let target = cli.file.clone().unwrap_or_else(|| config.paths.target.clone());
        let backup_dir = cli.backup_dir.clone().unwrap_or_else(|| config.backup_dir());
        let suppressions_path = config.suppressions_path();
        tracing::debug!(
            "target {}, backups {}, suppressions {}",
            target.display(),
            backup_dir.display(),
            suppressions_path.display()
        );

        let user_fs = match invoking_user() {
            Some(user) => {
                tracing::debug!("running for {} (uid {}) under sudo", user.name, user.uid);
                LocalFs::owned_by(user.uid, user.gid)
            }
            None => LocalFs::new(),
        };

        Ok(Self {
            config,
            ui,
            target,
            backups: BackupManager::new(user_fs, backup_dir),
            suppressions_path,
            user_fs,
        })
    }

    pub fn open_session(&self) -> Result<EditSession<LocalFs>> {
        Ok(EditSession::open(LocalFs::new(), &self.target, &self.backups)?)
    }

    /// The suppression store; an unreadable file is reported and treated
    /// as empty
    pub fn suppressions(&self) -> SuppressionStore<LocalFs> {
        match SuppressionStore::load(self.user_fs, &self.suppressions_path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!("{err}; continuing without suppressions");
                SuppressionStore::empty(self.user_fs, &self.suppressions_path)
            }
        }
    }

    /// Built-in checks, resolving theme paths on the local disk
    pub fn registry(&self) -> CheckRegistry {
        CheckRegistry::builtin(Arc::new(LocalFs::new()))
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

fn render_config_warning(warning: &ConfigWarning, supports_color: bool) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let mut out = format!(
        "{} unknown config key '{}' in {}",
        ColoredText::warning("warning:").bold().render(supports_color),
        warning.key,
        location
    );
    if let Some(suggestion) = &warning.suggestion {
        out.push_str(&format!(" (did you mean '{suggestion}'?)"));
    }
    out.push('\n');
    out
}
