//! Configuration loading

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GrubwizError, GrubwizResult};

use super::types::Config;

pub const ENV_TARGET: &str = "GRUBWIZ_TARGET";
pub const ENV_BACKUP_DIR: &str = "GRUBWIZ_BACKUP_DIR";
pub const ENV_SUPPRESSIONS: &str = "GRUBWIZ_SUPPRESSIONS";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GrubwizResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GrubwizError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            tracing::debug!("unknown config key '{}' in {}", path_str, path.display());
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Built-in defaults, then the config file, then environment overrides.
///
/// `explicit` must exist; the user config file is optional.
pub fn load_layered(explicit: Option<&Path>) -> GrubwizResult<(Config, Vec<ConfigWarning>)> {
    let file = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Config::user_config_path().filter(|p| p.is_file()),
    };

    let (config, warnings) = match file {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };
    Ok((config.with_env_overrides(), warnings))
}

/// Apply `GRUBWIZ_*` overrides read through `var`. Empty values are ignored.
pub fn with_env_overrides<V>(mut config: Config, var: V) -> Config
where
    V: Fn(&str) -> Option<OsString>,
{
    let path_var = |name: &str| var(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(target) = path_var(ENV_TARGET) {
        config.paths.target = target;
    }
    if let Some(dir) = path_var(ENV_BACKUP_DIR) {
        config.paths.backup_dir = Some(dir);
    }
    if let Some(file) = path_var(ENV_SUPPRESSIONS) {
        config.paths.suppressions = Some(file);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "target",
        "backup_dir",
        "suppressions",
        "backups",
        "prompt_on_new_content",
        "commit",
        "regenerate",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
