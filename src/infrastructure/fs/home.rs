//! Config directory resolution with test isolation support.
//!
//! `dirs::config_dir()` ignores `HOME` on some platforms, so tests cannot
//! redirect it by environment alone. `grubwiz_config_dir()`:
//! 1. Checks `GRUBWIZ_TEST_HOME` first and uses `<it>/.config`
//! 2. Under `sudo`, uses `<invoking user's home>/.config`
//! 3. Falls back to `dirs::config_dir()`
//!
//! Everything grubwiz keeps for itself (backups, suppressions, its own
//! config file) lives under `<config dir>/grubwiz`.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable for test isolation of the config directory.
pub const GRUBWIZ_TEST_HOME_VAR: &str = "GRUBWIZ_TEST_HOME";

/// Name of the application directory inside the config directory
pub const APP_DIR: &str = "grubwiz";

/// The account that ran grubwiz through `sudo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokingUser {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub home: PathBuf,
}

/// The user behind `sudo`, when running as root on their behalf.
///
/// `None` when not root, when `SUDO_USER` is unset or names root, or when
/// the account cannot be looked up.
#[cfg(unix)]
pub fn invoking_user() -> Option<InvokingUser> {
    let is_root = nix::unistd::geteuid().is_root();
    let name = sudo_user_name(is_root, std::env::var("SUDO_USER").ok())?;
    match nix::unistd::User::from_name(&name) {
        Ok(Some(user)) => Some(InvokingUser {
            name: user.name,
            uid: user.uid.as_raw(),
            gid: user.gid.as_raw(),
            home: user.dir,
        }),
        Ok(None) => {
            tracing::debug!("SUDO_USER {name} has no passwd entry");
            None
        }
        Err(err) => {
            tracing::debug!("looking up SUDO_USER {name}: {err}");
            None
        }
    }
}

#[cfg(not(unix))]
pub fn invoking_user() -> Option<InvokingUser> {
    None
}

/// The account name to act for: `SUDO_USER`, but only when running as root
/// for somebody else
#[cfg_attr(not(unix), allow(dead_code))]
fn sudo_user_name(is_root: bool, sudo_user: Option<String>) -> Option<String> {
    sudo_user.filter(|name| is_root && !name.is_empty() && name != "root")
}

/// Pick the config directory: test home, then the sudo user's home, then
/// the platform default
fn resolve_config_dir(
    test_home: Option<OsString>,
    sudo_home: Option<PathBuf>,
    fallback: Option<PathBuf>,
) -> Option<PathBuf> {
    test_home
        .map(PathBuf::from)
        .or(sudo_home)
        .map(|home| home.join(".config"))
        .or(fallback)
}

/// The user's config directory, honouring `GRUBWIZ_TEST_HOME` and `sudo`
pub fn grubwiz_config_dir() -> Option<PathBuf> {
    let test_home = std::env::var_os(GRUBWIZ_TEST_HOME_VAR);
    let sudo_home = match test_home {
        Some(_) => None,
        None => invoking_user().map(|user| user.home),
    };
    resolve_config_dir(test_home, sudo_home, dirs::config_dir())
}

/// `<config dir>/grubwiz`
pub fn grubwiz_app_dir() -> Option<PathBuf> {
    grubwiz_config_dir().map(|dir| dir.join(APP_DIR))
}
