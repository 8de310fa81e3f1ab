//! Built-in checks

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Check, FindingSink};
use crate::domain::entities::ConfigModel;
use crate::domain::policies::{param_catalog, ParamSpec};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{FindingId, Severity};

const TIMEOUT: &str = "GRUB_TIMEOUT";
const TIMEOUT_STYLE: &str = "GRUB_TIMEOUT_STYLE";
const HIDDEN_TIMEOUT: &str = "GRUB_HIDDEN_TIMEOUT";
const RECORDFAIL_TIMEOUT: &str = "GRUB_RECORDFAIL_TIMEOUT";
const DEFAULT: &str = "GRUB_DEFAULT";
const SAVEDEFAULT: &str = "GRUB_SAVEDEFAULT";
const CMDLINE_LINUX: &str = "GRUB_CMDLINE_LINUX";
const CMDLINE_LINUX_DEFAULT: &str = "GRUB_CMDLINE_LINUX_DEFAULT";
const CMDLINE_LINUX_RECOVERY: &str = "GRUB_CMDLINE_LINUX_RECOVERY";
const DISABLE_RECOVERY: &str = "GRUB_DISABLE_RECOVERY";
const DISABLE_LINUX_UUID: &str = "GRUB_DISABLE_LINUX_UUID";
const DISABLE_LINUX_PARTUUID: &str = "GRUB_DISABLE_LINUX_PARTUUID";
const TERMINAL_INPUT: &str = "GRUB_TERMINAL_INPUT";
const TERMINAL_OUTPUT: &str = "GRUB_TERMINAL_OUTPUT";
const SERIAL_COMMAND: &str = "GRUB_SERIAL_COMMAND";
const GFXMODE: &str = "GRUB_GFXMODE";
const BACKGROUND: &str = "GRUB_BACKGROUND";
const THEME: &str = "GRUB_THEME";
const DISTRIBUTOR: &str = "GRUB_DISTRIBUTOR";

/// The built-in checks in registration order
pub fn builtin_checks(fs: Arc<dyn FileSystem>) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(HiddenMenu),
        Box::new(SaveDefault),
        Box::new(KernelCmdline),
        Box::new(GfxMode),
        Box::new(ThemePaths { fs }),
        Box::new(TimeoutLimits),
        Box::new(LinuxUuid),
        Box::new(SerialConsole),
        Box::new(Distributor),
        Box::new(AllowedValues),
    ]
}

fn is_true(model: &ConfigModel, key: &str) -> bool {
    model.get(key) == Some("true")
}

/// Optional `-` followed by ASCII digits
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn non_negative(value: &str) -> Option<u64> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

fn short(key: &str) -> &str {
    key.strip_prefix("GRUB_").unwrap_or(key)
}

fn ids(pairs: &[(&str, Severity)]) -> Vec<FindingId> {
    pairs
        .iter()
        .map(|(key, severity)| FindingId::new(*key, *severity))
        .collect()
}

/// Hidden menu without a way back in
struct HiddenMenu;

impl Check for HiddenMenu {
    fn name(&self) -> &'static str {
        "hidden-menu"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[(TIMEOUT_STYLE, Severity::Critical), (TIMEOUT, Severity::Error)])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        if model.get(TIMEOUT_STYLE) != Some("hidden") {
            return;
        }
        if !model.contains(HIDDEN_TIMEOUT) {
            sink.report(
                TIMEOUT_STYLE,
                Severity::Critical,
                "hidden timeout style requires an explicit hidden-timeout value or menu becomes unreachable",
            );
        }
        if matches!(model.get(TIMEOUT), Some("0") | Some("0.0")) {
            sink.report(
                TIMEOUT,
                Severity::Error,
                "menu is both skipped and hidden; an unrecoverable boot failure cannot be interactively corrected",
            );
        }
    }
}

/// `GRUB_SAVEDEFAULT` and `GRUB_DEFAULT` must agree
struct SaveDefault;

impl Check for SaveDefault {
    fn name(&self) -> &'static str {
        "save-default"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[
            (SAVEDEFAULT, Severity::Critical),
            (DEFAULT, Severity::Error),
            (DEFAULT, Severity::Advisory),
        ])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        let default = model.get(DEFAULT);
        if is_true(model, SAVEDEFAULT) {
            if default != Some("saved") {
                sink.report(
                    SAVEDEFAULT,
                    Severity::Critical,
                    "GRUB_SAVEDEFAULT requires GRUB_DEFAULT=saved to take effect",
                );
            }
            if default.is_some_and(is_integer) {
                sink.report(
                    DEFAULT,
                    Severity::Error,
                    format!(
                        "numeric default contradicts {}=true; the saved entry would be ignored",
                        short(SAVEDEFAULT)
                    ),
                );
            }
        } else if default == Some("saved") {
            sink.report(
                DEFAULT,
                Severity::Advisory,
                format!(
                    "\"saved\" only remembers the last choice when {}=true",
                    short(SAVEDEFAULT)
                ),
            );
        }
    }
}

/// Kernel command line hygiene
struct KernelCmdline;

impl Check for KernelCmdline {
    fn name(&self) -> &'static str {
        "kernel-cmdline"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[
            (CMDLINE_LINUX, Severity::Warning),
            (CMDLINE_LINUX_DEFAULT, Severity::Warning),
            (CMDLINE_LINUX_RECOVERY, Severity::Warning),
        ])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        if let Some(a) = model.assignment(CMDLINE_LINUX) {
            for token in ["quiet", "splash"] {
                if a.value().split_whitespace().any(|t| t == token) {
                    sink.report(
                        CMDLINE_LINUX,
                        Severity::Warning,
                        format!(
                            "\"{token}\" belongs only in {}; recovery boots would show no diagnostic text",
                            short(CMDLINE_LINUX_DEFAULT)
                        ),
                    );
                }
            }
        }

        for key in [CMDLINE_LINUX, CMDLINE_LINUX_DEFAULT] {
            if let Some(a) = model.assignment(key) {
                if !a.is_quoted() && !a.value().is_empty() {
                    sink.report(key, Severity::Warning, "value should be quoted");
                }
            }
        }

        if model.contains(CMDLINE_LINUX_RECOVERY) && is_true(model, DISABLE_RECOVERY) {
            sink.report(
                CMDLINE_LINUX_RECOVERY,
                Severity::Warning,
                format!("set but {}=true disables recovery entries", short(DISABLE_RECOVERY)),
            );
        }
    }
}

/// Fixed or malformed graphics modes
struct GfxMode;

impl Check for GfxMode {
    fn name(&self) -> &'static str {
        "gfxmode"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[(GFXMODE, Severity::Advisory)])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        let Some(value) = model.get(GFXMODE) else {
            return;
        };
        for mode in value.split(',').map(str::trim) {
            if matches!(mode.to_ascii_lowercase().as_str(), "auto" | "keep") {
                continue;
            }
            let message = if param_catalog::is_resolution(mode) {
                format!("\"{mode}\" is a fixed resolution; prefer \"auto\" unless the firmware supports it")
            } else {
                format!("\"{mode}\" is not auto, keep or WIDTHxHEIGHT[xDEPTH]")
            };
            sink.report(GFXMODE, Severity::Advisory, message);
        }
    }
}

/// Background image and theme must exist
pub(super) struct ThemePaths {
    fs: Arc<dyn FileSystem>,
}

impl ThemePaths {
    const BASES: [&'static str; 4] = ["/boot/grub", "/boot/grub2", "/usr/share/grub", "/"];

    /// Candidate locations for a GRUB path, in lookup order.
    ///
    /// `$prefix` is the GRUB directory, which differs between distributions,
    /// so it expands to every base just like a relative path.
    pub(super) fn candidates(value: &str) -> Vec<PathBuf> {
        let path = match value.strip_prefix("$prefix") {
            Some(rest) => rest.trim_start_matches('/'),
            None if Path::new(value).is_absolute() => return vec![PathBuf::from(value)],
            None => value,
        };
        Self::BASES.iter().map(|base| Path::new(base).join(path)).collect()
    }
}

impl Check for ThemePaths {
    fn name(&self) -> &'static str {
        "theme-paths"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[(BACKGROUND, Severity::Advisory), (THEME, Severity::Advisory)])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        for key in [BACKGROUND, THEME] {
            let Some(value) = model.get(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            let candidates = Self::candidates(value);
            if !candidates.iter().any(|p| self.fs.exists(p)) {
                let shown = candidates
                    .first()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                sink.report(key, Severity::Advisory, format!("path does not exist: {shown}"));
            }
        }
    }
}

/// Timeouts that are set but unlikely to do what the user wants
struct TimeoutLimits;

impl TimeoutLimits {
    const LIMITS: [(&'static str, u64); 2] = [(TIMEOUT, 60), (RECORDFAIL_TIMEOUT, 120)];
}

impl Check for TimeoutLimits {
    fn name(&self) -> &'static str {
        "timeout-limits"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[
            (TIMEOUT_STYLE, Severity::Advisory),
            (TIMEOUT, Severity::Advisory),
            (RECORDFAIL_TIMEOUT, Severity::Advisory),
        ])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        let positive = model
            .get(TIMEOUT)
            .and_then(|v| v.parse::<f64>().ok())
            .is_some_and(|t| t > 0.0);
        if let Some(style) = model.get(TIMEOUT_STYLE) {
            if positive && style != "menu" {
                sink.report(
                    TIMEOUT_STYLE,
                    Severity::Advisory,
                    format!("{} > 0 usually means the menu should be shown; consider \"menu\"", short(TIMEOUT)),
                );
            }
        }

        for (key, limit) in Self::LIMITS {
            if let Some(seconds) = model.get(key).and_then(non_negative) {
                if seconds > limit {
                    sink.report(key, Severity::Advisory, format!("over {limit}s seems ill advised"));
                }
            }
        }
    }
}

/// Both UUID kinds disabled leaves only device names
struct LinuxUuid;

impl Check for LinuxUuid {
    fn name(&self) -> &'static str {
        "linux-uuid"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[
            (DISABLE_LINUX_UUID, Severity::Warning),
            (DISABLE_LINUX_PARTUUID, Severity::Warning),
        ])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        if is_true(model, DISABLE_LINUX_UUID) && is_true(model, DISABLE_LINUX_PARTUUID) {
            for key in [DISABLE_LINUX_UUID, DISABLE_LINUX_PARTUUID] {
                sink.report(key, Severity::Warning, "using device names for everything is fragile");
            }
        }
    }
}

/// Serial terminal settings must line up
struct SerialConsole;

impl Check for SerialConsole {
    fn name(&self) -> &'static str {
        "serial-console"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[
            (TERMINAL_INPUT, Severity::Warning),
            (TERMINAL_OUTPUT, Severity::Warning),
            (SERIAL_COMMAND, Severity::Warning),
        ])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        let input = model.get(TERMINAL_INPUT).unwrap_or("console");
        let output = model.get(TERMINAL_OUTPUT).unwrap_or("");
        let serial_in = input.contains("serial");
        let serial_out = output.contains("serial");
        let has_command = model.get(SERIAL_COMMAND).is_some_and(|v| !v.is_empty());

        if !output.is_empty() && input != output && (serial_in || serial_out) {
            sink.report(
                TERMINAL_INPUT,
                Severity::Warning,
                format!("\"{input}\" but {}=\"{output}\" (should match)", short(TERMINAL_OUTPUT)),
            );
        }
        if has_command && !serial_in && !serial_out {
            sink.report(SERIAL_COMMAND, Severity::Warning, "set but no serial terminal configured");
        }
        if !has_command && (serial_in || serial_out) {
            let key = if serial_in { TERMINAL_INPUT } else { TERMINAL_OUTPUT };
            sink.report(
                key,
                Severity::Warning,
                format!("serial terminal needs {} set", short(SERIAL_COMMAND)),
            );
        }
    }
}

/// Empty distributor name
struct Distributor;

impl Check for Distributor {
    fn name(&self) -> &'static str {
        "distributor"
    }

    fn identities(&self) -> Vec<FindingId> {
        ids(&[(DISTRIBUTOR, Severity::Advisory)])
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        if model.get(DISTRIBUTOR).is_some_and(|v| v.trim().is_empty()) {
            sink.report(DISTRIBUTOR, Severity::Advisory, "should be the distribution name (it is empty)");
        }
    }
}

/// Known variables whose value is outside the catalog's closed set.
///
/// `GRUB_TIMEOUT.error` belongs to the hidden-menu check, so the timeout is
/// left to `set`-time input checks.
struct AllowedValues;

impl AllowedValues {
    fn specs() -> impl Iterator<Item = &'static ParamSpec> {
        param_catalog::all()
            .iter()
            .filter(|spec| spec.input.is_closed() && spec.key != TIMEOUT)
    }
}

impl Check for AllowedValues {
    fn name(&self) -> &'static str {
        "allowed-values"
    }

    fn identities(&self) -> Vec<FindingId> {
        Self::specs()
            .map(|spec| FindingId::new(spec.key, Severity::Error))
            .collect()
    }

    fn run(&self, model: &ConfigModel, sink: &mut FindingSink) {
        for spec in Self::specs() {
            if let Some(Err(reason)) = model.get(spec.key).map(|value| spec.check(value)) {
                sink.report(spec.key, Severity::Error, reason);
            }
        }
    }
}
