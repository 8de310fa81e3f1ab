//! Catalog of known GRUB variables.
//!
//! Each entry carries the menu section it belongs to, the GRUB default,
//! suggested values with their meaning, the rule a new value must satisfy,
//! and a one-line description.
//!
//! This is a pure domain policy - no I/O operations.

use crate::error::{GrubwizError, GrubwizResult};

/// What a value must look like to be accepted by `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Free-form shell text
    Any,
    /// Exactly one of the listed choices
    OneOf,
    /// Optional `-` and digits, within bounds
    Integer { min: Option<i64>, max: Option<i64> },
    /// Entry number, `saved`, or a menu entry title
    MenuEntry,
    /// Comma-separated `auto`, `keep` or `WIDTHxHEIGHT[xDEPTH]`
    GfxModes,
    /// Empty, or a path to a PNG, JPEG or TGA image
    ImagePath,
    /// Empty, or a path to a `theme.txt`
    ThemeFile,
}

impl InputRule {
    /// Whether the rule describes a closed set of values
    pub fn is_closed(&self) -> bool {
        matches!(self, InputRule::OneOf | InputRule::Integer { .. })
    }
}

/// A known GRUB variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub section: &'static str,
    /// Value GRUB uses when the variable is not set
    pub default: &'static str,
    /// Suggested values and what they do
    pub choices: &'static [(&'static str, &'static str)],
    pub input: InputRule,
    pub brief: &'static str,
}

impl ParamSpec {
    /// Check `value` against this variable's rule, returning the reason it
    /// is not accepted
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self.input {
            InputRule::Any => Ok(()),
            InputRule::OneOf => {
                if self.choices.iter().any(|(choice, _)| *choice == value) {
                    Ok(())
                } else {
                    let names: Vec<&str> = self.choices.iter().map(|(c, _)| *c).collect();
                    Err(format!("\"{value}\" is not one of: {}", names.join(", ")))
                }
            }
            InputRule::Integer { min, max } => {
                let Some(n) = parse_integer(value) else {
                    return Err(format!("\"{value}\" is not an integer"));
                };
                if let Some(min) = min.filter(|min| n < *min) {
                    return Err(format!("\"{value}\" is below the minimum of {min}"));
                }
                if let Some(max) = max.filter(|max| n > *max) {
                    return Err(format!("\"{value}\" is above the maximum of {max}"));
                }
                Ok(())
            }
            InputRule::MenuEntry => {
                if value.is_empty() || value.starts_with(char::is_whitespace) {
                    Err("expected an entry number, \"saved\", or a menu entry title".to_string())
                } else {
                    Ok(())
                }
            }
            InputRule::GfxModes => match value
                .split(',')
                .map(str::trim)
                .find(|mode| !is_gfx_mode(mode))
            {
                Some(mode) => Err(format!("\"{mode}\" is not auto, keep or WIDTHxHEIGHT[xDEPTH]")),
                None => Ok(()),
            },
            InputRule::ImagePath => {
                let lower = value.to_ascii_lowercase();
                if value.is_empty() || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                    Ok(())
                } else {
                    Err(format!("expected an image file ({})", IMAGE_EXTENSIONS.join(" ")))
                }
            }
            InputRule::ThemeFile => {
                if value.is_empty() || value.ends_with("theme.txt") {
                    Ok(())
                } else {
                    Err("expected the path of a theme.txt file".to_string())
                }
            }
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".tga"];

const MENU: &str = "Timeout & Menu";
const APPEARANCE: &str = "Appearance";
const KERNEL: &str = "Kernel Arguments";
const DISCOVERY: &str = "Discovery";
const SECURITY: &str = "Security & Advanced";
const TERMINAL: &str = "Terminal";

const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        key: "GRUB_DEFAULT",
        section: MENU,
        default: "0",
        choices: &[
            ("0", "the first entry in the menu"),
            ("saved", "the entry booted last (with GRUB_SAVEDEFAULT=true)"),
        ],
        input: InputRule::MenuEntry,
        brief: "Menu entry booted by default",
    },
    ParamSpec {
        key: "GRUB_SAVEDEFAULT",
        section: MENU,
        default: "false",
        choices: &[
            ("true", "remember the entry chosen at each boot"),
            ("false", "always boot GRUB_DEFAULT"),
        ],
        input: InputRule::OneOf,
        brief: "Remember the last booted entry",
    },
    ParamSpec {
        key: "GRUB_TIMEOUT",
        section: MENU,
        default: "5",
        choices: &[
            ("-1", "wait until a key is pressed"),
            ("0", "boot at once (hold Shift or press Esc for the menu)"),
            ("2", "short wait"),
            ("5", "medium wait"),
            ("15", "long wait"),
        ],
        input: InputRule::Integer {
            min: Some(-1),
            max: None,
        },
        brief: "Seconds before the default entry boots",
    },
    ParamSpec {
        key: "GRUB_TIMEOUT_STYLE",
        section: MENU,
        default: "menu",
        choices: &[
            ("menu", "show the full menu during the timeout"),
            ("countdown", "show a countdown instead of the menu"),
            ("hidden", "hide the menu until a key is pressed"),
        ],
        input: InputRule::OneOf,
        brief: "What to show during the timeout",
    },
    ParamSpec {
        key: "GRUB_HIDDEN_TIMEOUT",
        section: MENU,
        default: "",
        choices: &[],
        input: InputRule::Integer {
            min: Some(0),
            max: None,
        },
        brief: "Seconds to wait for a key while the menu is hidden",
    },
    ParamSpec {
        key: "GRUB_RECORDFAIL_TIMEOUT",
        section: MENU,
        default: "30",
        choices: &[
            ("10", "short wait after a failed boot"),
            ("30", "default wait after a failed boot"),
            ("60", "long wait after a failed boot"),
        ],
        input: InputRule::Integer {
            min: Some(0),
            max: None,
        },
        brief: "Menu timeout after a failed boot",
    },
    ParamSpec {
        key: "GRUB_DISABLE_RECOVERY",
        section: MENU,
        default: "false",
        choices: &[
            ("true", "no recovery-mode entries"),
            ("false", "add a recovery entry per kernel"),
        ],
        input: InputRule::OneOf,
        brief: "Leave recovery entries out of the menu",
    },
    ParamSpec {
        key: "GRUB_DISABLE_SUBMENU",
        section: MENU,
        default: "false",
        choices: &[
            ("true", "list every kernel at the top level"),
            ("false", "group older kernels in a submenu"),
        ],
        input: InputRule::OneOf,
        brief: "Put every kernel in the main menu",
    },
    ParamSpec {
        key: "GRUB_DISTRIBUTOR",
        section: APPEARANCE,
        default: "`lsb_release -i -s 2> /dev/null || echo Debian`",
        choices: &[],
        input: InputRule::Any,
        brief: "Operating system name in menu entries",
    },
    ParamSpec {
        key: "GRUB_GFXMODE",
        section: APPEARANCE,
        default: "auto",
        choices: &[
            ("auto", "the best mode the display offers"),
            ("640x480", "lowest common denominator"),
            ("800x600", "older standard resolution"),
            ("1024x768", "common monitor resolution"),
        ],
        input: InputRule::GfxModes,
        brief: "Resolution of the graphical menu",
    },
    ParamSpec {
        key: "GRUB_BACKGROUND",
        section: APPEARANCE,
        default: "",
        choices: &[],
        input: InputRule::ImagePath,
        brief: "Background image for the menu",
    },
    ParamSpec {
        key: "GRUB_THEME",
        section: APPEARANCE,
        default: "",
        choices: &[],
        input: InputRule::ThemeFile,
        brief: "Theme file; overrides GRUB_BACKGROUND",
    },
    ParamSpec {
        key: "GRUB_CMDLINE_LINUX",
        section: KERNEL,
        default: "",
        choices: &[],
        input: InputRule::Any,
        brief: "Kernel arguments for every entry, recovery included",
    },
    ParamSpec {
        key: "GRUB_CMDLINE_LINUX_DEFAULT",
        section: KERNEL,
        default: "quiet splash",
        choices: &[
            ("quiet splash", "hide boot messages behind a splash screen"),
            ("", "show all boot messages"),
            ("nomodeset", "no kernel mode setting (graphics troubleshooting)"),
        ],
        input: InputRule::Any,
        brief: "Kernel arguments for normal (non-recovery) entries",
    },
    ParamSpec {
        key: "GRUB_CMDLINE_LINUX_RECOVERY",
        section: KERNEL,
        default: "single",
        choices: &[],
        input: InputRule::Any,
        brief: "Kernel arguments for recovery entries",
    },
    ParamSpec {
        key: "GRUB_DISABLE_LINUX_UUID",
        section: KERNEL,
        default: "false",
        choices: &[
            ("true", "pass device names such as /dev/sda1 as root="),
            ("false", "pass the filesystem UUID (survives disk moves)"),
        ],
        input: InputRule::OneOf,
        brief: "Use device names instead of UUIDs for root=",
    },
    ParamSpec {
        key: "GRUB_DISABLE_LINUX_PARTUUID",
        section: KERNEL,
        default: "true",
        choices: &[
            ("true", "never pass PARTUUID= as root="),
            ("false", "pass PARTUUID= when booting without an initrd"),
        ],
        input: InputRule::OneOf,
        brief: "Do not use the partition UUID for root=",
    },
    ParamSpec {
        key: "GRUB_DISABLE_OS_PROBER",
        section: DISCOVERY,
        default: "true",
        choices: &[
            ("true", "do not look for other operating systems"),
            ("false", "add other operating systems to the menu"),
        ],
        input: InputRule::OneOf,
        brief: "Skip searching for other operating systems",
    },
    ParamSpec {
        key: "GRUB_ENABLE_CRYPTODISK",
        section: SECURITY,
        default: "n",
        choices: &[
            ("y", "unlock encrypted disks (LUKS) from GRUB"),
            ("n", "no encrypted disk support"),
            ("true", "same as y"),
            ("false", "same as n"),
        ],
        input: InputRule::OneOf,
        brief: "Let GRUB unlock encrypted disks",
    },
    ParamSpec {
        key: "GRUB_TERMINAL_INPUT",
        section: TERMINAL,
        default: "console",
        choices: &[
            ("console", "the PC keyboard"),
            ("serial", "a serial port (needs GRUB_SERIAL_COMMAND)"),
        ],
        input: InputRule::Any,
        brief: "Input device for the menu and command line",
    },
    ParamSpec {
        key: "GRUB_TERMINAL_OUTPUT",
        section: TERMINAL,
        default: "gfxterm",
        choices: &[
            ("gfxterm", "graphical output"),
            ("console", "plain text output"),
            ("serial", "a serial port (needs GRUB_SERIAL_COMMAND)"),
        ],
        input: InputRule::Any,
        brief: "Output device for the menu",
    },
    ParamSpec {
        key: "GRUB_SERIAL_COMMAND",
        section: TERMINAL,
        default: "",
        choices: &[],
        input: InputRule::Any,
        brief: "Serial port setup, e.g. serial --unit=0 --speed=115200",
    },
];

/// Every known variable, grouped by section
pub fn all() -> &'static [ParamSpec] {
    PARAMS
}

pub fn lookup(key: &str) -> Option<&'static ParamSpec> {
    PARAMS.iter().find(|spec| spec.key == key)
}

/// Reject `value` when `key` is a known variable and the value breaks its
/// rule. Unknown variables accept anything.
pub fn validate_input(key: &str, value: &str) -> GrubwizResult<()> {
    match lookup(key).map(|spec| spec.check(value)) {
        Some(Err(reason)) => Err(GrubwizError::InvalidValue {
            key: key.to_string(),
            reason,
        }),
        _ => Ok(()),
    }
}

/// `WIDTHxHEIGHT` or `WIDTHxHEIGHTxDEPTH`
pub fn is_resolution(mode: &str) -> bool {
    let parts: Vec<&str> = mode.split('x').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

fn is_gfx_mode(mode: &str) -> bool {
    matches!(mode.to_ascii_lowercase().as_str(), "auto" | "keep") || is_resolution(mode)
}

/// Optional `-` followed by ASCII digits
fn parse_integer(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
