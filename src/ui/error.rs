use grubwiz::GrubwizError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = crate::ui::terminal::detect_capabilities();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

/// What the user can do about an error, when there is something
fn fix_hint(err: &GrubwizError) -> Option<String> {
    match err {
        GrubwizError::ConcurrentModification { .. } => {
            Some("Re-run the command; it will load the file as it is now.".to_string())
        }
        GrubwizError::TargetMissing { .. } => {
            Some("Pass --file PATH or set GRUBWIZ_TARGET.".to_string())
        }
        GrubwizError::Corrupt { name, .. } => Some(format!(
            "Pick another backup, or remove this one with `grubwiz backup delete {name}`."
        )),
        GrubwizError::NotFound { .. } => {
            Some("Run `grubwiz backup list` to see the available names.".to_string())
        }
        GrubwizError::PersistenceWrite { message, .. } if message.contains("permission denied") => {
            Some("Editing /etc/default/grub needs root; try again with sudo.".to_string())
        }
        GrubwizError::InvalidValue { key, .. } if grubwiz::param_catalog::lookup(key).is_some() => {
            Some("Run `grubwiz show --all` to see the suggested values.".to_string())
        }
        GrubwizError::InvalidKey { .. } | GrubwizError::InvalidFindingId { .. } => {
            Some("Run `grubwiz check --all` to see finding identities.".to_string())
        }
        _ => None,
    }
}

fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {cause}\n"));
    }
    if let Some(hint) = err.downcast_ref::<GrubwizError>().and_then(fix_hint) {
        out.push_str(&format!(
            "  {} {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim("Fix:").render(supports_color),
            hint
        ));
    }
    out
}
