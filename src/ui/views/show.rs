use grubwiz::{param_catalog, ConfigModel, SuppressionState};
use serde_json::json;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// `KEY=value` for every assignment, in file order. Hidden variables are
/// skipped unless `show_hidden`, and then marked.
///
/// With `show_hidden`, known variables the file does not set follow, with
/// the value GRUB uses for them.
pub fn render_settings(
    model: &ConfigModel,
    suppressions: &SuppressionState,
    show_hidden: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    let mut hidden = 0usize;
    for assignment in model.assignments() {
        let is_hidden = suppressions.is_hidden(assignment.key());
        if is_hidden && !show_hidden {
            hidden += 1;
            continue;
        }
        let marker = if is_hidden {
            format!(" {}", Icon::Hidden.colored(supports_color, supports_unicode))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}={}{}\n",
            ColoredText::plain(assignment.key()).bold().render(supports_color),
            assignment.value(),
            marker
        ));
    }
    if hidden > 0 {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim(format!("({hidden} hidden, use --all to show)")).render(supports_color)
        ));
    }
    if show_hidden {
        let unset: Vec<_> = param_catalog::all()
            .iter()
            .filter(|spec| !model.contains(spec.key))
            .collect();
        if !unset.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                ColoredText::dim("Not set (GRUB default):").render(supports_color)
            ));
        }
        for spec in unset {
            out.push_str(&format!(
                "  {}={}  {}\n",
                spec.key,
                spec.default,
                ColoredText::dim(format!("# {}", spec.brief)).render(supports_color)
            ));
        }
    }
    out
}

pub fn settings_json(model: &ConfigModel, suppressions: &SuppressionState, show_hidden: bool) -> serde_json::Value {
    let settings: Vec<serde_json::Value> = model
        .assignments()
        .filter(|a| show_hidden || !suppressions.is_hidden(a.key()))
        .map(|a| {
            json!({
                "key": a.key(),
                "value": a.value(),
                "quoted": a.is_quoted(),
                "hidden": suppressions.is_hidden(a.key()),
            })
        })
        .collect();
    if !show_hidden {
        return json!({ "event": "show", "settings": settings });
    }
    let unset: Vec<serde_json::Value> = param_catalog::all()
        .iter()
        .filter(|spec| !model.contains(spec.key))
        .map(|spec| {
            json!({
                "key": spec.key,
                "default": spec.default,
                "section": spec.section,
                "brief": spec.brief,
            })
        })
        .collect();
    json!({ "event": "show", "settings": settings, "unset": unset })
}
