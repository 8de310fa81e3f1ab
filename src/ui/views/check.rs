use std::path::Path;

use grubwiz::{Evaluation, Finding, Severity};
use serde_json::json;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme;

pub fn render_check_header(path: &Path, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Check, "grubwiz check");
    header.add("File", path.display().to_string());
    header.render(supports_color, supports_unicode)
}

fn render_finding(finding: &Finding, supports_color: bool, supports_unicode: bool) -> String {
    let severity = finding.severity();
    let icon = theme::severity_icon(severity, supports_unicode);
    let label = format!("{:<8}", severity.as_str());
    let mut line = format!(
        "{} {} {}",
        ColoredText::severity(icon, severity).render(supports_color),
        ColoredText::severity(label, severity).render(supports_color),
        ColoredText::plain(finding.key()).bold().render(supports_color),
    );
    if finding.is_suppressed() {
        line.push_str(&format!(
            " {}",
            ColoredText::dim("(suppressed)").render(supports_color)
        ));
    }
    line.push('\n');
    line.push_str(&format!(
        "  {} {}\n",
        Icon::Arrow.colored(supports_color, supports_unicode),
        finding.message()
    ));
    line
}

/// One entry per finding in evaluation order; suppressed findings only
/// when `include_suppressed` is set
pub fn render_findings(
    evaluation: &Evaluation,
    include_suppressed: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    evaluation
        .findings()
        .iter()
        .filter(|f| include_suppressed || !f.is_suppressed())
        .map(|f| render_finding(f, supports_color, supports_unicode))
        .collect()
}

pub fn render_check_summary(
    evaluation: &Evaluation,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let visible = evaluation.visible().count();
    let mut summary = if evaluation.blocks_commit() {
        ResultSummary::failure("Check FAILED")
    } else if visible > 0 {
        ResultSummary::success("Check passed with findings")
    } else {
        ResultSummary::success("No findings")
    };

    for severity in Severity::ALL {
        let count = evaluation.count(severity);
        if count > 0 {
            summary.add_stat(severity.as_str(), count);
        }
    }
    let suppressed = evaluation.suppressed().count();
    if suppressed > 0 {
        summary.add_stat("suppressed", suppressed);
    }
    if evaluation.blocks_commit() {
        summary.with_next_step("fix critical and error findings, or suppress them with `grubwiz suppress KEY.severity`");
    }

    summary.render(supports_color, supports_unicode)
}

pub fn finding_json(finding: &Finding) -> serde_json::Value {
    json!({
        "id": finding.id().to_string(),
        "key": finding.key(),
        "severity": finding.severity(),
        "message": finding.message(),
        "suppressed": finding.is_suppressed(),
    })
}

pub fn evaluation_json(path: &Path, evaluation: &Evaluation) -> serde_json::Value {
    let counts: serde_json::Map<String, serde_json::Value> = Severity::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), json!(evaluation.count(*s))))
        .collect();
    json!({
        "event": "check",
        "file": path.display().to_string(),
        "blocks_commit": evaluation.blocks_commit(),
        "counts": counts,
        "findings": evaluation.findings().iter().map(finding_json).collect::<Vec<_>>(),
    })
}
