//! Plain-text rendering of reports, card records, and rejections.

use siteprobe_cards::CardRecord;
use siteprobe_core::SiteProbeError;
use siteprobe_scanner::{ClassifierKind, SiteReport, Verdict};

const RULE: &str = "━━━━━━━━━━━━━━";
const PRESENT: &str = "😞";
const ABSENT: &str = "🔥";

/// Footer printed under generated card records.
pub const CARD_FOOTER: &str = "Info: synthetic test strings, not issued by any bank";

/// Single-address report with heading.
#[must_use]
pub fn report(report: &SiteReport) -> String {
    format!("🔍 Gateways Fetched Successfully ✅\n{}", report_block(report))
}

/// Batch output: one block per report, input order.
#[must_use]
pub fn batch(reports: &[SiteReport]) -> String {
    reports
        .iter()
        .map(report_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_block(report: &SiteReport) -> String {
    let mut lines = vec![RULE.to_string(), format!("🔹 URL: {}", report.address())];
    for (kind, value) in report.entries() {
        let line = match kind {
            ClassifierKind::ChallengePage => {
                format!("🔹 {kind}: {value} {}", marker(report.challenge_page()))
            }
            ClassifierKind::EdgeProxy => {
                format!("🔹 {kind}: {value} {}", marker(report.edge_proxy()))
            }
            _ => format!("🔹 {kind}: {value}"),
        };
        lines.push(line);
    }
    lines.push(String::new());
    lines.join("\n")
}

fn marker(verdict: &Verdict<bool>) -> &'static str {
    if matches!(verdict, Verdict::Known(true)) {
        PRESENT
    } else {
        ABSENT
    }
}

/// Generated card records with header and footer.
#[must_use]
pub fn cards(prefix: &str, records: &[CardRecord]) -> String {
    let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
    format!(
        "BIN ⇾ {prefix}\nAmount ⇾ {}\n\n{}\n\n{CARD_FOOTER}",
        records.len(),
        lines.join("\n")
    )
}

/// User-facing text for a rejected request.
#[must_use]
pub fn rejection(err: &SiteProbeError) -> String {
    match err {
        SiteProbeError::Throttled { .. } => {
            "Please wait a few seconds before making another request.".to_string()
        }
        SiteProbeError::Validation(reason) => format!("Invalid request: {reason}"),
        other => format!("Request failed: {other}"),
    }
}
