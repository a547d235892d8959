use lead_engine::workflows::report::RunSummary;
use std::fmt::Write as _;

pub(crate) fn render_summary(summary: &RunSummary, verb: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{verb} {} companies:", summary.total);
    for (tier, count) in &summary.tier_counts {
        let _ = writeln!(out, "  {tier}: {count}");
    }

    let _ = writeln!(out, "\nTop {}:", summary.top.len());
    for line in &summary.top {
        let mut signals = if line.signals.is_empty() {
            "none".to_string()
        } else {
            line.signals.join(", ")
        };
        if !line.enrichment_signals.is_empty() {
            let _ = write!(signals, " + {}", line.enrichment_signals.join(", "));
        }
        let flags = if line.flags.is_empty() {
            String::new()
        } else {
            format!(" ⚠ {}", line.flags.join(", "))
        };
        let _ = writeln!(
            out,
            "  {:3} | {:10} | {:45} | {signals}{flags}",
            line.score, line.tier, line.name
        );
    }

    if !summary.flagged.is_empty() {
        let _ = writeln!(out, "\nFlagged companies ({}):", summary.flagged.len());
        for line in &summary.flagged {
            let _ = writeln!(
                out,
                "  {:3} | {:45} | {}",
                line.score,
                line.name,
                line.flags.join(", ")
            );
        }
    }

    out
}
