// Markdown report generation.
//
// Writes a human-readable automation-bias report covering one or more topic
// summaries. The parent directory is created if needed; returns the path
// actually written.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::analysis::report::TopicSummary;

/// Render topic summaries to a markdown file at `path`.
pub fn generate_report(summaries: &[TopicSummary], path: &str) -> Result<String> {
    let mut out = String::new();

    out.push_str("# Automation Bias Analysis Report\n\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    let total_pages: u32 = summaries.iter().map(|s| s.pages_analyzed).sum();
    let total_edits: u32 = summaries.iter().map(|s| s.total_edits).sum();
    let total_bot: u32 = summaries.iter().map(|s| s.total_bot_edits).sum();
    let overall = if total_edits > 0 {
        total_bot as f64 / total_edits as f64 * 100.0
    } else {
        0.0
    };

    out.push_str("## Overall statistics\n\n");
    out.push_str(&format!("- Topics analyzed: {}\n", summaries.len()));
    out.push_str(&format!("- Pages analyzed: {total_pages}\n"));
    out.push_str(&format!("- Total edits: {total_edits}\n"));
    out.push_str(&format!(
        "- Bot edits: {total_bot} ({overall:.1}% overall)\n\n"
    ));

    for summary in summaries {
        out.push_str(&format!("## Topic: {}\n\n", summary.topic));
        out.push_str(&format!(
            "{} pages, {} edits, {:.1}% bot, bias severity **{}**\n\n",
            summary.pages_analyzed,
            summary.total_edits,
            summary.overall_bot_percent,
            summary.bias_severity,
        ));
        if summary.failed_pages > 0 {
            out.push_str(&format!(
                "_{} page(s) could not be acquired._\n\n",
                summary.failed_pages
            ));
        }

        out.push_str("| Page | Edits | Bot % | Anonymous | Skipped | Indicators |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for page in &summary.pages {
            out.push_str(&format!(
                "| [{}]({}) | {} | {:.1}% | {} | {} | {} |\n",
                page.title,
                page.page_url,
                page.total_revisions,
                page.bot_edit_percent,
                page.anonymous_edits,
                page.skipped_revisions,
                page.indicators.len(),
            ));
        }
        out.push('\n');

        for page in &summary.pages {
            if page.indicators.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", page.title));
            for indicator in &page.indicators {
                out.push_str(&format!(
                    "- **{}** ({}): {}\n",
                    indicator.kind.as_str(),
                    indicator.severity,
                    indicator.description,
                ));
            }
            out.push('\n');
        }
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
        }
    }
    fs::write(path, out).with_context(|| format!("Failed to write report to {path}"))?;

    Ok(path.to_string())
}
