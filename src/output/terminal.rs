// Colored terminal output for topic and page summaries.
//
// This module handles all terminal-specific formatting: colors, tables,
// severity markers. The main.rs display paths delegate here.

use colored::Colorize;

use crate::analysis::aggregate::Severity;
use crate::analysis::report::{PageSummary, TopicSummary};
use crate::output::truncate_chars;

/// Display one topic's analysis as a table of pages plus indicator details.
pub fn display_topic_summary(summary: &TopicSummary) {
    println!(
        "\n{}",
        format!(
            "=== Topic: {} ({} pages) ===",
            summary.topic, summary.pages_analyzed
        )
        .bold()
    );
    println!(
        "  Edits: {}  Bot edits: {} ({:.1}%)  Bias severity: {}",
        summary.total_edits,
        summary.total_bot_edits,
        summary.overall_bot_percent,
        colorize_severity(summary.bias_severity),
    );
    if summary.failed_pages > 0 {
        println!(
            "  {} {} page(s) could not be acquired",
            "Warning:".yellow(),
            summary.failed_pages
        );
    }
    println!();

    // Header
    println!(
        "  {:<44} {:>6} {:>6} {:>7} {:>6} {:>5}",
        "Page".dimmed(),
        "Edits".dimmed(),
        "Bot%".dimmed(),
        "Anon".dimmed(),
        "Skip".dimmed(),
        "Flags".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for page in &summary.pages {
        println!(
            "  {:<44} {:>6} {:>5.1}% {:>7} {:>6} {:>5}",
            truncate_chars(&page.title, 42),
            page.total_revisions,
            page.bot_edit_percent,
            page.anonymous_edits,
            page.skipped_revisions,
            page.indicators.len(),
        );
    }

    // Indicator details
    for page in &summary.pages {
        if page.indicators.is_empty() {
            continue;
        }
        println!("\n  {}", page.title.bold());
        println!("    {}", page.page_url.dimmed());
        for indicator in &page.indicators {
            println!(
                "    [{}] {}: {}",
                colorize_severity(indicator.severity),
                indicator.kind.as_str(),
                indicator.description,
            );
        }
    }
    println!();
}

/// Display one page's summary in detail.
pub fn display_page_summary(page: &PageSummary) {
    println!("\n{}", format!("=== {} ===", page.title).bold());
    println!("  {}", page.page_url.dimmed());
    println!(
        "  Revisions analyzed: {}  (skipped: {})",
        page.total_revisions, page.skipped_revisions
    );
    println!(
        "  Bot edits: {} ({:.1}%)  Anonymous edits: {}",
        page.bot_edits, page.bot_edit_percent, page.anonymous_edits
    );

    if !page.size_deltas.is_empty() {
        let total: i64 = page.size_deltas.iter().sum();
        println!(
            "  Size deltas: {} changes, net {:+} chars",
            page.size_deltas.len(),
            total
        );
    }
    if !page.citation_deltas.is_empty() {
        let total: i64 = page.citation_deltas.iter().sum();
        println!(
            "  Citation deltas: {} compared, net {:+}",
            page.citation_deltas.len(),
            total
        );
    }

    if page.indicators.is_empty() {
        println!("  No bias indicators flagged.");
    } else {
        println!("  Bias indicators:");
        for indicator in &page.indicators {
            println!(
                "    [{}] {}: {}",
                colorize_severity(indicator.severity),
                indicator.kind.as_str(),
                indicator.description,
            );
        }
    }
    println!();
}

fn colorize_severity(severity: Severity) -> String {
    match severity {
        Severity::High => severity.as_str().red().bold().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::Low => severity.as_str().dimmed().to_string(),
    }
}
