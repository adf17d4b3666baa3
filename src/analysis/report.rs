// Report assembly — stable, serializable page and topic summaries.
//
// Pure construction from already-derived values: nothing here re-runs
// classification or recomputes deltas. Field order is fixed by the struct
// definitions so serialized output diffs cleanly across runs.

use serde::Serialize;

use super::aggregate::{BiasIndicator, PageStats, Severity};
use super::delta::RevisionDelta;

/// Read-only aggregate for one analyzed page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub title: String,
    pub page_id: Option<u64>,
    pub page_url: String,
    pub total_revisions: u32,
    pub skipped_revisions: u32,
    pub bot_edits: u32,
    /// Bot share of analyzed revisions, 0-100
    pub bot_edit_percent: f64,
    pub anonymous_edits: u32,
    /// Citation deltas in page order (content-compared pairs only)
    pub citation_deltas: Vec<i64>,
    /// Size deltas in page order, one per adjacent pair
    pub size_deltas: Vec<i64>,
    pub indicators: Vec<BiasIndicator>,
}

impl PageSummary {
    pub fn build(
        title: &str,
        page_id: Option<u64>,
        stats: &PageStats,
        deltas: &[RevisionDelta],
        indicators: Vec<BiasIndicator>,
    ) -> Self {
        Self {
            title: title.to_string(),
            page_id,
            page_url: page_url(title),
            total_revisions: stats.total_revisions,
            skipped_revisions: stats.skipped_revisions,
            bot_edits: stats.bot_edits,
            bot_edit_percent: stats.bot_ratio() * 100.0,
            anonymous_edits: stats.anonymous_edits,
            citation_deltas: deltas
                .iter()
                .filter(|d| d.content_compared)
                .map(|d| d.citation_delta)
                .collect(),
            size_deltas: deltas.iter().map(|d| d.size_delta).collect(),
            indicators,
        }
    }
}

/// Read-only aggregate over a topic's analyzed pages.
///
/// Sums and means over page-level counts; classification is never re-run at
/// this level.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub pages_analyzed: u32,
    /// Pages whose acquisition failed; the rest of the run still completes
    pub failed_pages: u32,
    pub total_edits: u32,
    pub total_bot_edits: u32,
    /// Bot share across all analyzed pages, 0-100
    pub overall_bot_percent: f64,
    /// Coarse severity from the indicator count across pages
    pub bias_severity: Severity,
    pub indicator_count: u32,
    pub pages: Vec<PageSummary>,
}

impl TopicSummary {
    pub fn build(topic: &str, pages: Vec<PageSummary>, failed_pages: u32) -> Self {
        let total_edits: u32 = pages.iter().map(|p| p.total_revisions).sum();
        let total_bot_edits: u32 = pages.iter().map(|p| p.bot_edits).sum();
        let indicator_count: u32 = pages.iter().map(|p| p.indicators.len() as u32).sum();

        let overall_bot_percent = if total_edits > 0 {
            total_bot_edits as f64 / total_edits as f64 * 100.0
        } else {
            0.0
        };

        let bias_severity = match indicator_count {
            n if n > 3 => Severity::High,
            n if n > 1 => Severity::Medium,
            _ => Severity::Low,
        };

        Self {
            topic: topic.to_string(),
            pages_analyzed: pages.len() as u32,
            failed_pages,
            total_edits,
            total_bot_edits,
            overall_bot_percent,
            bias_severity,
            indicator_count,
            pages,
        }
    }
}

fn page_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"))
}
