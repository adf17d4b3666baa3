// Per-page analysis pass — the core fold.
//
// Normalizes a page's raw revision records, sorts them into their canonical
// order, classifies each revision, computes adjacent-pair deltas, and folds
// everything into PageStats for the indicator rules. Pure and synchronous:
// one call, one summary, no shared state with other pages.

use tracing::warn;

use crate::wiki::revisions::RawRevision;

use super::aggregate::{detect_indicators, BiasThresholds, PageStats};
use super::classify::{classify, Classification};
use super::delta::{compute_deltas, RevisionDelta};
use super::neutrality;
use super::report::PageSummary;
use super::revision::{normalize, Revision};

/// Factor by which a revision must grow the page to count as a content
/// amplification event.
const AMPLIFICATION_FACTOR: f64 = 1.5;

/// Analyze one page's raw revision history into a summary.
///
/// Malformed records are logged and skipped, never fatal. A page with zero
/// usable revisions yields an all-zero summary so topic totals stay
/// auditable.
pub fn analyze_page(
    title: &str,
    page_id: Option<u64>,
    raw_revisions: &[RawRevision],
    controversial: Option<bool>,
    thresholds: &BiasThresholds,
) -> PageSummary {
    let mut skipped = 0u32;
    let mut revisions: Vec<Revision> = Vec::with_capacity(raw_revisions.len());
    for raw in raw_revisions {
        match normalize(raw) {
            Ok(rev) => revisions.push(rev),
            Err(e) => {
                warn!(page = title, error = %e, "Skipping malformed revision");
                skipped += 1;
            }
        }
    }

    // Canonical page-local order. The API delivers newest-first; sorting
    // here keeps acquisition-order bugs from surfacing as bias signals.
    revisions.sort_by_key(|r| (r.timestamp, r.revision_id));

    let classifications: Vec<Classification> = revisions.iter().map(classify).collect();
    let deltas = compute_deltas(&revisions);

    let stats = fold_stats(&revisions, &classifications, &deltas, skipped);
    let indicators = detect_indicators(&stats, controversial, thresholds);

    PageSummary::build(title, page_id, &stats, &deltas, indicators)
}

/// Reduce per-revision records into the page's accumulated statistics.
fn fold_stats(
    revisions: &[Revision],
    classifications: &[Classification],
    deltas: &[RevisionDelta],
    skipped: u32,
) -> PageStats {
    let mut stats = PageStats {
        total_revisions: revisions.len() as u32,
        skipped_revisions: skipped,
        ..PageStats::default()
    };

    for (rev, class) in revisions.iter().zip(classifications) {
        if class.is_bot() {
            stats.bot_edits += 1;
        }
        if class.is_anonymous() {
            stats.anonymous_edits += 1;
        }
        // Neutrality is only meaningful where the text is available;
        // content-unavailable revisions would read as fully compliant.
        if rev.has_content() {
            let compliance = neutrality::assess(rev.content.as_deref());
            if class.is_bot() {
                stats.bot_neutrality.push(compliance);
            } else {
                stats.human_neutrality.push(compliance);
            }
        }
    }

    // Deltas are attributed to the revision that made the change: delta i
    // describes the edit revisions[i + 1] performed.
    for (i, d) in deltas.iter().enumerate() {
        let class = &classifications[i + 1];
        let size_mean = if class.is_bot() {
            &mut stats.bot_abs_size
        } else {
            &mut stats.human_abs_size
        };
        size_mean.push(d.size_delta.unsigned_abs() as f64);

        if d.content_compared {
            let citation_mean = if class.is_bot() {
                &mut stats.bot_citation
            } else {
                &mut stats.human_citation
            };
            citation_mean.push(d.citation_delta as f64);
        }
    }

    // Amplification events: a revision growing the page past 1.5x its
    // previous size.
    let trailing = classifications.get(1..).unwrap_or_default();
    for (pair, class) in revisions.windows(2).zip(trailing) {
        let prev = pair[0].content_length.max(0) as f64;
        let curr = pair[1].content_length as f64;
        if curr > prev * AMPLIFICATION_FACTOR {
            stats.amplification_events += 1;
            if class.is_bot() {
                stats.bot_amplifications += 1;
            }
        }
    }

    stats
}
