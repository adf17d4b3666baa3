// Content deltas between temporally adjacent revisions.
//
// Deltas are computed in one left-to-right pass over a page's sorted
// revision window and never mutated afterward. The first revision in the
// window has no predecessor and produces no delta — it contributes only to
// absolute counts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::phrases;
use super::revision::Revision;

/// Derived change between an ordered pair `(prev, curr)` of revisions.
/// Attributed to `curr` — the revision that made the change.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionDelta {
    pub revision_id: u64,
    pub timestamp: DateTime<Utc>,
    pub size_delta: i64,
    pub citation_delta: i64,
    pub bias_phrase_delta: f64,
    /// False when either side was content-unavailable; citation and
    /// bias-phrase deltas are zeroed in that case rather than reported as
    /// a false removal.
    pub content_compared: bool,
}

/// Compute the delta for one adjacent pair. `prev` must strictly precede
/// `curr` in the page's `(timestamp, revision_id)` order.
pub fn delta(prev: &Revision, curr: &Revision) -> RevisionDelta {
    let content_compared = prev.has_content() && curr.has_content();

    let (citation_delta, bias_phrase_delta) = if content_compared {
        (
            curr.citation_count as i64 - prev.citation_count as i64,
            phrases::score(curr.content.as_deref()) - phrases::score(prev.content.as_deref()),
        )
    } else {
        (0, 0.0)
    };

    RevisionDelta {
        revision_id: curr.revision_id,
        timestamp: curr.timestamp,
        size_delta: curr.content_length - prev.content_length,
        citation_delta,
        bias_phrase_delta,
        content_compared,
    }
}

/// Compute deltas for every adjacent pair in an ordered window.
///
/// Idempotent — re-running over the same window yields identical deltas.
/// A window of zero or one revisions yields no deltas.
pub fn compute_deltas(revisions: &[Revision]) -> Vec<RevisionDelta> {
    revisions
        .windows(2)
        .map(|pair| delta(&pair[0], &pair[1]))
        .collect()
}
