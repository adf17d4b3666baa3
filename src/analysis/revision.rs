// Canonical revision entity and the raw-record normalizer.
//
// Raw API records are loose (every field optional); a Revision is the
// canonical form the rest of the analysis operates on. Normalization is the
// only place a record can be rejected — downstream functions are total.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Serialize;

use crate::wiki::revisions::RawRevision;

/// One historical edit of a page, normalized and immutable.
///
/// Revisions of a page are totally ordered by `(timestamp, revision_id)`.
#[derive(Debug, Clone, Serialize)]
pub struct Revision {
    pub revision_id: u64,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    /// `Some(true)` when the source explicitly tagged the edit as automated.
    /// `None` means the flag was absent — not evidence of a human edit.
    pub bot_flagged: Option<bool>,
    /// Size in characters when content is present, otherwise the API's
    /// reported byte size.
    pub content_length: i64,
    /// Full text snapshot. `None` = content-unavailable: citation and
    /// bias-phrase deltas against this revision degrade to zero.
    pub content: Option<String>,
    /// Count of citation markers in the content (0 when unavailable).
    pub citation_count: u32,
}

impl Revision {
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// A raw record unusable for analysis. Recovered locally: the page pass
/// logs it, bumps the skipped count, and continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRevision {
    MissingRevisionId,
    MissingTimestamp,
    UnparseableTimestamp,
}

impl fmt::Display for MalformedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRevision::MissingRevisionId => write!(f, "revision record has no revid"),
            MalformedRevision::MissingTimestamp => write!(f, "revision record has no timestamp"),
            MalformedRevision::UnparseableTimestamp => {
                write!(f, "revision timestamp is not valid ISO-8601")
            }
        }
    }
}

impl std::error::Error for MalformedRevision {}

/// Convert a raw API record into a canonical Revision.
///
/// Missing `revid` or `timestamp` rejects the record; everything else
/// degrades. A suppressed username becomes an empty author string, missing
/// content becomes the content-unavailable state.
pub fn normalize(raw: &RawRevision) -> Result<Revision, MalformedRevision> {
    let revision_id = raw.revid.ok_or(MalformedRevision::MissingRevisionId)?;
    let ts = raw
        .timestamp
        .as_deref()
        .ok_or(MalformedRevision::MissingTimestamp)?;
    let timestamp = DateTime::parse_from_rfc3339(ts)
        .map_err(|_| MalformedRevision::UnparseableTimestamp)?
        .with_timezone(&Utc);

    let content = raw.content_text().map(|s| s.to_string());
    let content_length = match &content {
        Some(text) => text.chars().count() as i64,
        None => raw.size.unwrap_or(0),
    };
    let citation_count = content.as_deref().map(count_citations).unwrap_or(0);

    Ok(Revision {
        revision_id,
        timestamp,
        author: raw.user.clone().unwrap_or_default(),
        bot_flagged: detect_bot_flag(raw),
        content_length,
        content,
        citation_count,
    })
}

/// Explicit automation flag from the API's flags string or edit tags.
///
/// Returns `Some(true)` when present, `None` when absent — the flag's
/// absence never asserts "human".
fn detect_bot_flag(raw: &RawRevision) -> Option<bool> {
    let flagged = raw
        .flags
        .as_deref()
        .is_some_and(|f| f.to_lowercase().contains("bot"))
        || raw.tags.iter().any(|t| t.to_lowercase().contains("bot"));
    flagged.then_some(true)
}

/// Count inline citation markers (`<ref ...>` tags) in article wikitext.
pub fn count_citations(text: &str) -> u32 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"(?i)<ref([\s/][^>]*)?>").expect("citation regex is valid"));
    re.find_iter(text).count() as u32
}
