// Serde types for the MediaWiki Action API (formatversion=2).
//
// These map the `action=query` response shapes we consume: search hits and
// revision listings. Raw revisions are deliberately loose — every field is
// optional because the API omits fields freely (suppressed users, deleted
// content, truncated histories). The normalizer in `analysis::revision`
// decides what is usable.

use serde::Deserialize;

/// Top-level envelope for `action=query` responses.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub query: Option<T>,
}

// -- list=search --

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

// -- prop=revisions --

#[derive(Debug, Deserialize)]
pub struct RevisionsQuery {
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
pub struct RawPage {
    pub pageid: Option<u64>,
    pub title: Option<String>,
    #[serde(default)]
    pub revisions: Vec<RawRevision>,
}

/// One raw revision record as returned by `rvprop=ids|timestamp|user|flags|size|tags|content`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRevision {
    pub revid: Option<u64>,
    /// ISO-8601 timestamp string (e.g. "2024-03-01T12:00:00Z")
    pub timestamp: Option<String>,
    pub user: Option<String>,
    /// Legacy flags string — contains "bot" for flagged automated edits
    pub flags: Option<String>,
    /// Edit tags — may also carry a "bot" marker
    #[serde(default)]
    pub tags: Vec<String>,
    /// Size of the revision in bytes, present even when content is withheld
    pub size: Option<i64>,
    pub slots: Option<RawSlots>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSlots {
    pub main: Option<RawSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSlot {
    pub content: Option<String>,
}

impl RawRevision {
    /// Pull the main-slot content text, if the API returned it.
    pub fn content_text(&self) -> Option<&str> {
        self.slots
            .as_ref()
            .and_then(|s| s.main.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}
