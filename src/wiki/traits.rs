// RevisionSource trait — the seam between acquisition and analysis.
//
// The analysis pipeline is pure; everything that touches the network sits
// behind this trait. Tests use StaticSource to drive the full pipeline
// without HTTP.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use super::revisions::RawRevision;

/// A page's raw revision history as acquired from the source.
#[derive(Debug, Clone)]
pub struct PageRevisions {
    pub title: String,
    pub page_id: Option<u64>,
    pub revisions: Vec<RawRevision>,
}

/// Supplies ordered revision records for pages matching a topic query.
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Titles of up to `limit` pages matching the query.
    async fn search_pages(&self, query: &str, limit: usize) -> Result<Vec<String>>;

    /// Up to `limit` most-recent raw revisions of one page.
    async fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions>;
}

/// In-memory revision source for tests and offline runs.
///
/// Search returns the stored titles in insertion order; fetching an unknown
/// title fails, which exercises the pipeline's per-page failure handling.
#[derive(Default)]
pub struct StaticSource {
    titles: Vec<String>,
    pages: HashMap<String, PageRevisions>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageRevisions) -> Self {
        self.titles.push(page.title.clone());
        self.pages.insert(page.title.clone(), page);
        self
    }

    /// Register a title that search returns but fetching fails for.
    pub fn with_unfetchable(mut self, title: &str) -> Self {
        self.titles.push(title.to_string());
        self
    }
}

#[async_trait]
impl RevisionSource for StaticSource {
    async fn search_pages(&self, _query: &str, limit: usize) -> Result<Vec<String>> {
        Ok(self.titles.iter().take(limit).cloned().collect())
    }

    async fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions> {
        let page = self
            .pages
            .get(title)
            .ok_or_else(|| anyhow::anyhow!("No revisions stored for '{title}'"))?;
        let mut page = page.clone();
        page.revisions.truncate(limit);
        Ok(page)
    }
}
