// MediaWiki Action API client — unauthenticated HTTP over reqwest.
//
// All the endpoints we need are public reads. This is a thin wrapper with a
// generic query helper; the higher-level search/fetch methods live on the
// RevisionSource impl below.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::revisions::{QueryResponse, RevisionsQuery, SearchQuery};
use super::traits::{PageRevisions, RevisionSource};

/// Default Action API endpoint for English Wikipedia.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Unauthenticated HTTP client for the MediaWiki Action API.
pub struct WikiClient {
    client: reqwest::Client,
    api_url: String,
}

impl WikiClient {
    /// Create a new client pointing at the given api.php endpoint.
    ///
    /// Wikipedia's API etiquette requires a descriptive user agent, so it is
    /// a required argument rather than a baked-in default.
    pub fn new(api_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to the Action API and deserialize the response.
    ///
    /// `params` are query string key-value pairs; `action` and `format` are
    /// appended automatically.
    pub async fn api_get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        debug!(api = %self.api_url, "Action API GET request");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .context("Action API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Action API returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .context("Failed to deserialize Action API response")
    }
}

#[async_trait]
impl RevisionSource for WikiClient {
    /// Search for page titles matching the query (`list=search`).
    async fn search_pages(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let limit_str = limit.to_string();
        let resp: QueryResponse<SearchQuery> = self
            .api_get(&[
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit_str),
            ])
            .await
            .with_context(|| format!("Search failed for '{query}'"))?;

        let hits = resp.query.map(|q| q.search).unwrap_or_default();
        Ok(hits.into_iter().map(|h| h.title).collect())
    }

    /// Fetch the most recent revisions of a page (`prop=revisions`).
    ///
    /// The API returns newest-first; ordering is not relied upon — the
    /// analysis pass re-sorts before computing deltas.
    async fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions> {
        let limit_str = limit.to_string();
        let resp: QueryResponse<RevisionsQuery> = self
            .api_get(&[
                ("prop", "revisions"),
                ("titles", title),
                ("rvprop", "ids|timestamp|user|flags|size|tags|content"),
                ("rvslots", "main"),
                ("rvlimit", &limit_str),
            ])
            .await
            .with_context(|| format!("Failed to fetch revisions for '{title}'"))?;

        let page = resp
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| anyhow::anyhow!("No page in revisions response for '{title}'"))?;

        Ok(PageRevisions {
            title: page.title.unwrap_or_else(|| title.to_string()),
            page_id: page.pageid,
            revisions: page.revisions,
        })
    }
}
