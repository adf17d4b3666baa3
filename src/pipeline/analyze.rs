// Topic analysis pipeline.
//
// Searches the revision source for pages matching a topic, fetches each
// page's revision window concurrently, runs the pure per-page analysis, and
// rolls the results into a topic summary. Page analyses are independent —
// one page's acquisition failure is logged and counted, never fatal to the
// run.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::analysis::aggregate::BiasThresholds;
use crate::analysis::page::analyze_page;
use crate::analysis::report::{PageSummary, TopicSummary};
use crate::catalog::TopicCatalog;
use crate::wiki::traits::RevisionSource;

/// Analyze one topic: up to `page_count` matching pages, up to
/// `revision_count` recent revisions each.
///
/// `catalog` gates the controversial-topic indicator; pass `None` to leave
/// that indicator uncomputed.
pub async fn run(
    source: &dyn RevisionSource,
    catalog: Option<&TopicCatalog>,
    thresholds: &BiasThresholds,
    topic: &str,
    page_count: usize,
    revision_count: usize,
    concurrency: usize,
) -> Result<TopicSummary> {
    let titles = source.search_pages(topic, page_count).await?;
    if titles.is_empty() {
        info!(topic, "No pages found");
        return Ok(TopicSummary::build(topic, Vec::new(), 0));
    }

    info!(topic, pages = titles.len(), "Analyzing pages");

    let pb = ProgressBar::new(titles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Pages [{bar:30}] {pos}/{len} ({eta})")
            .expect("progress template is valid"),
    );

    // Acquisition fans out; the analysis itself is pure and cheap, so it
    // runs inline as each fetch completes.
    let results: Vec<Result<PageSummary>> = stream::iter(titles.iter().map(|title| {
        let pb = &pb;
        async move {
            let page = source.fetch_revisions(title, revision_count).await?;
            let controversial = catalog.map(|c| c.is_controversial(topic, &page.title));
            let summary = analyze_page(
                &page.title,
                page.page_id,
                &page.revisions,
                controversial,
                thresholds,
            );
            pb.inc(1);
            Ok(summary)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let mut pages = Vec::new();
    let mut failed_pages = 0u32;
    for result in results {
        match result {
            Ok(summary) => pages.push(summary),
            Err(e) => {
                warn!(topic, error = %e, "Failed to acquire page, skipping");
                failed_pages += 1;
            }
        }
    }

    // buffer_unordered completes out of order; restore a stable page order
    // so repeated runs produce diffable reports.
    pages.sort_by(|a, b| a.title.cmp(&b.title));

    Ok(TopicSummary::build(topic, pages, failed_pages))
}
