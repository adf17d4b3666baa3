// Composition tests — the full pipeline over an in-memory revision source.
//
// These exercise the data flow search -> fetch -> normalize -> classify ->
// deltas -> indicators -> summaries without any network access, including
// the end-to-end scenarios the analysis was designed around.

use revlens::analysis::aggregate::{BiasThresholds, IndicatorKind, Severity};
use revlens::analysis::page::analyze_page;
use revlens::catalog::TopicCatalog;
use revlens::pipeline::analyze;
use revlens::wiki::revisions::{RawRevision, RawSlot, RawSlots};
use revlens::wiki::traits::{PageRevisions, StaticSource};

/// Article text with an exact character count and citation count:
/// `citations` `<ref>x</ref>` markers (12 chars each) padded with 'a'.
fn content(total_chars: usize, citations: usize) -> String {
    let markers = "<ref>x</ref>".repeat(citations);
    assert!(markers.chars().count() <= total_chars);
    let padding = total_chars - markers.chars().count();
    format!("{}{}", markers, "a".repeat(padding))
}

fn raw(id: u64, timestamp: &str, user: &str, text: String, bot_flag: bool) -> RawRevision {
    RawRevision {
        revid: Some(id),
        timestamp: Some(timestamp.to_string()),
        user: Some(user.to_string()),
        flags: bot_flag.then(|| "bot".to_string()),
        tags: Vec::new(),
        size: None,
        slots: Some(RawSlots {
            main: Some(RawSlot {
                content: Some(text),
            }),
        }),
    }
}

// ============================================================
// Scenario 1: one page, three revisions
// ============================================================

/// Revisions (in canonical order): human 1000 chars / 5 citations, then a
/// bot-flagged edit to 1010 / 4, then a human edit to 1400 / 6.
fn scenario_one_page() -> PageRevisions {
    PageRevisions {
        title: "Example article".to_string(),
        page_id: Some(42),
        // Newest-first, as the live API delivers — the analysis must
        // re-sort before computing deltas
        revisions: vec![
            raw(103, "2024-03-03T00:00:00Z", "Carol", content(1400, 6), false),
            raw(102, "2024-03-02T00:00:00Z", "FixupBot", content(1010, 4), true),
            raw(101, "2024-03-01T00:00:00Z", "Alice", content(1000, 5), false),
        ],
    }
}

#[test]
fn scenario_one_counts_and_deltas() {
    let page = scenario_one_page();
    let summary = analyze_page(
        &page.title,
        page.page_id,
        &page.revisions,
        Some(false),
        &BiasThresholds::default(),
    );

    assert_eq!(summary.total_revisions, 3);
    assert_eq!(summary.skipped_revisions, 0);
    assert_eq!(summary.bot_edits, 1);
    assert!((summary.bot_edit_percent - 33.3).abs() < 0.1);
    assert_eq!(summary.anonymous_edits, 0);
    assert_eq!(summary.size_deltas, vec![10, 390]);
    assert_eq!(summary.citation_deltas, vec![-1, 2]);
}

#[test]
fn scenario_one_flags_maintenance_bias() {
    let page = scenario_one_page();
    let summary = analyze_page(
        &page.title,
        page.page_id,
        &page.revisions,
        Some(false),
        &BiasThresholds::default(),
    );

    let maintenance = summary
        .indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::MaintenanceBias)
        .expect("bot |delta| 10 vs human mean 390 should flag maintenance bias");
    assert_eq!(maintenance.bot_value, 10.0);
    assert_eq!(maintenance.human_value, Some(390.0));

    // Citation means flip sign between groups (bot -1, human +2)
    let citation = summary
        .indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::CitationBias)
        .expect("opposite-sign citation means should flag");
    assert_eq!(citation.severity, Severity::High);
}

#[test]
fn analysis_is_deterministic_across_runs() {
    let page = scenario_one_page();
    let run = || {
        let s = analyze_page(
            &page.title,
            page.page_id,
            &page.revisions,
            Some(false),
            &BiasThresholds::default(),
        );
        serde_json::to_string(&s).unwrap()
    };
    assert_eq!(run(), run());
}

// ============================================================
// Scenario 2: two-page topic, one controversial high-bot page
// ============================================================

fn human_page(title: &str) -> PageRevisions {
    let revisions = (0..5)
        .map(|i| {
            raw(
                200 + i,
                &format!("2024-03-0{}T00:00:00Z", i + 1),
                "Alice",
                content(500 + i as usize, 2),
                false,
            )
        })
        .collect();
    PageRevisions {
        title: title.to_string(),
        page_id: Some(1),
        revisions,
    }
}

fn mixed_page(title: &str) -> PageRevisions {
    // 2 bot-flagged of 5 revisions = 40% bot
    let revisions = (0..5)
        .map(|i| {
            let bot = i >= 3;
            raw(
                300 + i,
                &format!("2024-03-0{}T00:00:00Z", i + 1),
                if bot { "TidyBot" } else { "Bob" },
                content(800 + i as usize, 3),
                bot,
            )
        })
        .collect();
    PageRevisions {
        title: title.to_string(),
        page_id: Some(2),
        revisions,
    }
}

#[tokio::test]
async fn scenario_two_topic_rollup_and_controversial_flag() {
    let source = StaticSource::new()
        .with_page(human_page("Climate change research"))
        .with_page(mixed_page("Climate change denial"));

    let catalog = TopicCatalog::default();
    let summary = analyze::run(
        &source,
        Some(&catalog),
        &BiasThresholds::default(),
        "climate change",
        5,
        30,
        2,
    )
    .await
    .unwrap();

    assert_eq!(summary.pages_analyzed, 2);
    assert_eq!(summary.failed_pages, 0);
    assert_eq!(summary.total_edits, 10);
    assert_eq!(summary.total_bot_edits, 2);
    assert!((summary.overall_bot_percent - 20.0).abs() < 1e-9);

    let controversial_page = summary
        .pages
        .iter()
        .find(|p| p.title == "Climate change denial")
        .unwrap();
    let indicator = controversial_page
        .indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::ControversialTopicBias)
        .expect("40% bot on a controversial topic should flag");
    // 40% is 2x the 20% high-water mark
    assert_eq!(indicator.severity, Severity::High);

    let clean_page = summary
        .pages
        .iter()
        .find(|p| p.title == "Climate change research")
        .unwrap();
    assert_eq!(clean_page.bot_edits, 0);
    assert!(!clean_page
        .indicators
        .iter()
        .any(|i| i.kind == IndicatorKind::ControversialTopicBias));
}

// ============================================================
// Degraded input
// ============================================================

#[test]
fn malformed_revision_is_skipped_not_fatal() {
    let mut page = scenario_one_page();
    // Strip the timestamp from one record
    page.revisions.push(RawRevision {
        revid: Some(999),
        timestamp: None,
        user: Some("Mallory".to_string()),
        ..Default::default()
    });

    let summary = analyze_page(
        &page.title,
        page.page_id,
        &page.revisions,
        None,
        &BiasThresholds::default(),
    );
    assert_eq!(summary.total_revisions, page.revisions.len() as u32 - 1);
    assert_eq!(summary.skipped_revisions, 1);
}

#[test]
fn empty_revision_set_reports_zeroes() {
    let summary = analyze_page(
        "Ghost town",
        None,
        &[],
        Some(true),
        &BiasThresholds::default(),
    );
    assert_eq!(summary.total_revisions, 0);
    assert_eq!(summary.bot_edit_percent, 0.0);
    assert!(summary.size_deltas.is_empty());
    assert!(summary.indicators.is_empty());
}

#[tokio::test]
async fn acquisition_failure_spares_the_rest_of_the_run() {
    let source = StaticSource::new()
        .with_page(human_page("Reachable page"))
        .with_unfetchable("Ghost page");

    let summary = analyze::run(
        &source,
        None,
        &BiasThresholds::default(),
        "anything",
        5,
        30,
        2,
    )
    .await
    .unwrap();

    assert_eq!(summary.pages_analyzed, 1);
    assert_eq!(summary.failed_pages, 1);
    assert_eq!(summary.pages[0].title, "Reachable page");
}

#[tokio::test]
async fn single_revision_page_has_counts_but_no_deltas() {
    let source = StaticSource::new().with_page(PageRevisions {
        title: "One edit wonder".to_string(),
        page_id: Some(7),
        revisions: vec![raw(
            1,
            "2024-03-01T00:00:00Z",
            "CleanupBot",
            content(600, 3),
            false,
        )],
    });

    let summary = analyze::run(
        &source,
        None,
        &BiasThresholds::default(),
        "anything",
        5,
        30,
        1,
    )
    .await
    .unwrap();

    let page = &summary.pages[0];
    assert_eq!(page.total_revisions, 1);
    assert_eq!(page.bot_edits, 1);
    assert!(page.size_deltas.is_empty());
    assert!(page.citation_deltas.is_empty());
    // No delta-based indicators are possible with a single revision; the
    // only signal left is the absolute bot ratio (100% here)
    assert!(page
        .indicators
        .iter()
        .all(|i| i.kind == IndicatorKind::HighBotRatio));
}
