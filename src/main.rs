use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use revlens::analysis::report::TopicSummary;
use revlens::config;
use revlens::catalog::{TopicCatalog, SURVEY_TOPICS};
use revlens::wiki::client::WikiClient;
use revlens::wiki::traits::RevisionSource;

/// Revlens: automation bias analysis for Wikipedia edit histories.
///
/// Estimates the share of bot vs human edits on topic pages and surfaces
/// content-change signals (citation deltas, edit sizes, bias phrases) that
/// indicate systematic differences between the two.
#[derive(Parser)]
#[command(name = "revlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the pages matching one topic query
    Analyze {
        /// Topic to search for (e.g. "climate change")
        topic: String,

        /// Max pages to analyze (default: 3)
        #[arg(long, default_value = "3")]
        pages: usize,

        /// Revisions to fetch per page (default: 30)
        #[arg(long, default_value = "30")]
        revisions: usize,

        /// Number of pages to fetch in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Skip the topic catalog — leaves the controversial-topic
        /// indicator uncomputed
        #[arg(long)]
        no_catalog: bool,
    },

    /// Analyze a single page by exact title
    Page {
        /// Page title (e.g. "Climate change")
        title: String,

        /// Revisions to fetch (default: 50)
        #[arg(long, default_value = "50")]
        revisions: usize,
    },

    /// Analyze the built-in controversial topic list and write a report
    Survey {
        /// How many of the built-in topics to analyze (default: 5)
        #[arg(long, default_value = "5")]
        topics: usize,

        /// Max pages per topic (default: 3)
        #[arg(long, default_value = "3")]
        pages: usize,

        /// Revisions to fetch per page (default: 30)
        #[arg(long, default_value = "30")]
        revisions: usize,

        /// Number of pages to fetch in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("revlens=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;
    let thresholds = config.thresholds();
    let client = WikiClient::new(&config.api_url, &config.user_agent)?;

    match cli.command {
        Commands::Analyze {
            topic,
            pages,
            revisions,
            concurrency,
            no_catalog,
        } => {
            println!("Analyzing topic: {}", topic.bold());

            let catalog = TopicCatalog::default();
            let catalog_ref = (!no_catalog).then_some(&catalog);

            let summary = revlens::pipeline::analyze::run(
                &client,
                catalog_ref,
                &thresholds,
                &topic,
                pages,
                revisions,
                concurrency,
            )
            .await?;

            revlens::output::terminal::display_topic_summary(&summary);
            save_results(&config, std::slice::from_ref(&summary))?;
        }

        Commands::Page { title, revisions } => {
            println!("Analyzing page: {}", title.bold());

            let page = client.fetch_revisions(&title, revisions).await?;
            let catalog = TopicCatalog::default();
            let controversial = Some(catalog.is_controversial(&title, &page.title));

            let summary = revlens::analysis::page::analyze_page(
                &page.title,
                page.page_id,
                &page.revisions,
                controversial,
                &thresholds,
            );

            revlens::output::terminal::display_page_summary(&summary);
        }

        Commands::Survey {
            topics,
            pages,
            revisions,
            concurrency,
        } => {
            let catalog = TopicCatalog::default();
            let selected: Vec<&str> = SURVEY_TOPICS.iter().take(topics).copied().collect();

            println!(
                "Surveying {} controversial topics ({} pages each)...",
                selected.len(),
                pages
            );

            let mut summaries = Vec::new();
            for topic in selected {
                println!("\nAnalyzing topic: {}", topic.bold());
                let summary = revlens::pipeline::analyze::run(
                    &client,
                    Some(&catalog),
                    &thresholds,
                    topic,
                    pages,
                    revisions,
                    concurrency,
                )
                .await?;
                revlens::output::terminal::display_topic_summary(&summary);
                summaries.push(summary);
            }

            let report_path =
                revlens::output::markdown::generate_report(&summaries, &config.report_path)?;
            save_results(&config, &summaries)?;

            println!("{}", format!("Markdown report saved to: {report_path}").bold());
        }
    }

    Ok(())
}

/// Serialize topic summaries to the configured JSON results file.
fn save_results(config: &config::Config, summaries: &[TopicSummary]) -> Result<()> {
    if let Some(parent) = std::path::Path::new(&config.results_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(summaries)?;
    std::fs::write(&config.results_path, json)?;
    println!("Results saved to: {}", config.results_path);
    Ok(())
}
