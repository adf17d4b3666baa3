use std::env;

use anyhow::Result;

use crate::analysis::aggregate::BiasThresholds;

/// Central configuration loaded from environment variables.
///
/// Everything has a working default — the tool runs against English
/// Wikipedia out of the box. The .env file is loaded automatically at
/// startup via dotenvy.
pub struct Config {
    /// MediaWiki Action API endpoint
    pub api_url: String,
    /// User agent sent with every API request (Wikipedia etiquette requires
    /// something descriptive)
    pub user_agent: String,
    /// Where the markdown report is written
    pub report_path: String,
    /// Where the JSON results file is written
    pub results_path: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// documented defaults.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_url: env::var("WIKI_API_URL")
                .unwrap_or_else(|_| crate::wiki::client::DEFAULT_API_URL.to_string()),
            user_agent: env::var("REVLENS_USER_AGENT")
                .unwrap_or_else(|_| "revlens/0.1 (automation-bias research)".to_string()),
            report_path: env::var("REVLENS_REPORT_PATH")
                .unwrap_or_else(|_| "output/revlens-report.md".to_string()),
            results_path: env::var("REVLENS_RESULTS_PATH")
                .unwrap_or_else(|_| "output/revlens-results.json".to_string()),
        })
    }

    /// Indicator thresholds, with per-field env overrides on top of the
    /// documented defaults. Unset or unparseable vars keep the default.
    pub fn thresholds(&self) -> BiasThresholds {
        let d = BiasThresholds::default();
        BiasThresholds {
            bot_ratio_floor: env_f64("REVLENS_BOT_RATIO_FLOOR", d.bot_ratio_floor),
            maintenance_size_ratio: env_f64(
                "REVLENS_MAINTENANCE_SIZE_RATIO",
                d.maintenance_size_ratio,
            ),
            citation_delta_gap: env_f64("REVLENS_CITATION_DELTA_GAP", d.citation_delta_gap),
            controversial_high_water: env_f64(
                "REVLENS_CONTROVERSIAL_HIGH_WATER",
                d.controversial_high_water,
            ),
            neutrality_gap: env_f64("REVLENS_NEUTRALITY_GAP", d.neutrality_gap),
            amplification_bot_share: env_f64(
                "REVLENS_AMPLIFICATION_BOT_SHARE",
                d.amplification_bot_share,
            ),
            high_severity_multiplier: env_f64(
                "REVLENS_HIGH_SEVERITY_MULTIPLIER",
                d.high_severity_multiplier,
            ),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
