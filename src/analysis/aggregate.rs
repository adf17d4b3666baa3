// Bias-indicator aggregation — pure reduction over per-page statistics.
//
// Indicators are a function of the accumulated statistics only, never of a
// single revision. Every rule tolerates zero-sample groups by skipping the
// indicator instead of dividing by zero.

use serde::{Deserialize, Serialize};

/// Configurable thresholds for the indicator rules.
///
/// Defaults follow the values the indicator rules were tuned with; override
/// through `Config::thresholds` (REVLENS_* env vars) or directly in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasThresholds {
    /// Bot edit ratio above this flags high-bot-ratio (default 0.30)
    pub bot_ratio_floor: f64,
    /// Maintenance bias: bot mean |size delta| at or below this fraction of
    /// the human mean flags the page (default 0.50)
    pub maintenance_size_ratio: f64,
    /// Citation bias: bot/human mean citation deltas further apart than this
    /// flag the page; opposite signs always flag (default 1.0)
    pub citation_delta_gap: f64,
    /// Controversial-topic bias: bot ratio high-water mark on pages whose
    /// topic the catalog marks controversial (default 0.20)
    pub controversial_high_water: f64,
    /// Neutrality bias: human mean compliance exceeding bot mean by more
    /// than this flags the page (default 0.10)
    pub neutrality_gap: f64,
    /// Amplification bias: bot share of amplification events above this
    /// flags the page (default 0.50)
    pub amplification_bot_share: f64,
    /// Deviation (observed / threshold) at or above this is HIGH severity;
    /// at or above 1.0 is MEDIUM (default 2.0)
    pub high_severity_multiplier: f64,
}

impl Default for BiasThresholds {
    fn default() -> Self {
        Self {
            bot_ratio_floor: 0.30,
            maintenance_size_ratio: 0.50,
            citation_delta_gap: 1.0,
            controversial_high_water: 0.20,
            neutrality_gap: 0.10,
            amplification_bot_share: 0.50,
            high_severity_multiplier: 2.0,
        }
    }
}

/// Indicator severity, derived from how far past its threshold a signal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Map a deviation (observed value / flag threshold) to a severity.
    /// At or above `high_multiplier` × the threshold is High, at or above
    /// the threshold itself is Medium, anything below is Low.
    pub fn from_deviation(deviation: f64, high_multiplier: f64) -> Self {
        match deviation {
            d if d >= high_multiplier => Severity::High,
            d if d >= 1.0 => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kinds of systematic bot/human differences the aggregator detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorKind {
    HighBotRatio,
    CitationBias,
    AmplificationBias,
    MaintenanceBias,
    ControversialTopicBias,
    NeutralityBias,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::HighBotRatio => "high_bot_ratio",
            IndicatorKind::CitationBias => "citation_bias",
            IndicatorKind::AmplificationBias => "amplification_bias",
            IndicatorKind::MaintenanceBias => "maintenance_bias",
            IndicatorKind::ControversialTopicBias => "controversial_topic_bias",
            IndicatorKind::NeutralityBias => "neutrality_bias",
        }
    }
}

/// A flagged bias pattern with the numeric evidence that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasIndicator {
    pub kind: IndicatorKind,
    pub severity: Severity,
    pub description: String,
    /// The bot-side statistic behind the flag
    pub bot_value: f64,
    /// The human-side statistic, where the rule compares groups
    pub human_value: Option<f64>,
    /// The configured threshold the statistic was measured against
    pub threshold: f64,
}

/// Running mean over one classification group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupMean {
    pub samples: u32,
    pub sum: f64,
}

impl GroupMean {
    pub fn push(&mut self, value: f64) {
        self.samples += 1;
        self.sum += value;
    }

    /// None when the group has no samples — callers skip, never divide.
    pub fn mean(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.sum / self.samples as f64)
    }
}

/// Accumulated statistics for one page, produced by the analysis fold.
#[derive(Debug, Clone, Default)]
pub struct PageStats {
    pub total_revisions: u32,
    pub skipped_revisions: u32,
    pub bot_edits: u32,
    pub anonymous_edits: u32,
    /// Mean |size_delta| per group, over deltas attributed to that group
    pub bot_abs_size: GroupMean,
    pub human_abs_size: GroupMean,
    /// Mean citation_delta per group (content-compared deltas only)
    pub bot_citation: GroupMean,
    pub human_citation: GroupMean,
    /// Mean neutrality compliance per group (content-present revisions only)
    pub bot_neutrality: GroupMean,
    pub human_neutrality: GroupMean,
    pub amplification_events: u32,
    pub bot_amplifications: u32,
}

impl PageStats {
    /// Bot edit ratio in [0, 1]; 0 for an empty page.
    pub fn bot_ratio(&self) -> f64 {
        if self.total_revisions == 0 {
            0.0
        } else {
            self.bot_edits as f64 / self.total_revisions as f64
        }
    }
}

/// Run every indicator rule against a page's accumulated statistics.
///
/// `controversial` is the topic catalog's verdict; `None` means no catalog
/// was supplied and the controversial-topic rule is not computed.
pub fn detect_indicators(
    stats: &PageStats,
    controversial: Option<bool>,
    t: &BiasThresholds,
) -> Vec<BiasIndicator> {
    let mut indicators = Vec::new();
    let ratio = stats.bot_ratio();

    // High bot ratio
    if ratio > t.bot_ratio_floor {
        indicators.push(BiasIndicator {
            kind: IndicatorKind::HighBotRatio,
            severity: Severity::from_deviation(ratio / t.bot_ratio_floor, t.high_severity_multiplier),
            description: format!(
                "Significant bot edit ratio ({:.1}%) may indicate automated bias",
                ratio * 100.0
            ),
            bot_value: ratio,
            human_value: None,
            threshold: t.bot_ratio_floor,
        });
    }

    // Citation bias: opposite-sign means, or means further apart than the gap
    if let (Some(bot), Some(human)) = (stats.bot_citation.mean(), stats.human_citation.mean()) {
        let gap = (bot - human).abs();
        let opposite_sign = bot * human < 0.0;
        if opposite_sign || gap > t.citation_delta_gap {
            indicators.push(BiasIndicator {
                kind: IndicatorKind::CitationBias,
                severity: Severity::from_deviation(
                    gap / t.citation_delta_gap,
                    t.high_severity_multiplier,
                ),
                description: format!(
                    "Bots and humans show different citation patterns (bot: {bot:.1}, human: {human:.1})"
                ),
                bot_value: bot,
                human_value: Some(human),
                threshold: t.citation_delta_gap,
            });
        }
    }

    // Amplification bias: bots behind most large content increases
    if stats.amplification_events > 0 {
        let share = stats.bot_amplifications as f64 / stats.amplification_events as f64;
        if share > t.amplification_bot_share {
            indicators.push(BiasIndicator {
                kind: IndicatorKind::AmplificationBias,
                severity: Severity::from_deviation(
                    share / t.amplification_bot_share,
                    t.high_severity_multiplier,
                ),
                description: format!(
                    "Bots responsible for {}/{} content amplifications",
                    stats.bot_amplifications, stats.amplification_events
                ),
                bot_value: share,
                human_value: None,
                threshold: t.amplification_bot_share,
            });
        }
    }

    // Maintenance bias: bot edits materially smaller than human edits
    if let (Some(bot), Some(human)) = (stats.bot_abs_size.mean(), stats.human_abs_size.mean()) {
        if human > 0.0 && bot <= human * t.maintenance_size_ratio {
            let deviation = if bot > 0.0 {
                (human / bot) * t.maintenance_size_ratio
            } else {
                f64::INFINITY
            };
            indicators.push(BiasIndicator {
                kind: IndicatorKind::MaintenanceBias,
                severity: Severity::from_deviation(deviation, t.high_severity_multiplier),
                description: format!(
                    "Bots make smaller edits on average (bot: {bot:.0}, human: {human:.0} chars)"
                ),
                bot_value: bot,
                human_value: Some(human),
                threshold: t.maintenance_size_ratio,
            });
        }
    }

    // Controversial-topic bias: only computable with a catalog verdict
    if controversial == Some(true) && ratio > t.controversial_high_water {
        indicators.push(BiasIndicator {
            kind: IndicatorKind::ControversialTopicBias,
            severity: Severity::from_deviation(
                ratio / t.controversial_high_water,
                t.high_severity_multiplier,
            ),
            description: format!(
                "High bot activity ({:.1}%) on controversial topic",
                ratio * 100.0
            ),
            bot_value: ratio,
            human_value: None,
            threshold: t.controversial_high_water,
        });
    }

    // Neutrality bias: bot edits measurably less NPOV-compliant
    if let (Some(bot), Some(human)) = (stats.bot_neutrality.mean(), stats.human_neutrality.mean()) {
        let gap = human - bot;
        if gap > t.neutrality_gap {
            indicators.push(BiasIndicator {
                kind: IndicatorKind::NeutralityBias,
                severity: Severity::from_deviation(gap / t.neutrality_gap, t.high_severity_multiplier),
                description: format!(
                    "Bot edits are less NPOV-compliant on average (bot: {bot:.2}, human: {human:.2})"
                ),
                bot_value: bot,
                human_value: Some(human),
                threshold: t.neutrality_gap,
            });
        }
    }

    indicators
}
