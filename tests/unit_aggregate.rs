// Unit tests for the indicator rules and severity mapping.
//
// PageStats is constructed directly so each rule can be exercised in
// isolation, including the zero-sample groups that must be skipped rather
// than divided by.

use revlens::analysis::aggregate::{
    detect_indicators, BiasThresholds, GroupMean, IndicatorKind, PageStats, Severity,
};

fn group(values: &[f64]) -> GroupMean {
    let mut g = GroupMean::default();
    for v in values {
        g.push(*v);
    }
    g
}

fn kinds(indicators: &[revlens::analysis::aggregate::BiasIndicator]) -> Vec<IndicatorKind> {
    indicators.iter().map(|i| i.kind).collect()
}

// ============================================================
// Zero-division safety
// ============================================================

#[test]
fn no_bot_samples_skips_group_comparisons() {
    let stats = PageStats {
        total_revisions: 10,
        human_abs_size: group(&[120.0, 300.0]),
        human_citation: group(&[1.0, 2.0]),
        human_neutrality: group(&[0.9, 0.95]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, Some(true), &BiasThresholds::default());
    assert!(
        indicators.is_empty(),
        "no bot samples must produce no bot-referencing indicators: {indicators:?}"
    );
}

#[test]
fn empty_page_produces_no_indicators() {
    let stats = PageStats::default();
    let indicators = detect_indicators(&stats, Some(true), &BiasThresholds::default());
    assert!(indicators.is_empty());
}

// ============================================================
// Maintenance bias
// ============================================================

#[test]
fn maintenance_bias_flags_small_bot_edits() {
    let stats = PageStats {
        total_revisions: 4,
        bot_edits: 1,
        bot_abs_size: group(&[10.0]),
        human_abs_size: group(&[390.0]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, None, &BiasThresholds::default());
    let m = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::MaintenanceBias)
        .expect("maintenance bias should be flagged");
    assert_eq!(m.severity, Severity::High);
    assert_eq!(m.bot_value, 10.0);
    assert_eq!(m.human_value, Some(390.0));
}

#[test]
fn maintenance_bias_not_flagged_when_bot_edits_are_comparable() {
    let stats = PageStats {
        total_revisions: 4,
        bot_edits: 2,
        bot_abs_size: group(&[150.0]),
        human_abs_size: group(&[200.0]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, None, &BiasThresholds::default());
    assert!(!kinds(&indicators).contains(&IndicatorKind::MaintenanceBias));
}

// ============================================================
// Citation bias
// ============================================================

#[test]
fn opposite_sign_citation_means_flag_even_below_gap() {
    let stats = PageStats {
        total_revisions: 6,
        bot_edits: 3,
        bot_citation: group(&[-0.2]),
        human_citation: group(&[0.3]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, None, &BiasThresholds::default());
    let c = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::CitationBias)
        .expect("opposite-sign means should flag");
    // Gap 0.5 is below the 1.0 threshold — flagged for the sign flip, Low severity
    assert_eq!(c.severity, Severity::Low);
}

#[test]
fn large_same_sign_gap_flags_citation_bias() {
    let stats = PageStats {
        total_revisions: 6,
        bot_edits: 3,
        bot_citation: group(&[0.5]),
        human_citation: group(&[3.0]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, None, &BiasThresholds::default());
    let c = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::CitationBias)
        .expect("gap above threshold should flag");
    // Gap 2.5 ≥ 2x the 1.0 threshold
    assert_eq!(c.severity, Severity::High);
}

// ============================================================
// Controversial-topic bias
// ============================================================

#[test]
fn controversial_bias_needs_catalog_verdict() {
    let stats = PageStats {
        total_revisions: 10,
        bot_edits: 4,
        ..PageStats::default()
    };
    let t = BiasThresholds::default();

    // 40% bot on a controversial page: flagged, and 0.4 >= 2 * 0.2 means High
    let flagged = detect_indicators(&stats, Some(true), &t);
    let c = flagged
        .iter()
        .find(|i| i.kind == IndicatorKind::ControversialTopicBias)
        .expect("controversial page above high-water should flag");
    assert_eq!(c.severity, Severity::High);

    // Same statistics, no catalog: the indicator is not computed
    let no_catalog = detect_indicators(&stats, None, &t);
    assert!(!kinds(&no_catalog).contains(&IndicatorKind::ControversialTopicBias));

    // Same statistics, catalog says not controversial
    let not_controversial = detect_indicators(&stats, Some(false), &t);
    assert!(!kinds(&not_controversial).contains(&IndicatorKind::ControversialTopicBias));
}

// ============================================================
// High bot ratio and neutrality
// ============================================================

#[test]
fn high_bot_ratio_severity_scales_with_deviation() {
    let t = BiasThresholds::default();

    let medium = PageStats {
        total_revisions: 20,
        bot_edits: 7, // 35%
        ..PageStats::default()
    };
    let m = detect_indicators(&medium, None, &t);
    let hi = m
        .iter()
        .find(|i| i.kind == IndicatorKind::HighBotRatio)
        .expect("35% should flag");
    assert_eq!(hi.severity, Severity::Medium);

    let high = PageStats {
        total_revisions: 20,
        bot_edits: 13, // 65% ≥ 2x the 30% floor
        ..PageStats::default()
    };
    let h = detect_indicators(&high, None, &t);
    let hi = h
        .iter()
        .find(|i| i.kind == IndicatorKind::HighBotRatio)
        .unwrap();
    assert_eq!(hi.severity, Severity::High);
}

#[test]
fn neutrality_bias_flags_less_compliant_bots() {
    let stats = PageStats {
        total_revisions: 6,
        bot_edits: 3,
        bot_neutrality: group(&[0.6, 0.6]),
        human_neutrality: group(&[0.9, 0.9]),
        ..PageStats::default()
    };
    let indicators = detect_indicators(&stats, None, &BiasThresholds::default());
    let n = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::NeutralityBias)
        .expect("0.3 compliance gap should flag");
    // Gap 0.3 ≥ 2x the 0.1 threshold
    assert_eq!(n.severity, Severity::High);
}

// ============================================================
// Threshold configuration
// ============================================================

#[test]
fn custom_thresholds_change_flagging() {
    let stats = PageStats {
        total_revisions: 10,
        bot_edits: 2, // 20%
        ..PageStats::default()
    };

    let default_t = BiasThresholds::default();
    assert!(!kinds(&detect_indicators(&stats, None, &default_t))
        .contains(&IndicatorKind::HighBotRatio));

    let strict = BiasThresholds {
        bot_ratio_floor: 0.10,
        ..BiasThresholds::default()
    };
    assert!(kinds(&detect_indicators(&stats, None, &strict))
        .contains(&IndicatorKind::HighBotRatio));
}

#[test]
fn amplification_bias_requires_bot_majority() {
    let balanced = PageStats {
        total_revisions: 10,
        amplification_events: 4,
        bot_amplifications: 2,
        ..PageStats::default()
    };
    let t = BiasThresholds::default();
    assert!(!kinds(&detect_indicators(&balanced, None, &t))
        .contains(&IndicatorKind::AmplificationBias));

    let bot_heavy = PageStats {
        total_revisions: 10,
        amplification_events: 4,
        bot_amplifications: 3,
        ..PageStats::default()
    };
    let indicators = detect_indicators(&bot_heavy, None, &t);
    let a = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::AmplificationBias)
        .expect("bot share 0.75 should flag");
    assert_eq!(a.severity, Severity::Medium);
}
