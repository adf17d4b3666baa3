// Neutral-point-of-view compliance heuristic.
//
// compliance = 1 - min(1, loaded_language_penalty + imbalance_penalty)
//
// The loaded-language penalty scales the bias-phrase score; the imbalance
// penalty counts one-sided attribution phrases ("critics claim", "experts
// agree") relative to text length. 1.0 means no detected violations.

use super::phrases;

/// Weight applied to the bias-phrase score when deriving the loaded-language
/// penalty. A text where 50% of tokens are loaded maxes out the penalty.
const LOADED_LANGUAGE_WEIGHT: f64 = 2.0;

/// Per-occurrence weight of one-sided qualifier phrases, normalized by token
/// count: one occurrence per 20 tokens saturates the imbalance penalty, while
/// a rare occurrence in a long article barely registers.
const IMBALANCE_WEIGHT: f64 = 20.0;

/// Attribution phrasings that present one side's view as consensus.
const ONE_SIDED_QUALIFIERS: &[&str] = &[
    "critics claim",
    "critics argue",
    "proponents insist",
    "supporters insist",
    "experts agree",
    "many believe",
    "some say",
    "it is widely believed",
    "widely regarded",
];

/// Score a text's NPOV compliance in [0, 1].
///
/// Absent or empty text returns 1.0 — no text, no detected violations.
pub fn assess(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 1.0;
    };
    let token_count = text.split_whitespace().count();
    if token_count == 0 {
        return 1.0;
    }

    let loaded_penalty = phrases::detect(text).score * LOADED_LANGUAGE_WEIGHT;

    let lower = text.to_lowercase();
    let one_sided = ONE_SIDED_QUALIFIERS
        .iter()
        .map(|q| lower.matches(q).count())
        .sum::<usize>() as f64;
    let imbalance_penalty = one_sided * IMBALANCE_WEIGHT / token_count as f64;

    1.0 - (loaded_penalty + imbalance_penalty).min(1.0)
}
