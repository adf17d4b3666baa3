// Lexical bias-phrase detection.
//
// Scans text against a fixed lexicon of bias markers in three categories:
// loaded adjectives, euphemism/dysphemism terms, and absolutist qualifiers.
// Matching is case-insensitive and token-based — a lexicon entry only
// matches whole words, so "notorious" never fires inside "notoriously"
// unless that form is listed itself. Multi-word entries match runs of
// consecutive tokens.
//
// These are heuristics, not a learned model; the lexicon is deliberately
// small and high-precision.

use serde::Serialize;

/// Emotionally loaded adjectives that push a point of view.
const LOADED_ADJECTIVES: &[&str] = &[
    "shocking",
    "outrageous",
    "disgraceful",
    "notorious",
    "infamous",
    "egregious",
    "heroic",
    "brilliant",
    "disastrous",
    "corrupt",
    "radical",
    "extremist",
    "dangerous",
];

/// Euphemism/dysphemism vocabulary — word choice that frames the subject.
const FRAMING_TERMS: &[&str] = &[
    "regime",
    "propaganda",
    "terrorist",
    "freedom fighter",
    "collateral damage",
    "ethnic cleansing",
    "so-called",
];

/// Absolutist qualifiers that overstate certainty.
const ABSOLUTIST_QUALIFIERS: &[&str] = &[
    "always",
    "never",
    "undeniably",
    "unquestionably",
    "obviously",
    "clearly",
    "certainly",
    "undoubtedly",
    "everyone knows",
];

/// A matched lexicon entry and its byte position in the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub position: usize,
}

/// Result of scanning one text for bias phrases.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseReport {
    /// matched tokens / total tokens, clamped to [0, 1]
    pub score: f64,
    /// Matches in text order
    pub matches: Vec<PhraseMatch>,
}

impl PhraseReport {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matches: Vec::new(),
        }
    }
}

/// Scan text for lexical bias markers.
///
/// Empty or whitespace-only text yields score 0 and no matches — never an
/// error. Deterministic: the same text always produces the same report.
pub fn detect(text: &str) -> PhraseReport {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return PhraseReport::empty();
    }

    let mut matches = Vec::new();
    let mut matched_tokens = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        match match_at(&tokens, i) {
            Some((entry, token_len)) => {
                matches.push(PhraseMatch {
                    phrase: entry.to_string(),
                    position: tokens[i].1,
                });
                matched_tokens += token_len;
                i += token_len;
            }
            None => i += 1,
        }
    }

    let score = (matched_tokens as f64 / tokens.len() as f64).clamp(0.0, 1.0);
    PhraseReport { score, matches }
}

/// Convenience for the delta pass: score only, absent text scores 0.
pub fn score(text: Option<&str>) -> f64 {
    text.map(|t| detect(t).score).unwrap_or(0.0)
}

/// Try every lexicon entry at token position `i`, longest entries first so
/// "freedom fighter" wins over any single-word entry. Returns the entry and
/// how many tokens it consumed.
fn match_at(tokens: &[(String, usize)], i: usize) -> Option<(&'static str, usize)> {
    let mut best: Option<(&'static str, usize)> = None;
    for &entry in LOADED_ADJECTIVES
        .iter()
        .chain(FRAMING_TERMS)
        .chain(ABSOLUTIST_QUALIFIERS)
    {
        let words: Vec<&str> = entry.split_whitespace().collect();
        if i + words.len() > tokens.len() {
            continue;
        }
        let hit = words
            .iter()
            .zip(&tokens[i..i + words.len()])
            .all(|(w, (t, _))| t == w);
        if hit && best.is_none_or(|(_, len)| words.len() > len) {
            best = Some((entry, words.len()));
        }
    }
    best
}

/// Split text into lowercase word tokens with their byte offsets.
///
/// A token is a run of alphanumeric characters, hyphens, or apostrophes, so
/// "so-called" stays one token.
fn tokenize(text: &str) -> Vec<(String, usize)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        let word_char = ch.is_alphanumeric() || ch == '-' || ch == '\'';
        match (word_char, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                tokens.push((text[s..idx].to_lowercase(), s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((text[s..].to_lowercase(), s));
    }
    tokens
}
