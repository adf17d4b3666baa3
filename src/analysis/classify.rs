// Bot/human classification — an ordered table of predicate → verdict rules.
//
// Evaluation is first-match-wins in a fixed order, so precedence lives in
// the table, not in control flow. Adding a heuristic means adding a row.
// classify() is a pure function of one revision; reproducible reports
// depend on that.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::revision::Revision;

/// Author class attached per revision (never stored on Revision itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorClass {
    Bot,
    Human,
    /// Reserved for future signal absence; no current rule produces it.
    Unknown,
}

/// The heuristic tier that produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierTier {
    /// Explicit automation flag on the revision
    Flagged,
    /// Author name matches a bot-naming convention
    NameHeuristic,
    /// Anonymous IP-style author (modeled as human, tracked separately)
    Anonymous,
    /// No rule matched
    Fallback,
}

impl ClassifierTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierTier::Flagged => "flagged",
            ClassifierTier::NameHeuristic => "heuristic-name",
            ClassifierTier::Anonymous => "anonymous",
            ClassifierTier::Fallback => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub class: AuthorClass,
    pub tier: ClassifierTier,
}

impl Classification {
    pub fn is_bot(&self) -> bool {
        self.class == AuthorClass::Bot
    }

    pub fn is_anonymous(&self) -> bool {
        self.tier == ClassifierTier::Anonymous
    }
}

/// Author-name substrings that indicate an automated account.
const BOT_NAME_MARKERS: &[&str] = &["bot", "automated", "script", "maintenance"];

type Predicate = fn(&Revision) -> bool;

/// The rule table. Order is the precedence contract: flag beats name
/// heuristic beats anonymous. The fallback verdict is not a row — it is
/// what classify() returns when no row matches.
const RULES: &[(Predicate, AuthorClass, ClassifierTier)] = &[
    (is_flagged, AuthorClass::Bot, ClassifierTier::Flagged),
    (has_bot_name, AuthorClass::Bot, ClassifierTier::NameHeuristic),
    (is_anonymous, AuthorClass::Human, ClassifierTier::Anonymous),
];

/// Classify one revision as bot- or human-authored.
pub fn classify(revision: &Revision) -> Classification {
    for (predicate, class, tier) in RULES {
        if predicate(revision) {
            return Classification {
                class: *class,
                tier: *tier,
            };
        }
    }
    Classification {
        class: AuthorClass::Human,
        tier: ClassifierTier::Fallback,
    }
}

fn is_flagged(revision: &Revision) -> bool {
    revision.bot_flagged == Some(true)
}

fn has_bot_name(revision: &Revision) -> bool {
    let name = revision.author.to_lowercase();
    BOT_NAME_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Anonymous edits are attributed to the editor's IP address.
fn is_anonymous(revision: &Revision) -> bool {
    revision.author.parse::<IpAddr>().is_ok()
}
