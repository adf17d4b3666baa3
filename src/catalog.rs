// Topic catalog — which topics count as controversial.
//
// The controversial-topic indicator needs an external verdict about the
// topic; this catalog supplies it. Analysis runs without one — the pipeline
// passes `None` and that single indicator is simply not computed.

use std::collections::HashSet;

/// Built-in topics the survey command analyzes, all marked controversial.
pub const SURVEY_TOPICS: &[&str] = &[
    "climate change",
    "vaccination",
    "artificial intelligence",
    "gun control",
    "abortion",
    "immigration",
    "renewable energy",
    "genetic engineering",
    "social media",
    "cryptocurrency",
];

/// Page-title words that suggest a controversial subject regardless of the
/// topic the page was found under.
const CONTROVERSY_KEYWORDS: &[&str] = &[
    "controversy",
    "debate",
    "dispute",
    "criticism",
    "opposition",
    "denial",
    "hesitancy",
];

/// Maps topics to controversy metadata.
pub struct TopicCatalog {
    controversial: HashSet<String>,
}

impl Default for TopicCatalog {
    /// Catalog pre-loaded with the survey topics.
    fn default() -> Self {
        Self {
            controversial: SURVEY_TOPICS.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

impl TopicCatalog {
    pub fn empty() -> Self {
        Self {
            controversial: HashSet::new(),
        }
    }

    pub fn mark_controversial(&mut self, topic: &str) {
        self.controversial.insert(topic.to_lowercase());
    }

    /// Whether a page found under `topic` should be treated as controversial.
    /// True when the topic itself is cataloged or the page title carries a
    /// controversy keyword.
    pub fn is_controversial(&self, topic: &str, page_title: &str) -> bool {
        if self.controversial.contains(&topic.to_lowercase()) {
            return true;
        }
        let title = page_title.to_lowercase();
        CONTROVERSY_KEYWORDS.iter().any(|k| title.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_knows_survey_topics() {
        let catalog = TopicCatalog::default();
        assert!(catalog.is_controversial("Climate Change", "Climate"));
        assert!(!catalog.is_controversial("rust programming", "Rust (programming language)"));
    }

    #[test]
    fn title_keywords_mark_any_topic() {
        let catalog = TopicCatalog::empty();
        assert!(catalog.is_controversial("history", "Historiography controversy"));
        assert!(!catalog.is_controversial("history", "Historiography"));
    }
}
