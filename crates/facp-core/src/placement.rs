//! Placement-rule corpus and the keyword gate.
//!
//! Placement guidance arrives as a hierarchical sheet of human-readable
//! rules. The configurator does not interpret the rules; it only asserts
//! that a set of critical topics is covered somewhere in the corpus. A
//! corpus missing any of those topics is catastrophically incomplete input
//! and the engine refuses to construct.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// One placement rule at some depth of the guidance hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Ancestor labels from the outermost category down to this rule's parent
    pub path: Vec<String>,
    /// The rule text itself
    pub text: String,
}

/// Flat index over all loaded placement rules.
#[derive(Debug, Clone, Default)]
pub struct PlacementRuleIndex {
    rules: Vec<PlacementRule>,
    corpus_lower: String,
}

impl PlacementRuleIndex {
    pub fn new(rules: Vec<PlacementRule>) -> Self {
        let corpus_lower = rules
            .iter()
            .map(|rule| rule.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Self { rules, corpus_lower }
    }

    pub fn rules(&self) -> &[PlacementRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Does the corpus mention `keyword` anywhere (case-insensitive)?
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.corpus_lower.contains(&keyword.to_lowercase())
    }

    /// Assert that every required keyword appears somewhere in the corpus.
    ///
    /// Fails with [`ConfigError::IncompleteGuidance`] naming every missing
    /// term.
    pub fn ensure_keywords<I, S>(&self, required: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let missing: Vec<String> = required
            .into_iter()
            .filter(|keyword| !self.contains_keyword(keyword.as_ref()))
            .map(|keyword| keyword.as_ref().to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::IncompleteGuidance { missing })
        }
    }
}

/// Topics that must be covered by any usable placement corpus.
pub const REQUIRED_GUIDANCE_KEYWORDS: [&str; 5] = [
    "power supply",
    "audio controller",
    "amplifier",
    "display",
    "annunciator",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(path: &[&str], text: &str) -> PlacementRule {
        PlacementRule {
            path: path.iter().map(|p| p.to_string()).collect(),
            text: text.to_string(),
        }
    }

    fn full_corpus() -> PlacementRuleIndex {
        PlacementRuleIndex::new(vec![
            rule(&["Bay 1"], "Power Supply in block A"),
            rule(&["Bay 1"], "Audio Controller adjacent to amplifier bank"),
            rule(&["Door"], "Display and annunciator on the front door"),
        ])
    }

    #[test]
    fn complete_corpus_passes() {
        assert!(full_corpus()
            .ensure_keywords(REQUIRED_GUIDANCE_KEYWORDS)
            .is_ok());
    }

    #[test]
    fn missing_keywords_are_all_named() {
        let index = PlacementRuleIndex::new(vec![rule(&["Bay 1"], "Power Supply in block A")]);
        let err = index
            .ensure_keywords(REQUIRED_GUIDANCE_KEYWORDS)
            .unwrap_err();
        match err {
            ConfigError::IncompleteGuidance { missing } => {
                assert_eq!(
                    missing,
                    vec!["audio controller", "amplifier", "display", "annunciator"]
                );
            }
            other => panic!("expected IncompleteGuidance, got {other:?}"),
        }
    }

    #[test]
    fn keyword_check_is_case_insensitive() {
        assert!(full_corpus().contains_keyword("POWER SUPPLY"));
    }
}
