//! Intent pattern matching
//!
//! Intent patterns are regex fragments tested case-insensitively against the
//! whole prompt, unanchored. A pattern that does not compile is kept as a
//! plain case-insensitive substring instead of being dropped.

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// One compiled intent pattern
#[derive(Debug, Clone)]
enum IntentPattern {
    Regex(Regex),
    /// Lowercased literal used when the source was not valid regex
    Literal(String),
}

impl IntentPattern {
    fn compile(source: &str) -> Self {
        match RegexBuilder::new(source).case_insensitive(true).build() {
            Ok(re) => Self::Regex(re),
            Err(e) => {
                debug!(
                    "Intent pattern {:?} is not valid regex, using substring match: {}",
                    source, e
                );
                Self::Literal(source.to_lowercase())
            }
        }
    }

    fn is_match(&self, text: &str, lowered: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(text),
            Self::Literal(needle) => lowered.contains(needle.as_str()),
        }
    }
}

/// Compiled intent patterns for one rule
#[derive(Debug, Clone, Default)]
pub struct IntentMatcher {
    patterns: Vec<(String, IntentPattern)>,
}

impl IntentMatcher {
    /// Compile intent patterns, ignoring empty entries
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.trim().is_empty())
            .map(|p| (p.to_string(), IntentPattern::compile(p)))
            .collect();
        Self { patterns }
    }

    /// Check whether any pattern occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .any(|(_, pattern)| pattern.is_match(text, &lowered))
    }

    /// Source patterns that fell back to substring matching
    pub fn literal_fallbacks(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|(_, p)| matches!(p, IntentPattern::Literal(_)))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    /// Number of usable patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether there are no usable patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Check if any intent pattern occurs in `text` (case-insensitive, unanchored)
///
/// # Examples
///
/// ```
/// use skillgate_core::matcher::intent_match;
///
/// assert!(intent_match("please delete the production database", &["delete.*production"]));
/// assert!(!intent_match("please delete the staging database", &["delete.*production"]));
/// ```
pub fn intent_match<S: AsRef<str>>(text: &str, patterns: &[S]) -> bool {
    IntentMatcher::new(patterns).is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_unanchored() {
        assert!(intent_match(
            "please delete the production database",
            &["delete.*production"]
        ));
        assert!(intent_match("so, create a new component", &["create.*component"]));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(intent_match("DELETE the Production DB", &["delete.*production"]));
        assert!(intent_match("delete the production db", &["DELETE.*PRODUCTION"]));
    }

    #[test]
    fn test_any_pattern_suffices() {
        let patterns = ["drop\\s+table", "truncate"];
        assert!(intent_match("Truncate the users table", &patterns));
        assert!(intent_match("drop   table users", &patterns));
        assert!(!intent_match("select * from users", &patterns));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let matcher = IntentMatcher::new(&["fix (bug"]);
        assert_eq!(matcher.literal_fallbacks(), vec!["fix (bug"]);
        assert!(matcher.is_match("please FIX (BUG 42) today"));
        assert!(!matcher.is_match("please fix bug 42"));
    }

    #[test]
    fn test_empty_patterns() {
        assert!(!intent_match("anything", &[] as &[&str]));
        assert!(!intent_match("anything", &["", "  "]));
        assert!(IntentMatcher::new(&[""]).is_empty());
    }

    #[test]
    fn test_valid_patterns_have_no_fallbacks() {
        let matcher = IntentMatcher::new(&["(create|add).*route", "deploy"]);
        assert!(matcher.literal_fallbacks().is_empty());
        assert_eq!(matcher.len(), 2);
    }
}
