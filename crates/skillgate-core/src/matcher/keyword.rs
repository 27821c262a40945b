//! Keyword trigger matching
//!
//! Keywords are literal words or phrases. They match case-insensitively and
//! only on word boundaries, so `api` hits "call the API" but not "rapidly".

use regex::Regex;
use tracing::debug;

/// Build the boundary-delimited regex for a single keyword
///
/// `\b` is not used because it fails for keywords whose edges are non-word
/// characters (`c++`, `.env`). Instead a neighbouring non-word character or
/// the text edge is required on both sides.
fn keyword_regex(keyword: &str) -> Option<Regex> {
    let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            debug!("Skipping keyword {:?}: {}", keyword, e);
            None
        }
    }
}

/// Compiled keyword set for one rule
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    keywords: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    /// Compile a keyword list, ignoring blank entries
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .filter_map(|k| keyword_regex(k).map(|re| (k.to_string(), re)))
            .collect();
        Self { keywords }
    }

    /// Check whether any keyword occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.keywords.iter().any(|(_, re)| re.is_match(text))
    }

    /// Keywords that occur in the text, in declaration order
    pub fn matching<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Number of usable keywords
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether there are no usable keywords
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Check if any keyword occurs in `text` as a whole word (case-insensitive)
///
/// # Examples
///
/// ```
/// use skillgate_core::matcher::keyword_match;
///
/// assert!(keyword_match("Call the API please", &["api"]));
/// assert!(!keyword_match("move rapidly", &["api"]));
/// assert!(!keyword_match("anything", &[] as &[&str]));
/// ```
pub fn keyword_match<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    KeywordMatcher::new(keywords).is_match(text)
}
