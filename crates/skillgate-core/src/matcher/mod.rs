//! Trigger matchers
//!
//! Three independent, stateless predicates used by the scorer:
//!
//! - [`keyword_match`] - whole-word, case-insensitive literal keywords
//! - [`intent_match`] - case-insensitive regex fragments against the prompt
//! - [`glob_match`] - anchored path globs for file context and exclusions
//!
//! Each has a compiled counterpart ([`KeywordMatcher`], [`IntentMatcher`],
//! [`GlobSet`]) that rules build once at load time.

pub mod glob;
pub mod intent;
pub mod keyword;

pub use glob::{GlobSet, glob_match, glob_to_regex, normalize_path};
pub use intent::{IntentMatcher, intent_match};
pub use keyword::{KeywordMatcher, keyword_match};
