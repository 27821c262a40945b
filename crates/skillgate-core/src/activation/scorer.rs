//! Rule scoring
//!
//! A rule's score is the sum of fixed contributions:
//!
//! | Check | Weight | Reason |
//! |-------|--------|--------|
//! | keyword hit | 2 | `keyword match` |
//! | intent hit | 3 | `intent match` |
//! | file context hit | 2 | `file context (N files)` |
//!
//! File context only counts when at least one context file is supplied. When
//! files matched `filePatterns` but every one of them is also excluded, the
//! [`ExclusionPolicy`] decides what happens to the rest of the score.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use super::request::ActivationRequest;
use crate::rules::Rule;

pub const KEYWORD_WEIGHT: u32 = 2;
pub const INTENT_WEIGHT: u32 = 3;
pub const FILE_WEIGHT: u32 = 2;

pub const REASON_KEYWORD: &str = "keyword match";
pub const REASON_INTENT: &str = "intent match";
pub const REASON_EXCLUDED: &str = "excluded by pattern";

/// What a fully excluded file context does to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExclusionPolicy {
    /// Annul the whole score; the rule is disqualified for this input
    #[default]
    VetoRule,
    /// Withhold only the file contribution; keyword and intent hits stand
    DropFileContribution,
}

/// Score of one rule against one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub rule: &'a Rule,
    pub score: u32,
    pub reasons: Vec<String>,
}

impl<'a> MatchResult<'a> {
    fn none(rule: &'a Rule) -> Self {
        Self {
            rule,
            score: 0,
            reasons: Vec::new(),
        }
    }

    /// Whether the rule matched at all
    pub fn is_match(&self) -> bool {
        self.score > 0
    }

    pub fn name(&self) -> &'a str {
        self.rule.name()
    }
}

impl Serialize for MatchResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchResult", 6)?;
        state.serialize_field("name", self.rule.name())?;
        state.serialize_field("enforcement", &self.rule.enforcement())?;
        state.serialize_field("priority", &self.rule.priority())?;
        state.serialize_field("type", &self.rule.rule_type())?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("reasons", &self.reasons)?;
        state.end()
    }
}

/// Applies the matchers of one rule to a request
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    exclusion: ExclusionPolicy,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusion_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.exclusion = policy;
        self
    }

    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        self.exclusion
    }

    /// Score a single rule
    pub fn score<'a>(&self, rule: &'a Rule, request: &ActivationRequest) -> MatchResult<'a> {
        if let Some(var) = rule.env_override() {
            if request.is_override_active(var) {
                debug!("Rule {:?} skipped: {} is set", rule.name(), var);
                return MatchResult::none(rule);
            }
        }

        let prompt = request.prompt.as_str();
        let mut score = 0;
        let mut reasons = Vec::new();

        if rule.keywords().is_match(prompt) {
            score += KEYWORD_WEIGHT;
            reasons.push(REASON_KEYWORD.to_string());
        }

        if rule.intents().is_match(prompt) {
            score += INTENT_WEIGHT;
            reasons.push(REASON_INTENT.to_string());
        }

        if !request.context_files.is_empty() && !rule.file_patterns().is_empty() {
            let matched: Vec<&str> = request
                .context_files
                .iter()
                .map(String::as_str)
                .filter(|f| rule.file_patterns().is_match(f))
                .collect();

            if !matched.is_empty() {
                let included = matched
                    .iter()
                    .filter(|f| !rule.exclude_patterns().is_match(f))
                    .count();

                if included > 0 {
                    score += FILE_WEIGHT;
                    reasons.push(format!("file context ({} files)", included));
                } else {
                    debug!(
                        "Rule {:?}: all {} matching files excluded",
                        rule.name(),
                        matched.len()
                    );
                    if self.exclusion == ExclusionPolicy::VetoRule {
                        return MatchResult {
                            rule,
                            score: 0,
                            reasons: vec![REASON_EXCLUDED.to_string()],
                        };
                    }
                }
            }
        }

        MatchResult {
            rule,
            score,
            reasons,
        }
    }
}
