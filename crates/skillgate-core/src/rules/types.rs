//! Rule definition types

use crate::error::{SkillgateError, SkillgateResult};
use crate::matcher::{GlobSet, IntentMatcher, KeywordMatcher};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a matching rule is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Halt the caller until the skill is acknowledged
    Block,
    /// Advisory, same bucket as `Suggest`
    Warn,
    /// Advisory
    #[default]
    Suggest,
}

impl Enforcement {
    /// Whether matches land in the blocking bucket
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Block)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Warn => "warn",
            Self::Suggest => "suggest",
        }
    }
}

impl fmt::Display for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational ranking of a rule
///
/// Preserved and surfaced in output, never used in score arithmetic.
/// Variants are ordered most urgent first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of guidance a skill carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Domain guidance (frameworks, codebases, workflows)
    #[default]
    Domain,
    /// Safety guidance that usually pairs with `block`
    Guardrail,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain => f.write_str("domain"),
            Self::Guardrail => f.write_str("guardrail"),
        }
    }
}

/// Raw trigger lists as written in the rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub intent_patterns: Vec<String>,

    #[serde(default, alias = "pathPatterns")]
    pub file_patterns: Vec<String>,

    #[serde(default, alias = "pathExclusions")]
    pub exclude_patterns: Vec<String>,
}

impl TriggerDefinition {
    /// Whether no trigger kind has any entry
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.intent_patterns.is_empty() && self.file_patterns.is_empty()
    }
}

/// Conditions under which a rule sits out an invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipConditions {
    /// Environment variable that disables the rule when set to a non-empty value
    #[serde(default)]
    pub env_override: Option<String>,
}

/// One `skills` entry as written in the rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    #[serde(default)]
    pub description: String,

    #[serde(default, alias = "mode")]
    pub enforcement: Enforcement,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, rename = "type")]
    pub rule_type: RuleType,

    #[serde(default)]
    pub triggers: TriggerDefinition,

    /// Directive shown for blocking matches; `{skill}` expands to the rule name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_message: Option<String>,

    #[serde(default)]
    pub skip_conditions: SkipConditions,
}

// Builder methods
impl RuleDefinition {
    /// Create an empty definition (suggest, low priority, no triggers)
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.triggers.keywords.push(keyword.into());
        self
    }

    pub fn with_intent(mut self, pattern: impl Into<String>) -> Self {
        self.triggers.intent_patterns.push(pattern.into());
        self
    }

    pub fn with_file_pattern(mut self, glob: impl Into<String>) -> Self {
        self.triggers.file_patterns.push(glob.into());
        self
    }

    pub fn with_exclude_pattern(mut self, glob: impl Into<String>) -> Self {
        self.triggers.exclude_patterns.push(glob.into());
        self
    }

    pub fn with_block_message(mut self, message: impl Into<String>) -> Self {
        self.block_message = Some(message.into());
        self
    }

    pub fn with_env_override(mut self, var: impl Into<String>) -> Self {
        self.skip_conditions.env_override = Some(var.into());
        self
    }
}

/// A validated rule with its matchers compiled
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    definition: RuleDefinition,
    keywords: KeywordMatcher,
    intents: IntentMatcher,
    files: GlobSet,
    excludes: GlobSet,
}

impl Rule {
    /// Validate a definition and compile its triggers
    pub fn new(name: impl Into<String>, definition: RuleDefinition) -> SkillgateResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SkillgateError::invalid_rule(name, "rule name is empty"));
        }

        let triggers = &definition.triggers;
        Ok(Self {
            keywords: KeywordMatcher::new(&triggers.keywords),
            intents: IntentMatcher::new(&triggers.intent_patterns),
            files: GlobSet::new(&triggers.file_patterns),
            excludes: GlobSet::new(&triggers.exclude_patterns),
            name,
            definition,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn enforcement(&self) -> Enforcement {
        self.definition.enforcement
    }

    pub fn priority(&self) -> Priority {
        self.definition.priority
    }

    pub fn rule_type(&self) -> RuleType {
        self.definition.rule_type
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    pub fn keywords(&self) -> &KeywordMatcher {
        &self.keywords
    }

    pub fn intents(&self) -> &IntentMatcher {
        &self.intents
    }

    pub fn file_patterns(&self) -> &GlobSet {
        &self.files
    }

    pub fn exclude_patterns(&self) -> &GlobSet {
        &self.excludes
    }

    /// Environment variable that switches this rule off, if any
    pub fn env_override(&self) -> Option<&str> {
        self.definition
            .skip_conditions
            .env_override
            .as_deref()
            .filter(|v| !v.is_empty())
    }

    /// A rule without usable triggers can never match
    pub fn is_dormant(&self) -> bool {
        self.keywords.is_empty() && self.intents.is_empty() && self.files.is_empty()
    }

    /// Directive text for a blocking match
    pub fn block_message(&self) -> String {
        match &self.definition.block_message {
            Some(template) => template.replace("{skill}", &self.name),
            None => format!(
                "Use the '{}' skill before continuing (run /skill {}).",
                self.name, self.name
            ),
        }
    }
}

// Matchers are compiled from the definition, so name + definition is identity
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.definition == other.definition
    }
}

impl Eq for Rule {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_defaults() {
        let def: RuleDefinition = serde_json::from_str("{}").unwrap();
        assert_eq!(def.enforcement, Enforcement::Suggest);
        assert_eq!(def.priority, Priority::Low);
        assert_eq!(def.rule_type, RuleType::Domain);
        assert!(def.triggers.is_empty());
        assert!(def.block_message.is_none());
    }

    #[test]
    fn test_definition_full() {
        let def: RuleDefinition = serde_json::from_value(serde_json::json!({
            "description": "DB safety",
            "enforcement": "block",
            "priority": "critical",
            "type": "guardrail",
            "triggers": {
                "keywords": ["database"],
                "intentPatterns": ["drop.*table"],
                "filePatterns": ["**/*.sql"],
                "excludePatterns": ["**/*_test.sql"]
            },
            "blockMessage": "Load {skill} first",
            "skipConditions": { "envOverride": "SKIP_DB_GUARD" }
        }))
        .unwrap();

        assert_eq!(def.enforcement, Enforcement::Block);
        assert_eq!(def.priority, Priority::Critical);
        assert_eq!(def.rule_type, RuleType::Guardrail);
        assert_eq!(def.triggers.intent_patterns, vec!["drop.*table"]);
        assert_eq!(
            def.skip_conditions.env_override.as_deref(),
            Some("SKIP_DB_GUARD")
        );
    }

    #[test]
    fn test_mode_alias_and_path_aliases() {
        let def: RuleDefinition = serde_json::from_value(serde_json::json!({
            "mode": "warn",
            "triggers": { "pathPatterns": ["src/**"], "pathExclusions": ["src/gen/**"] }
        }))
        .unwrap();
        assert_eq!(def.enforcement, Enforcement::Warn);
        assert_eq!(def.triggers.file_patterns, vec!["src/**"]);
        assert_eq!(def.triggers.exclude_patterns, vec!["src/gen/**"]);
    }

    #[test]
    fn test_unknown_enforcement_rejected() {
        let result: Result<RuleDefinition, _> =
            serde_json::from_value(serde_json::json!({ "enforcement": "mandatory" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_rule_requires_name() {
        let err = Rule::new("  ", RuleDefinition::default()).unwrap_err();
        assert!(matches!(err, SkillgateError::InvalidRule { .. }));
    }

    #[test]
    fn test_dormant_rule() {
        let rule = Rule::new("idle", RuleDefinition::new("nothing")).unwrap();
        assert!(rule.is_dormant());

        let rule = Rule::new("active", RuleDefinition::new("x").with_keyword("react")).unwrap();
        assert!(!rule.is_dormant());

        // Exclusions alone never trigger anything
        let rule = Rule::new(
            "excl",
            RuleDefinition::new("x").with_exclude_pattern("*.sql"),
        )
        .unwrap();
        assert!(rule.is_dormant());
    }

    #[test]
    fn test_block_message() {
        let rule = Rule::new(
            "db-guard",
            RuleDefinition::new("x").with_block_message("Read {skill} now"),
        )
        .unwrap();
        assert_eq!(rule.block_message(), "Read db-guard now");

        let rule = Rule::new("db-guard", RuleDefinition::new("x")).unwrap();
        assert!(rule.block_message().contains("/skill db-guard"));
    }

    #[test]
    fn test_empty_env_override_ignored() {
        let rule = Rule::new("r", RuleDefinition::new("x").with_env_override("")).unwrap();
        assert_eq!(rule.env_override(), None);
    }
}
