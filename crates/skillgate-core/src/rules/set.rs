//! Parsed rule collection

use crate::error::{SkillgateError, SkillgateResult};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::types::{Rule, RuleDefinition};

/// Where a rule set came from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum RuleSource {
    /// Project-scoped rule file
    Project(PathBuf),
    /// User/global rule file
    Global(PathBuf),
    /// File named explicitly by the caller
    Explicit(PathBuf),
    /// Nothing usable was found
    #[default]
    Empty,
}

impl RuleSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Project(p) | Self::Global(p) | Self::Explicit(p) => Some(p),
            Self::Empty => None,
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(p) => write!(f, "project ({})", p.display()),
            Self::Global(p) => write!(f, "global ({})", p.display()),
            Self::Explicit(p) => write!(f, "explicit ({})", p.display()),
            Self::Empty => f.write_str("none"),
        }
    }
}

/// A rule entry that was rejected while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub name: String,
    pub reason: String,
}

/// The rules of one rule file, in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    version: String,
    rules: Vec<Rule>,
    source: RuleSource,
    skipped: Vec<SkippedRule>,
}

impl RuleSet {
    /// An empty rule set; resolves to an empty decision for any input
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a rule set from already-validated rules
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Parse a rule document
    ///
    /// The document must be a JSON object with a `skills` object. Individual
    /// entries that fail validation are recorded in [`RuleSet::skipped`]
    /// instead of failing the whole document.
    pub fn from_json_str(content: &str, source: RuleSource) -> SkillgateResult<Self> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_value(document, source)
    }

    /// Parse a rule document that has already been decoded
    pub fn from_value(document: Value, source: RuleSource) -> SkillgateResult<Self> {
        let Value::Object(mut root) = document else {
            return Err(SkillgateError::config("rule document is not a JSON object"));
        };

        let version = match root.remove("version") {
            Some(Value::String(v)) => v,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let skills = match root.remove("skills") {
            Some(Value::Object(skills)) => skills,
            Some(_) => return Err(SkillgateError::config("'skills' is not an object")),
            None => return Err(SkillgateError::config("rule document has no 'skills'")),
        };

        let mut rules = Vec::with_capacity(skills.len());
        let mut skipped = Vec::new();

        for (name, entry) in skills {
            let parsed = serde_json::from_value::<RuleDefinition>(entry)
                .map_err(|e| SkillgateError::invalid_rule(&name, e.to_string()))
                .and_then(|definition| Rule::new(name.clone(), definition));

            match parsed {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    warn!("Skipping rule {:?}: {}", name, e);
                    let reason = match e {
                        SkillgateError::InvalidRule { message, .. } => message,
                        other => other.to_string(),
                    };
                    skipped.push(SkippedRule { name, reason });
                }
            }
        }

        Ok(Self {
            version,
            rules,
            source,
            skipped,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn source(&self) -> &RuleSource {
        &self.source
    }

    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// Find a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Environment variables referenced by `skipConditions.envOverride`
    pub fn env_override_vars(&self) -> Vec<&str> {
        let mut vars: Vec<&str> = self.rules.iter().filter_map(|r| r.env_override()).collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }
}
