//! Decision formatting
//!
//! Turns a [`Decision`] into one of three observable outcomes: a blocking
//! directive, an advisory list, or nothing at all.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;

use super::resolver::Decision;
use crate::rules::Priority;

/// One advisory line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryEntry {
    pub name: String,
    pub priority: Priority,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// One skill the caller must load before proceeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingEntry {
    pub name: String,
    pub priority: Priority,
    pub message: String,
}

/// What the hook boundary should do with a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum HookResponse {
    /// Halt the caller until every listed skill is acknowledged
    Block { skills: Vec<BlockingEntry> },
    /// Non-interrupting suggestions, already capped for display
    Advisory { entries: Vec<AdvisoryEntry> },
    /// Nothing matched
    Silent,
}

impl HookResponse {
    pub fn from_decision(decision: &Decision<'_>) -> Self {
        if decision.is_blocking() {
            let skills = decision
                .blocking
                .iter()
                .map(|m| BlockingEntry {
                    name: m.name().to_string(),
                    priority: m.rule.priority(),
                    message: m.rule.block_message(),
                })
                .collect();
            return Self::Block { skills };
        }

        if !decision.suggested.is_empty() {
            let entries = decision
                .displayed_suggestions()
                .iter()
                .map(|m| AdvisoryEntry {
                    name: m.name().to_string(),
                    priority: m.rule.priority(),
                    score: m.score,
                    reasons: m.reasons.clone(),
                })
                .collect();
            return Self::Advisory { entries };
        }

        Self::Silent
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }

    /// Directive text naming every blocking skill
    pub fn directive(&self) -> Option<String> {
        let Self::Block { skills } = self else {
            return None;
        };

        let mut out = String::from("SKILL ACTIVATION REQUIRED\n\n");
        out.push_str("The following skills must be used before proceeding:\n");
        for skill in skills {
            let _ = writeln!(
                out,
                "  - {} [{}]: {}",
                skill.name, skill.priority, skill.message
            );
        }
        out.push_str("\nInvoke each skill with /skill <name>, then resubmit the request.");
        Some(out)
    }

    /// Hook protocol payload for stdout; only blocking outcomes produce one
    pub fn hook_json(&self) -> Option<serde_json::Value> {
        self.directive()
            .map(|reason| json!({ "decision": "block", "reason": reason }))
    }

    /// Plain-text banner of the advisory entries, grouped by priority
    pub fn advisory_banner(&self) -> Option<String> {
        let Self::Advisory { entries } = self else {
            return None;
        };

        let mut out = String::from("SKILL ACTIVATION CHECK\n");
        for priority in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            let group: Vec<&AdvisoryEntry> =
                entries.iter().filter(|e| e.priority == priority).collect();
            if group.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{} priority:", priority);
            for entry in group {
                let _ = writeln!(out, "  - {} ({})", entry.name, entry.reasons.join(", "));
            }
        }
        out.push_str("\nLoad a skill with /skill <name> before responding.");
        Some(out)
    }

    /// One-line summary for log output
    pub fn summary(&self) -> String {
        match self {
            Self::Block { skills } => format!(
                "blocking: {}",
                skills
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Advisory { entries } => format!(
                "suggested: {}",
                entries
                    .iter()
                    .map(|e| format!("{}: {}", e.name, e.reasons.join(", ")))
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
            Self::Silent => "no matching skills".to_string(),
        }
    }
}
