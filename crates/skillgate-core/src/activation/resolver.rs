//! Activation resolution
//!
//! Scores every rule, drops non-matches and partitions the rest into a
//! blocking bucket (never truncated) and a suggested bucket (score
//! descending, ties in declaration order).

use serde::Serialize;
use tracing::debug;

use super::request::ActivationRequest;
use super::scorer::{ExclusionPolicy, MatchResult, Scorer};
use crate::rules::RuleSet;

/// How many suggestions are shown; the full list stays on the decision
pub const MAX_DISPLAYED_SUGGESTIONS: usize = 3;

/// Outcome of resolving one request against one rule set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decision<'a> {
    /// Every matching blocking rule, in declaration order
    pub blocking: Vec<MatchResult<'a>>,

    /// Every matching advisory rule, score descending
    pub suggested: Vec<MatchResult<'a>>,
}

impl<'a> Decision<'a> {
    /// The "no decision" outcome
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty() && self.suggested.is_empty()
    }

    pub fn is_blocking(&self) -> bool {
        !self.blocking.is_empty()
    }

    /// Suggestions after the presentation cap
    pub fn displayed_suggestions(&self) -> &[MatchResult<'a>] {
        let end = self.suggested.len().min(MAX_DISPLAYED_SUGGESTIONS);
        &self.suggested[..end]
    }

    pub fn blocking_names(&self) -> Vec<&'a str> {
        self.blocking.iter().map(|m| m.name()).collect()
    }

    pub fn suggested_names(&self) -> Vec<&'a str> {
        self.suggested.iter().map(|m| m.name()).collect()
    }
}

/// Runs the scorer over a whole rule set
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    scorer: Scorer,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scorer(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn with_exclusion_policy(self, policy: ExclusionPolicy) -> Self {
        Self::with_scorer(self.scorer.with_exclusion_policy(policy))
    }

    /// Resolve a request into a decision
    ///
    /// An empty prompt short-circuits to an empty decision before any
    /// matcher runs.
    pub fn resolve<'a>(&self, rules: &'a RuleSet, request: &ActivationRequest) -> Decision<'a> {
        if !request.has_prompt() {
            debug!("Empty prompt, skipping activation");
            return Decision::empty();
        }

        let mut decision = Decision::empty();

        for rule in rules.rules() {
            let result = self.scorer.score(rule, request);
            debug!(
                "Rule {:?} scored {} ({:?})",
                rule.name(),
                result.score,
                result.reasons
            );
            if !result.is_match() {
                continue;
            }
            if rule.enforcement().is_blocking() {
                decision.blocking.push(result);
            } else {
                decision.suggested.push(result);
            }
        }

        // Vec::sort_by is stable, so ties keep declaration order
        decision.suggested.sort_by(|a, b| b.score.cmp(&a.score));
        decision
    }
}

/// Resolve with the default scoring policy
pub fn resolve<'a>(rules: &'a RuleSet, request: &ActivationRequest) -> Decision<'a> {
    Resolver::new().resolve(rules, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Enforcement, Rule, RuleDefinition};

    fn suggest(name: &str, def: RuleDefinition) -> Rule {
        Rule::new(name, def).unwrap()
    }

    fn block(name: &str, def: RuleDefinition) -> Rule {
        Rule::new(name, def.with_enforcement(Enforcement::Block)).unwrap()
    }

    #[test]
    fn test_partition_blocking_and_suggested() {
        let rules = RuleSet::from_rules(vec![
            suggest("frontend", RuleDefinition::new("x").with_keyword("react")),
            block("db-guard", RuleDefinition::new("x").with_intent("delete.*production")),
            Rule::new(
                "warn-rule",
                RuleDefinition::new("x")
                    .with_keyword("database")
                    .with_enforcement(Enforcement::Warn),
            )
            .unwrap(),
        ]);

        let request = ActivationRequest::new("delete the production database from react");
        let decision = resolve(&rules, &request);

        assert_eq!(decision.blocking_names(), vec!["db-guard"]);
        assert_eq!(decision.suggested_names(), vec!["frontend", "warn-rule"]);
        assert!(decision.is_blocking());
    }

    #[test]
    fn test_suggestions_sorted_by_score_with_stable_ties() {
        let rules = RuleSet::from_rules(vec![
            suggest("kw-a", RuleDefinition::new("x").with_keyword("api")),
            suggest("intent", RuleDefinition::new("x").with_intent("build.*api")),
            suggest("kw-b", RuleDefinition::new("x").with_keyword("build")),
            suggest(
                "both",
                RuleDefinition::new("x").with_keyword("api").with_intent("api"),
            ),
        ]);

        let decision = resolve(&rules, &ActivationRequest::new("build an api"));
        let scored: Vec<(&str, u32)> = decision
            .suggested
            .iter()
            .map(|m| (m.name(), m.score))
            .collect();
        assert_eq!(
            scored,
            vec![("both", 5), ("intent", 3), ("kw-a", 2), ("kw-b", 2)]
        );
    }

    #[test]
    fn test_display_cap_keeps_full_list() {
        let rules = RuleSet::from_rules(
            (0..5)
                .map(|i| suggest(&format!("skill-{}", i), RuleDefinition::new("x").with_keyword("go")))
                .collect(),
        );

        let decision = resolve(&rules, &ActivationRequest::new("go"));
        assert_eq!(decision.suggested.len(), 5);
        assert_eq!(decision.displayed_suggestions().len(), MAX_DISPLAYED_SUGGESTIONS);
        assert_eq!(decision.displayed_suggestions()[0].name(), "skill-0");
    }

    #[test]
    fn test_blocking_never_truncated() {
        let rules = RuleSet::from_rules(
            (0..6)
                .map(|i| block(&format!("guard-{}", i), RuleDefinition::new("x").with_keyword("prod")))
                .collect(),
        );

        let decision = resolve(&rules, &ActivationRequest::new("touch prod"));
        assert_eq!(decision.blocking.len(), 6);
        assert!(decision.suggested.is_empty());
    }

    #[test]
    fn test_empty_prompt_short_circuits() {
        let rules = RuleSet::from_rules(vec![suggest(
            "everything",
            RuleDefinition::new("x").with_intent(".*").with_file_pattern("**"),
        )]);

        let request = ActivationRequest::new("   ").with_context_file("a.ts");
        assert!(resolve(&rules, &request).is_empty());
    }

    #[test]
    fn test_empty_rule_set() {
        let empty = RuleSet::empty();
        let decision = resolve(&empty, &ActivationRequest::new("react"));
        assert!(decision.is_empty());
        assert!(decision.displayed_suggestions().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let rules = RuleSet::from_rules(vec![
            suggest("a", RuleDefinition::new("x").with_keyword("react")),
            block("b", RuleDefinition::new("x").with_keyword("prod")),
        ]);
        let request = ActivationRequest::new("react on prod");
        let resolver = Resolver::new();

        assert_eq!(
            resolver.resolve(&rules, &request),
            resolver.resolve(&rules, &request)
        );
    }

    #[test]
    fn test_exclusion_policy_flows_through() {
        let rules = RuleSet::from_rules(vec![suggest(
            "sql",
            RuleDefinition::new("x")
                .with_keyword("migration")
                .with_file_pattern("*.sql")
                .with_exclude_pattern("*_test.sql"),
        )]);
        let request = ActivationRequest::new("a migration").with_context_file("m_test.sql");

        assert!(Resolver::new().resolve(&rules, &request).is_empty());

        let decision = Resolver::new()
            .with_exclusion_policy(ExclusionPolicy::DropFileContribution)
            .resolve(&rules, &request);
        assert_eq!(decision.suggested_names(), vec!["sql"]);
    }

    #[test]
    fn test_decision_serialization() {
        let rules = RuleSet::from_rules(vec![block(
            "db-guard",
            RuleDefinition::new("x").with_keyword("prod"),
        )]);
        let decision = resolve(&rules, &ActivationRequest::new("prod"));
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["blocking"][0]["name"], "db-guard");
        assert_eq!(json["suggested"].as_array().unwrap().len(), 0);
    }
}
