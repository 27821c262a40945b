//! Skillgate core library
//!
//! This crate decides which skills to surface for an incoming prompt:
//! loading the rule file, matching keyword, intent and file triggers,
//! scoring each rule and resolving the result into a blocking directive,
//! a short advisory list, or nothing.
//!
//! Every step after the single rule-file read is pure computation; the same
//! rule set and request always produce the same [`Decision`].

pub mod activation;
pub mod error;
pub mod matcher;
pub mod rules;

// Re-export commonly used types
pub use activation::{
    ActivationRequest, Decision, ExclusionPolicy, HookResponse, MatchResult, Resolver, Scorer,
    resolve,
};
pub use error::{SkillgateError, SkillgateResult};
pub use rules::{
    Enforcement, Priority, Rule, RuleCache, RuleDefinition, RuleLoader, RuleLocations, RuleSet,
    RuleSource,
};
