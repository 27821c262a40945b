//! Activation decision engine
//!
//! ```rust
//! use skillgate_core::activation::{ActivationRequest, HookResponse, resolve};
//! use skillgate_core::rules::{Rule, RuleDefinition, RuleSet};
//!
//! let rules = RuleSet::from_rules(vec![
//!     Rule::new(
//!         "frontend-dev-guidelines",
//!         RuleDefinition::new("React conventions").with_keyword("react"),
//!     )
//!     .unwrap(),
//! ]);
//!
//! let request = ActivationRequest::new("Create a React component with MUI");
//! let decision = resolve(&rules, &request);
//!
//! assert_eq!(decision.suggested_names(), vec!["frontend-dev-guidelines"]);
//! assert!(matches!(
//!     HookResponse::from_decision(&decision),
//!     HookResponse::Advisory { .. }
//! ));
//! ```

pub mod output;
pub mod request;
pub mod resolver;
pub mod scorer;

pub use output::{AdvisoryEntry, BlockingEntry, HookResponse};
pub use request::ActivationRequest;
pub use resolver::{Decision, MAX_DISPLAYED_SUGGESTIONS, Resolver, resolve};
pub use scorer::{ExclusionPolicy, MatchResult, Scorer};
