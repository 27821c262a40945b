//! Skill activation rules
//!
//! Rules live in a single JSON document, `skill-rules.json`:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "skills": {
//!     "frontend-dev-guidelines": {
//!       "description": "React and MUI conventions",
//!       "enforcement": "suggest",
//!       "priority": "high",
//!       "triggers": {
//!         "keywords": ["react", "mui"],
//!         "intentPatterns": ["(create|add).*component"],
//!         "filePatterns": ["frontend/src/**/*.tsx"],
//!         "excludePatterns": ["**/*.test.tsx"]
//!       }
//!     },
//!     "database-verification": {
//!       "type": "guardrail",
//!       "enforcement": "block",
//!       "priority": "critical",
//!       "triggers": { "intentPatterns": ["delete.*production"] },
//!       "blockMessage": "Read the {skill} skill before touching production data.",
//!       "skipConditions": { "envOverride": "SKIP_DB_VERIFICATION" }
//!     }
//!   }
//! }
//! ```
//!
//! Defaults: `enforcement` is `suggest`, `priority` is `low`, `type` is
//! `domain`, and missing trigger lists are empty. `mode` is accepted as an
//! alias of `enforcement`, `pathPatterns`/`pathExclusions` as aliases of
//! `filePatterns`/`excludePatterns`.

pub mod cache;
pub mod loader;
pub mod locations;
pub mod set;
pub mod types;

pub use cache::RuleCache;
pub use loader::RuleLoader;
pub use locations::{RULES_FILE_NAME, RuleLocations};
pub use set::{RuleSet, RuleSource, SkippedRule};
pub use types::{
    Enforcement, Priority, Rule, RuleDefinition, RuleType, SkipConditions, TriggerDefinition,
};
