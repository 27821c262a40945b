//! Rule store loader
//!
//! The first existing, parseable location wins outright; locations are never
//! merged. Loading through [`RuleLoader::load`] cannot fail: missing or
//! corrupt files fall through to the next location and finally to an empty
//! rule set.

use crate::error::{SkillgateError, SkillgateResult};
use std::path::Path;
use tracing::{debug, warn};

use super::locations::RuleLocations;
use super::set::{RuleSet, RuleSource};

/// Loads the rule set for one invocation
#[derive(Debug, Clone)]
pub struct RuleLoader {
    locations: RuleLocations,
}

impl RuleLoader {
    /// Create a loader from specific locations
    pub fn with_locations(locations: RuleLocations) -> Self {
        Self { locations }
    }

    /// Create a loader from a starting directory
    pub fn from_directory(dir: impl AsRef<Path>) -> Self {
        Self::with_locations(RuleLocations::discover_from(dir))
    }

    /// Get the candidate locations
    pub fn locations(&self) -> &RuleLocations {
        &self.locations
    }

    /// Load the rule set, falling back to an empty one
    pub fn load(&self) -> RuleSet {
        if let Some(primary) = &self.locations.primary {
            let source = if self.locations.explicit {
                RuleSource::Explicit(primary.clone())
            } else {
                RuleSource::Project(primary.clone())
            };
            if let Some(set) = Self::try_load(primary, source) {
                return set;
            }
        }

        if let Some(fallback) = &self.locations.fallback {
            if let Some(set) = Self::try_load(fallback, RuleSource::Global(fallback.clone())) {
                return set;
            }
        }

        debug!("No usable rule file found, using empty rule set");
        RuleSet::empty()
    }

    fn try_load(path: &Path, source: RuleSource) -> Option<RuleSet> {
        if !path.is_file() {
            debug!("Rule file {:?} does not exist", path);
            return None;
        }

        match Self::load_file(path, source) {
            Ok(set) => {
                debug!(
                    "Loaded {} rules from {:?} ({} skipped)",
                    set.len(),
                    path,
                    set.skipped().len()
                );
                Some(set)
            }
            Err(e) => {
                warn!("Ignoring rule file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Load and parse a single rule file, reporting failures
    pub fn load_file(path: impl AsRef<Path>, source: RuleSource) -> SkillgateResult<RuleSet> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkillgateError::io(format!("Failed to read rule file {:?}: {}", path, e))
        })?;

        RuleSet::from_json_str(&content, source).map_err(|e| {
            SkillgateError::config(format!("Failed to parse rule file {:?}: {}", path, e))
        })
    }
}
