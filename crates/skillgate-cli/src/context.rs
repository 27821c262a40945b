//! Shared setup for every command: locating and loading rules

use skillgate_core::rules::{RuleLoader, RuleLocations, RuleSet};
use skillgate_core::ActivationRequest;
use std::path::{Path, PathBuf};

/// Where a command should look for rules
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_dir: PathBuf,
    pub loader: RuleLoader,
}

impl CommandContext {
    /// Build from CLI flags, falling back to the payload `cwd` and then the process directory
    pub fn new(
        rules: Option<&Path>,
        project_dir: Option<&Path>,
        payload_cwd: Option<&Path>,
    ) -> Self {
        let project_dir = project_dir
            .or(payload_cwd)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut locations = RuleLocations::discover_from(&project_dir);
        if let Some(rules) = rules {
            locations = locations.with_explicit(rules);
        }

        Self {
            project_dir,
            loader: RuleLoader::with_locations(locations),
        }
    }

    /// Root used to relativize context files
    pub fn project_root(&self) -> &Path {
        self.loader
            .locations()
            .project_root
            .as_deref()
            .unwrap_or(&self.project_dir)
    }

    pub fn load_rules(&self) -> RuleSet {
        self.loader.load()
    }

    /// Build the request, sampling `envOverride` variables from the process environment
    pub fn request(
        &self,
        rules: &RuleSet,
        prompt: impl Into<String>,
        files: Vec<String>,
    ) -> ActivationRequest {
        let mut request = ActivationRequest::new(prompt)
            .with_context_files(files)
            .relative_to(self.project_root());

        for var in rules.env_override_vars() {
            if std::env::var(var).is_ok_and(|v| !v.is_empty()) {
                tracing::debug!("{} is set, rules using it are skipped", var);
                request = request.with_active_override(var);
            }
        }
        request
    }
}
