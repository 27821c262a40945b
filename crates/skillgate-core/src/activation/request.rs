//! Activation input

use crate::matcher::normalize_path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// One prompt to evaluate, plus the files recently touched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    /// User's message/prompt
    #[serde(default)]
    pub prompt: String,

    /// Paths of recently touched files
    #[serde(default)]
    pub context_files: Vec<String>,

    /// `envOverride` variables that are set for this invocation
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub active_overrides: BTreeSet<String>,
}

impl ActivationRequest {
    /// Create a new request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Add a context file
    pub fn with_context_file(mut self, path: impl Into<String>) -> Self {
        self.context_files.push(path.into());
        self
    }

    /// Add several context files
    pub fn with_context_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Mark an `envOverride` variable as set
    pub fn with_active_override(mut self, var: impl Into<String>) -> Self {
        self.active_overrides.insert(var.into());
        self
    }

    /// Whether there is anything to evaluate
    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }

    pub fn is_override_active(&self, var: &str) -> bool {
        self.active_overrides.contains(var)
    }

    /// Rewrite absolute context paths under `root` as root-relative paths
    ///
    /// Globs are anchored, so `src/**` only matches once the project prefix
    /// is gone. Paths outside the root are left untouched.
    pub fn relative_to(mut self, root: impl AsRef<Path>) -> Self {
        let root = normalize_path(&root.as_ref().to_string_lossy());
        let root = root.trim_end_matches('/');
        if root.is_empty() {
            return self;
        }
        let prefix = format!("{}/", root);

        for file in &mut self.context_files {
            let normalized = normalize_path(file);
            if let Some(rest) = normalized.strip_prefix(&prefix) {
                *file = rest.to_string();
            }
        }
        self
    }
}
