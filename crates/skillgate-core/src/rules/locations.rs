//! Rule file location discovery
//!
//! Two candidate locations are checked, in order:
//! - Project level: `<project>/.claude/skills/skill-rules.json`
//! - User level: `~/.claude/skills/skill-rules.json`

use std::path::{Path, PathBuf};

/// Directory under the project root and the home directory holding skills
pub const SKILLS_DIR: [&str; 2] = [".claude", "skills"];

/// Rule file name
pub const RULES_FILE_NAME: &str = "skill-rules.json";

/// Candidate rule file locations, tried in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RuleLocations {
    /// Project-specific (or explicitly requested) rule file
    pub primary: Option<PathBuf>,

    /// User-level fallback rule file
    pub fallback: Option<PathBuf>,

    /// Whether `primary` was named explicitly rather than discovered
    pub explicit: bool,

    /// Project root the primary location was derived from
    pub project_root: Option<PathBuf>,
}

impl RuleLocations {
    /// Use exactly these two locations
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: Some(primary.into()),
            fallback: Some(fallback.into()),
            explicit: false,
            project_root: None,
        }
    }

    /// Discover locations from a specific directory
    pub fn discover_from(start_dir: impl AsRef<Path>) -> Self {
        let root = Self::find_project_root(&start_dir)
            .unwrap_or_else(|| start_dir.as_ref().to_path_buf());

        Self {
            primary: Some(Self::rules_path_in(&root)),
            fallback: Self::get_user_rules_path(),
            explicit: false,
            project_root: Some(root),
        }
    }

    /// Replace the primary location with an explicit file
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.primary = Some(path.into());
        self.explicit = true;
        self
    }

    /// Drop the user-level fallback
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// Rule file path below a project root
    pub fn rules_path_in(root: impl AsRef<Path>) -> PathBuf {
        let mut path = root.as_ref().to_path_buf();
        path.extend(SKILLS_DIR);
        path.join(RULES_FILE_NAME)
    }

    /// Get the user rule file path
    pub fn get_user_rules_path() -> Option<PathBuf> {
        dirs::home_dir().map(Self::rules_path_in)
    }

    /// Find the project root by looking for .claude or .git
    fn find_project_root(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let start = start_dir.as_ref().to_path_buf();
        let mut current = if start.is_absolute() {
            start
        } else {
            std::env::current_dir().ok()?.join(start)
        };

        loop {
            if current.join(".claude").is_dir() {
                return Some(current);
            }

            if current.join(".git").exists() {
                return Some(current);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}
