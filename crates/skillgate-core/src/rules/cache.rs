//! Parsed rule set cache
//!
//! Long-running callers can reuse a parsed rule set between invocations.
//! An entry is reused only while every candidate file has the same
//! modification time and length as when it was loaded. Files modified within
//! the last [`RACY_WINDOW`] are never trusted, since a same-length rewrite
//! inside one timestamp tick would otherwise go unnoticed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

use super::loader::RuleLoader;
use super::locations::RuleLocations;
use super::set::RuleSet;

/// Modifications younger than this always force a reload
pub const RACY_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl FileStamp {
    /// `Ok(None)` for an absent file, `Err(())` when the stamp cannot be trusted
    fn read(path: &Path, now: SystemTime) -> Result<Option<Self>, ()> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };
        let modified = metadata.modified().map_err(|_| ())?;
        match now.duration_since(modified) {
            Ok(age) if age >= RACY_WINDOW => Ok(Some(Self {
                modified,
                len: metadata.len(),
            })),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    stamps: Vec<Option<FileStamp>>,
    rules: Arc<RuleSet>,
}

/// Thread-safe cache of parsed rule sets keyed by their candidate locations
#[derive(Debug, Default)]
pub struct RuleCache {
    entries: Mutex<HashMap<RuleLocations, CacheEntry>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached rule set for the loader's locations, reloading on any change
    pub fn load(&self, loader: &RuleLoader) -> Arc<RuleSet> {
        let locations = loader.locations();
        let stamps = Self::stamps(locations);

        if let Some(current) = &stamps {
            let entries = self.entries.lock();
            if let Some(entry) = entries.get(locations) {
                if &entry.stamps == current {
                    debug!("Rule cache hit for {:?}", locations.primary);
                    return Arc::clone(&entry.rules);
                }
            }
        }

        let rules = Arc::new(loader.load());
        let mut entries = self.entries.lock();
        match stamps {
            Some(stamps) => {
                entries.insert(
                    locations.clone(),
                    CacheEntry {
                        stamps,
                        rules: Arc::clone(&rules),
                    },
                );
            }
            None => {
                entries.remove(locations);
            }
        }
        rules
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Stamps for every candidate, or `None` when any of them is untrustworthy
    fn stamps(locations: &RuleLocations) -> Option<Vec<Option<FileStamp>>> {
        let now = SystemTime::now();
        [&locations.primary, &locations.fallback]
            .into_iter()
            .map(|path| match path {
                Some(path) => FileStamp::read(path, now).ok(),
                None => Some(None),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_aged(path: &Path, content: &str, age_secs: u64) {
        fs::write(path, content).unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
    }

    fn rules_with(skill: &str) -> String {
        format!(
            r#"{{ "skills": {{ "{}": {{ "triggers": {{ "keywords": ["x"] }} }} }} }}"#,
            skill
        )
    }

    #[test]
    fn test_unchanged_file_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("rules.json");
        write_aged(&primary, &rules_with("one"), 60);

        let loader = RuleLoader::with_locations(
            RuleLocations::new(&primary, temp_dir.path().join("none.json")),
        );
        let cache = RuleCache::new();

        let first = cache.load(&loader);
        let second = cache.load(&loader);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("rules.json");
        write_aged(&primary, &rules_with("one"), 60);

        let loader = RuleLoader::with_locations(
            RuleLocations::new(&primary, temp_dir.path().join("none.json")),
        );
        let cache = RuleCache::new();
        assert!(cache.load(&loader).get("one").is_some());

        write_aged(&primary, &rules_with("two"), 30);
        let reloaded = cache.load(&loader);
        assert!(reloaded.get("one").is_none());
        assert!(reloaded.get("two").is_some());
    }

    #[test]
    fn test_fresh_file_is_never_trusted() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("rules.json");
        fs::write(&primary, rules_with("one")).unwrap();

        let loader = RuleLoader::with_locations(
            RuleLocations::new(&primary, temp_dir.path().join("none.json")),
        );
        let cache = RuleCache::new();

        let first = cache.load(&loader);
        let second = cache.load(&loader);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_deleted_file_is_noticed() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("rules.json");
        write_aged(&primary, &rules_with("one"), 60);

        let loader = RuleLoader::with_locations(
            RuleLocations::new(&primary, temp_dir.path().join("none.json")),
        );
        let cache = RuleCache::new();
        assert_eq!(cache.load(&loader).len(), 1);

        fs::remove_file(&primary).unwrap();
        assert!(cache.load(&loader).is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
