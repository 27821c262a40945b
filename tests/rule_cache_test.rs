//! Rule cache integration test
//!
//! Exercises the public facade the way a long-running host would: one cache
//! shared across evaluations, with the rule file edited in between.

use skillgate::{ActivationRequest, RuleCache, RuleLoader, RuleLocations, resolve};
use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn write_rules(path: &std::path::Path, keyword: &str, age: Duration) {
    let content = serde_json::json!({
        "version": "1.0",
        "skills": { "guide": { "triggers": { "keywords": [keyword] } } }
    });
    fs::write(path, content.to_string()).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[test]
fn test_cache_reuses_and_refreshes_rules() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skill-rules.json");
    write_rules(&path, "react", Duration::from_secs(120));

    let loader = RuleLoader::with_locations(RuleLocations::new(&path, dir.path().join("none")));
    let cache = RuleCache::new();

    let first = cache.load(&loader);
    let second = cache.load(&loader);
    assert!(Arc::ptr_eq(&first, &second));

    let decision = resolve(&first, &ActivationRequest::new("a react page"));
    assert_eq!(decision.suggested_names(), vec!["guide"]);

    write_rules(&path, "vue", Duration::from_secs(60));
    let refreshed = cache.load(&loader);
    assert!(!Arc::ptr_eq(&first, &refreshed));

    assert!(resolve(&refreshed, &ActivationRequest::new("a react page")).is_empty());
    assert_eq!(
        resolve(&refreshed, &ActivationRequest::new("a vue page")).suggested_names(),
        vec!["guide"]
    );
}

#[test]
fn test_missing_rules_resolve_to_nothing() {
    let dir = TempDir::new().unwrap();
    let rules =
        RuleLoader::with_locations(RuleLocations::discover_from(dir.path()).without_fallback())
            .load();

    let request = ActivationRequest::new("anything").with_context_file("src/main.rs");
    let decision = resolve(&rules, &request);
    assert!(decision.is_empty());
}
