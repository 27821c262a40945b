//! File glob matching
//!
//! Globs are translated to anchored regexes:
//!
//! | Glob | Meaning |
//! |------|---------|
//! | `*` | any run of characters except `/` |
//! | `**` | any sequence, `/` included |
//! | `**/` | zero or more leading directories |
//! | `?` | exactly one character, `/` included |
//!
//! Every other character is literal. Paths are normalized to forward slashes
//! before matching, so Windows-style context paths behave the same.

use regex::Regex;
use tracing::debug;

/// Translate a glob into an anchored regex source string
///
/// # Examples
///
/// ```
/// use skillgate_core::matcher::glob_to_regex;
///
/// assert_eq!(glob_to_regex("*.sql"), r"^[^/]*\.sql$");
/// assert_eq!(glob_to_regex("src/**/*.ts"), r"^src/(?:.*/)?[^/]*\.ts$");
/// ```
pub fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                if chars.get(i) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 1;
                } else {
                    out.push_str(".*");
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push('.'),
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
        i += 1;
    }

    out.push('$');
    out
}

/// Normalize a context path for matching
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

/// A compiled list of glob patterns
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    patterns: Vec<(String, Regex)>,
}

impl GlobSet {
    /// Compile a list of globs, ignoring empty entries
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Self {
        let patterns = globs
            .iter()
            .map(|g| g.as_ref().trim())
            .filter(|g| !g.is_empty())
            .filter_map(|g| match Regex::new(&glob_to_regex(g)) {
                Ok(re) => Some((g.to_string(), re)),
                Err(e) => {
                    debug!("Skipping glob {:?}: {}", g, e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Check whether the path matches any glob in the set
    pub fn is_match(&self, path: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path = normalize_path(path);
        self.patterns.iter().any(|(_, re)| re.is_match(&path))
    }

    /// The glob sources, in declaration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(g, _)| g.as_str())
    }

    /// Number of usable globs
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no usable globs
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Check whether `path` matches any of `patterns` (anchored to the full path)
///
/// # Examples
///
/// ```
/// use skillgate_core::matcher::glob_match;
///
/// assert!(glob_match("migrate.sql", &["*.sql"]));
/// assert!(!glob_match("db/migrate.sql", &["*.sql"]));
/// assert!(glob_match("db/migrate.sql", &["**/*.sql"]));
/// ```
pub fn glob_match<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    GlobSet::new(patterns).is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_star_stays_in_segment() {
        assert!(glob_match("migrate.sql", &["*.sql"]));
        assert!(!glob_match("db/migrate.sql", &["*.sql"]));
        assert!(glob_match("src/app.tsx", &["src/*.tsx"]));
        assert!(!glob_match("src/components/app.tsx", &["src/*.tsx"]));
    }

    #[test]
    fn test_double_star_crosses_separators() {
        assert!(glob_match("src/components/ui/Button.tsx", &["src/**"]));
        assert!(glob_match("src/a/b/c.ts", &["src/**/*.ts"]));
        assert!(glob_match("a/b/schema.prisma", &["**schema.prisma"]));
    }

    #[test]
    fn test_double_star_slash_matches_zero_directories() {
        assert!(glob_match("src/index.ts", &["src/**/*.ts"]));
        assert!(glob_match("index.ts", &["**/*.ts"]));
    }

    #[test]
    fn test_question_mark_single_char() {
        assert!(glob_match("v1.sql", &["v?.sql"]));
        assert!(!glob_match("v10.sql", &["v?.sql"]));
        assert!(glob_match("a/b", &["a?b"]));
        assert!(!glob_match("a//b", &["a?b"]));
    }

    #[test]
    fn test_dot_is_literal() {
        assert!(!glob_match("migratexsql", &["*.sql"]));
        assert!(glob_match("a+b(1).txt", &["a+b(1).txt"]));
    }

    #[test]
    fn test_anchored_not_substring() {
        assert!(!glob_match("migrate.sql.bak", &["*.sql"]));
        assert!(!glob_match("backend/src/x.ts", &["src/**/*.ts"]));
    }

    #[test]
    fn test_windows_and_dot_slash_paths_normalized() {
        assert!(glob_match(r"src\api\routes.ts", &["src/**/*.ts"]));
        assert!(glob_match("./migrate.sql", &["*.sql"]));
    }

    #[test]
    fn test_empty_patterns_never_match() {
        assert!(!glob_match("anything", &[] as &[&str]));
        assert!(!glob_match("anything", &[""]));
        assert!(GlobSet::new(&["  "]).is_empty());
    }

    #[test]
    fn test_translation() {
        assert_eq!(glob_to_regex("*.sql"), r"^[^/]*\.sql$");
        assert_eq!(glob_to_regex("a?"), "^a.$");
        assert_eq!(glob_to_regex("**"), "^.*$");
        assert_eq!(glob_to_regex("src/**/*.ts"), r"^src/(?:.*/)?[^/]*\.ts$");
    }

    #[test]
    fn test_globset_patterns_listed() {
        let set = GlobSet::new(&["*.sql", "", "db/**"]);
        assert_eq!(set.patterns().collect::<Vec<_>>(), vec!["*.sql", "db/**"]);
        assert_eq!(set.len(), 2);
    }
}
