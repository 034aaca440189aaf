//! Exclusion rules for the directory scanner.
//!
//! A pattern is either a literal (`node_modules`, `docs/generated`) or a glob
//! (`*.egg-info`). Matching is per path segment and anchored, so
//! `node_modules` excludes `src/node_modules/x.js` but not `mynode_modules_thing`.

use crate::config::IndexingConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Built-in exclusions: version control, dependency, build and cache directories.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    ".bzr",
    // JavaScript / TypeScript
    "node_modules",
    "bower_components",
    "jspm_packages",
    ".next",
    ".nuxt",
    ".parcel-cache",
    "dist",
    "coverage",
    // JVM / Rust / generic build output
    "target",
    "build",
    "out",
    ".gradle",
    // Python
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    ".pytest_cache",
    ".mypy_cache",
    "*.egg-info",
    "*.pyc",
    // Apple
    "Pods",
    "DerivedData",
    // Editors, OS and caches
    ".idea",
    ".vscode",
    ".cache",
    ".DS_Store",
    "*.class",
    "*.swp",
    // Our own index directory
    ".filegraph",
];

#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    literals: Vec<String>,
    globs: GlobSet,
}

impl ExclusionMatcher {
    /// Build a matcher from an explicit pattern list.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut literals = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let pattern = normalize(pattern.as_ref());
            if pattern.is_empty() {
                continue;
            }
            if !is_glob(&pattern) {
                literals.push(pattern);
                continue;
            }
            match Glob::new(&pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => {
                    tracing::warn!(target: "scanner", "ignoring invalid pattern '{pattern}': {err}");
                }
            }
        }

        let globs = builder.build().unwrap_or_else(|err| {
            tracing::warn!(target: "scanner", "ignoring glob exclusions: {err}");
            GlobSet::empty()
        });

        Self { literals, globs }
    }

    /// Matcher over [`DEFAULT_EXCLUSIONS`].
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_EXCLUSIONS)
    }

    /// Built-in table plus `exclude_patterns` from settings.
    pub fn from_config(config: &IndexingConfig) -> Self {
        Self::new(
            DEFAULT_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .chain(config.exclude_patterns.iter().cloned()),
        )
    }

    /// Whether `path` (a bare name or a relative path) is excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = normalize(path);
        if path.is_empty() {
            return false;
        }

        for segment in path.split('/') {
            if self.literals.iter().any(|lit| lit == segment) {
                return true;
            }
            if self.globs.is_match(segment) {
                return true;
            }
        }

        // Path-based form, needed for literals spanning several segments
        self.literals.iter().any(|lit| {
            path == *lit
                || path.starts_with(&format!("{lit}/"))
                || path.contains(&format!("/{lit}/"))
                || path.ends_with(&format!("/{lit}"))
        })
    }
}

impl Default for ExclusionMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `\` to `/`, strip `./` prefix and surrounding slashes.
fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.trim_matches('/').to_string()
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
