//! # Path Filter
//!
//! File: cli/src/common/tree/filter.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Repository explorer pages drop dependency directories, build output and
//! configuration noise before building a tree. The denylist is fixed:
//!
//! - path contains `node_modules`
//! - path starts with `.next`
//! - path ends with `.json`, `README.md`, `.gitignore` or `.env`
//! - path contains `config`
//!
//! Users may append extra substrings through `[filter] extra_excludes`; those
//! never replace the fixed rules.
//!
use super::entry::PathEntry;
use tracing::debug;

/// Substrings that exclude a path wherever they appear.
const EXCLUDED_SUBSTRINGS: [&str; 2] = ["node_modules", "config"];
/// Prefixes that exclude a path.
const EXCLUDED_PREFIXES: [&str; 1] = [".next"];
/// Suffixes that exclude a path.
const EXCLUDED_SUFFIXES: [&str; 4] = [".json", "README.md", ".gitignore", ".env"];

/// Denylist applied to entries before tree construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    extra_substrings: Vec<String>,
}

impl PathFilter {
    /// Adds configured substrings on top of the fixed denylist. Empty strings are ignored.
    pub fn with_extra_excludes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_substrings.extend(
            extra
                .into_iter()
                .map(Into::into)
                .filter(|pattern: &String| !pattern.is_empty()),
        );
        self
    }

    /// Returns `true` when the path must not appear in the tree.
    pub fn is_excluded(&self, path: &str) -> bool {
        EXCLUDED_SUBSTRINGS.iter().any(|s| path.contains(s))
            || EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p))
            || EXCLUDED_SUFFIXES.iter().any(|s| path.ends_with(s))
            || self.extra_substrings.iter().any(|s| path.contains(s.as_str()))
    }

    /// Keeps the entries that survive the denylist, preserving input order.
    pub fn apply(&self, entries: Vec<PathEntry>) -> Vec<PathEntry> {
        let before = entries.len();
        let kept: Vec<PathEntry> = entries
            .into_iter()
            .filter(|entry| !self.is_excluded(&entry.path))
            .collect();
        debug!(
            "Path filter kept {} of {} entries ({} excluded).",
            kept.len(),
            before,
            before - kept.len()
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_denylist() {
        let filter = PathFilter::default();
        for excluded in [
            "node_modules/foo.js",
            "packages/a/node_modules/b/index.js",
            ".next/server/app.js",
            "package.json",
            "src/data/fixtures.json",
            "README.md",
            "docs/README.md",
            ".gitignore",
            ".env",
            "next.config.mjs",
            "src/config/index.ts",
            "tailwind.config.ts",
        ] {
            assert!(filter.is_excluded(excluded), "{excluded} should be excluded");
        }
        for kept in [
            "src/app/page.tsx",
            "src/index.js",
            ".env.local",
            "docs/readme.md",
            "app/next/page.tsx",
        ] {
            assert!(!filter.is_excluded(kept), "{kept} should be kept");
        }
    }

    #[test]
    fn test_extra_excludes_append() {
        let filter = PathFilter::default().with_extra_excludes(["__tests__", ""]);
        assert!(filter.is_excluded("src/__tests__/a.test.ts"));
        assert!(filter.is_excluded("package.json"));
        assert!(!filter.is_excluded("src/a.ts"));
    }

    #[test]
    fn test_apply_preserves_order() {
        let entries = vec![
            PathEntry::file("b.ts"),
            PathEntry::file("node_modules/x.js"),
            PathEntry::file("a.ts"),
        ];
        let kept = PathFilter::default().apply(entries);
        assert_eq!(kept, vec![PathEntry::file("b.ts"), PathEntry::file("a.ts")]);
    }
}
