//! # Path-List Sources
//!
//! File: cli/src/commands/input.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Arguments shared by every command that builds a tree, and the pipeline
//! that turns them into one:
//!
//! 1. read the source (`--github-tree`, `--related` or `--dir`)
//! 2. decode it into `PathEntry` records
//! 3. drop denylisted paths (fixed list plus `[filter] extra_excludes`)
//! 4. build the `TreeNode` hierarchy
//!
//! `--github-tree` and `--related` accept `-` to read standard input.
//!
use crate::common::diagram::LegendScheme;
use crate::common::fs::{io, scan};
use crate::common::tree::{build_tree, entries_from_paths, parse_entries, PathEntry, TreeNode};
use crate::core::config::Config;
use crate::core::error::{Result, TreeptError};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the path list comes from. Exactly one source is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// A GitHub `git/trees?recursive=1` response (JSON file, or `-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub github_tree: Option<PathBuf>,

    /// A related-files list: a JSON array of paths or an object with
    /// `related_files`/`relatedFiles` (file, or `-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub related: Option<PathBuf>,

    /// A local checkout to scan.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// A built tree plus what the commands need to present it.
#[derive(Debug)]
pub struct LoadedTree {
    pub root: TreeNode,
    /// Display name for the root.
    pub title: String,
    /// Legend preset suited to the source.
    pub scheme: LegendScheme,
}

impl InputArgs {
    /// Name used for the root label and page title.
    fn title(&self) -> String {
        let source = self
            .dir
            .as_deref()
            .or(self.github_tree.as_deref())
            .or(self.related.as_deref());
        match source {
            Some(path) if path.as_os_str() == "-" => "stdin".to_string(),
            Some(path) if self.dir.is_some() => dir_name(path),
            Some(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "tree".to_string()),
            None => "tree".to_string(),
        }
    }

    /// Reads the selected source into raw entries, before filtering.
    pub fn read_entries(&self) -> Result<Vec<PathEntry>> {
        if let Some(path) = &self.github_tree {
            let json = io::read_input(path)?;
            parse_entries(&json)
                .with_context(|| format!("Failed to decode GitHub tree from {}", path.display()))
        } else if let Some(path) = &self.related {
            let json = io::read_input(path)?;
            let entries = parse_entries(&json)
                .with_context(|| format!("Failed to decode related files from {}", path.display()))?;
            Ok(entries_from_paths(entries.into_iter().map(|entry| entry.path)))
        } else if let Some(dir) = &self.dir {
            scan::scan_directory(dir)
        } else {
            anyhow::bail!(TreeptError::Input(
                "one of --github-tree, --related or --dir is required".to_string()
            ))
        }
    }

    /// Reads, filters and builds.
    pub fn load_tree(&self, config: &Config) -> Result<LoadedTree> {
        let entries = self.read_entries()?;
        let read = entries.len();
        let entries = config.path_filter().apply(entries);
        let root = build_tree(&entries);
        info!(
            "Built tree from {} entries ({} kept after filtering): {} folders, {} files.",
            read,
            entries.len(),
            root.folder_count(),
            root.file_count()
        );
        let scheme = if self.related.is_some() {
            LegendScheme::TwoTone
        } else {
            LegendScheme::Categories
        };
        Ok(LoadedTree {
            root,
            title: self.title(),
            scheme,
        })
    }
}

fn dir_name(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args() -> InputArgs {
        InputArgs {
            github_tree: None,
            related: None,
            dir: None,
        }
    }

    #[test]
    fn test_related_entries_are_files() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("related.json");
        fs::write(&file, r#"{"related_files": ["src/pages/index.js", "src/App.js", "package.json"]}"#)?;
        let input = InputArgs {
            related: Some(file),
            ..args()
        };
        let loaded = input.load_tree(&Config::default())?;
        assert_eq!(loaded.title, "related");
        assert_eq!(loaded.scheme, LegendScheme::TwoTone);
        // package.json is denylisted
        assert_eq!(loaded.root.file_count(), 2);
        assert!(loaded.root.find("package.json").is_none());
        Ok(())
    }

    #[test]
    fn test_related_folder_entries_become_files() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("related.json");
        fs::write(&file, r#"[{"path": "docs/guide", "type": "tree"}]"#)?;
        let input = InputArgs {
            related: Some(file),
            ..args()
        };
        assert_eq!(input.read_entries()?, entries_from_paths(["docs/guide"]));
        Ok(())
    }

    #[test]
    fn test_github_tree_source() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("repo-tree.json");
        fs::write(
            &file,
            r#"{"tree": [{"path": "src", "type": "tree"}, {"path": "src/index.js", "type": "blob"}, {"path": "node_modules/x.js", "type": "blob"}]}"#,
        )?;
        let input = InputArgs {
            github_tree: Some(file),
            ..args()
        };
        let loaded = input.load_tree(&Config::default())?;
        assert_eq!(loaded.title, "repo-tree");
        assert_eq!(loaded.scheme, LegendScheme::Categories);
        assert_eq!(loaded.root.children.len(), 1);
        assert!(loaded.root.find("src/index.js").is_some());
        Ok(())
    }

    #[test]
    fn test_dir_source_uses_directory_name() -> Result<()> {
        let dir = tempdir()?;
        let checkout = dir.path().join("my-app");
        fs::create_dir_all(checkout.join("src"))?;
        fs::write(checkout.join("src/index.js"), "")?;
        let input = InputArgs {
            dir: Some(checkout),
            ..args()
        };
        let loaded = input.load_tree(&Config::default())?;
        assert_eq!(loaded.title, "my-app");
        assert_eq!(loaded.root.file_count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_source_file() {
        let input = InputArgs {
            github_tree: Some(PathBuf::from("/definitely/not/here.json")),
            ..args()
        };
        assert!(input.load_tree(&Config::default()).is_err());
    }
}
