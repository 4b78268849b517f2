//! # Local Directory Scan
//!
//! File: cli/src/common/fs/scan.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Produces a path list from a checkout on disk, in the same shape the
//! GitHub tree endpoint returns: every file and directory below the root as a
//! `/`-separated relative path. The walk is sorted by file name so the result
//! is deterministic, and `.git` is never descended into.
//!
//! Entries that cannot be read are logged and skipped, mirroring how the
//! template walker treats unreadable entries.
//!
use crate::common::tree::PathEntry;
use crate::core::error::{Result, TreeptError};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists every file and directory under `root` as `PathEntry` records.
pub fn scan_directory(root: &Path) -> Result<Vec<PathEntry>> {
    if !root.is_dir() {
        anyhow::bail!(TreeptError::Input(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to access entry while scanning '{}': {}", root.display(), e);
                continue;
            }
        };
        let Some(relative) = pathdiff::diff_paths(entry.path(), root) else {
            warn!("Could not relativize '{}'", entry.path().display());
            continue;
        };
        let path = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if entry.file_type().is_dir() {
            entries.push(PathEntry::directory(path));
        } else {
            entries.push(PathEntry::file(path));
        }
    }

    debug!("Scanned {} entries under '{}'.", entries.len(), root.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tree::EntryKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_lists_relative_paths() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("src/pages"))?;
        fs::create_dir_all(dir.path().join(".git/objects"))?;
        fs::write(dir.path().join("src/pages/index.js"), "")?;
        fs::write(dir.path().join("src/App.js"), "")?;
        fs::write(dir.path().join(".git/HEAD"), "")?;

        let entries = scan_directory(dir.path())?;
        let listed: Vec<(&str, EntryKind)> =
            entries.iter().map(|e| (e.path.as_str(), e.kind)).collect();
        assert_eq!(
            listed,
            vec![
                ("src", EntryKind::Directory),
                ("src/App.js", EntryKind::File),
                ("src/pages", EntryKind::Directory),
                ("src/pages/index.js", EntryKind::File),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_scan_rejects_files() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("x.txt");
        fs::write(&file, "")?;
        assert!(scan_directory(&file).is_err());
        Ok(())
    }
}
