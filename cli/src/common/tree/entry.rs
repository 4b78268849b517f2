//! # Path Entries
//!
//! File: cli/src/common/tree/entry.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `PathEntry` is one record describing a repository path and whether it
//! names a file or a directory. Entries reach TreePT from three places:
//!
//! - a GitHub `git/trees?recursive=1` response (`{"tree": [{"path", "type"}]}`)
//! - a related-files list returned alongside a generated solution, either a bare
//!   array of strings or an object with a `related_files` / `relatedFiles` field
//! - a local checkout walked by `common::fs::scan`
//!
//! Decoding is lenient. Records without a `path` are skipped silently, and a
//! record without a kind (the related-files case) is treated as a file.
//!
use crate::core::error::{Result, TreeptError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Whether an entry's final segment is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Maps a source `type`/`kind` string onto an entry kind.
    ///
    /// `blob` (GitHub) and `file` are file-like. Anything else, including
    /// `tree`, `directory` and submodule `commit` records, is a directory.
    pub fn from_source(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "blob" | "file" => EntryKind::File,
            _ => EntryKind::Directory,
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// A single `/`-separated repository path plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Raw record shape accepted on input. Plain strings are related-file paths.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawEntry {
    Path(String),
    Record {
        #[serde(default)]
        path: Option<String>,
        #[serde(default, alias = "type")]
        kind: Option<String>,
    },
    // Anything else (numbers, nulls, nested arrays) is malformed and skipped.
    Other(Value),
}

impl RawEntry {
    fn into_entry(self) -> Option<PathEntry> {
        match self {
            RawEntry::Path(path) => Some(PathEntry::file(path)),
            RawEntry::Record {
                path: Some(path),
                kind,
            } => Some(PathEntry {
                path,
                kind: kind
                    .as_deref()
                    .map(EntryKind::from_source)
                    .unwrap_or(EntryKind::File),
            }),
            RawEntry::Record { path: None, .. } | RawEntry::Other(_) => None,
        }
    }
}

/// Field names that may carry the entry list inside a JSON object.
const LIST_FIELDS: [&str; 4] = ["tree", "related_files", "relatedFiles", "files"];

/// Decodes a JSON document into path entries.
///
/// Accepts a bare array (of records or strings) or an object carrying the list
/// under one of `tree`, `related_files`, `relatedFiles` or `files`. Malformed
/// items are skipped; a document with no recognizable list is an error.
pub fn parse_entries(json: &str) -> Result<Vec<PathEntry>> {
    let document: Value = serde_json::from_str(json).map_err(TreeptError::from)?;
    let list = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if map.get("truncated").and_then(Value::as_bool) == Some(true) {
                debug!("Source tree response is marked truncated; some paths may be missing.");
            }
            match LIST_FIELDS.iter().find_map(|field| map.remove(*field)) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(TreeptError::Input(
                        "path list field is present but is not an array".to_string(),
                    )
                    .into())
                }
                None => {
                    return Err(TreeptError::Input(format!(
                        "expected a JSON array or an object with one of: {}",
                        LIST_FIELDS.join(", ")
                    ))
                    .into())
                }
            }
        }
        _ => {
            return Err(TreeptError::Input("expected a JSON array or object".to_string()).into())
        }
    };

    let total = list.len();
    let entries: Vec<PathEntry> = list
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawEntry>(item).ok())
        .filter_map(RawEntry::into_entry)
        .collect();
    if entries.len() != total {
        debug!("Skipped {} malformed entries.", total - entries.len());
    }
    Ok(entries)
}

/// Treats every path as a file entry, the way related-file lists are consumed.
pub fn entries_from_paths<I, S>(paths: I) -> Vec<PathEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    paths.into_iter().map(PathEntry::file).collect()
}
