//! # Tree Builder
//!
//! File: cli/src/common/tree/builder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Converts a flat list of `PathEntry` records into a rooted hierarchy of
//! named folder and file nodes. The builder is pure: the same entries always
//! produce the same tree, and children keep the order in which their names
//! were first seen while scanning the input.
//!
//! ## Construction
//!
//! For each entry the path is split on `/` and walked from the root. Every
//! segment except the last becomes (or reuses) a folder. The last segment is a
//! file only when the entry is file-like; otherwise it is a folder.
//!
//! ## File/folder conflicts
//!
//! Input such as `src/util` (file) together with `src/util/helpers.js` claims
//! the same path as both a file and a folder. Folder wins: an existing file
//! node that later needs children is promoted to a folder (losing its
//! category), and a file entry naming an existing folder is dropped.
//!
//! ## Examples
//!
//! ```rust
//! let entries = vec![PathEntry::file("src/index.js"), PathEntry::file("src/App.js")];
//! let root = build_tree(&entries);
//! assert_eq!(root.children[0].name, "src");
//! ```
//!
use super::category::{classify, Category};
use super::entry::PathEntry;
use serde::Serialize;
use tracing::debug;

/// Whether a node is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One node of the logical tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Final path segment; empty for the root.
    pub name: String,
    /// Full path from the root; empty for the root.
    pub path: String,
    pub kind: NodeKind,
    /// Set for files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// First-seen order. Always empty for files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// The synthetic root: an unnamed folder at path `""`.
    pub fn root() -> Self {
        Self::folder(String::new(), String::new())
    }

    fn folder(name: String, path: String) -> Self {
        Self {
            name,
            path,
            kind: NodeKind::Folder,
            category: None,
            children: Vec::new(),
        }
    }

    fn file(name: String, path: String) -> Self {
        let category = Some(classify(&path));
        Self {
            name,
            path,
            kind: NodeKind::File,
            category,
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Looks a descendant up by its full path. `""` returns the root itself.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.iter().find(|child| child.name == segment)?;
        }
        Some(node)
    }

    /// Depth-first, pre-order iteration over this node and its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of file nodes below (and including) this node.
    pub fn file_count(&self) -> usize {
        self.iter().filter(|node| !node.is_folder()).count()
    }

    /// Number of folder nodes below this node, not counting the root.
    pub fn folder_count(&self) -> usize {
        self.iter()
            .filter(|node| node.is_folder() && !node.is_root())
            .count()
    }

    /// Child with the given name, creating it as a folder if absent.
    /// An existing file of that name is promoted to a folder.
    fn folder_child(&mut self, name: &str, path: &str) -> &mut TreeNode {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(index) => {
                let child = &mut self.children[index];
                if child.kind == NodeKind::File {
                    debug!("Promoting '{}' from file to folder (folder wins).", path);
                    child.kind = NodeKind::Folder;
                    child.category = None;
                }
                index
            }
            None => {
                self.children
                    .push(TreeNode::folder(name.to_string(), path.to_string()));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Adds a file child unless a node of that name already exists.
    fn insert_file(&mut self, name: &str, path: &str) {
        match self.children.iter().find(|c| c.name == name) {
            Some(existing) if existing.is_folder() => {
                debug!("Dropping file entry '{}': a folder already owns that path.", path);
            }
            Some(_) => {}
            None => self
                .children
                .push(TreeNode::file(name.to_string(), path.to_string())),
        }
    }
}

/// Builds the logical tree from path entries.
///
/// Entries with an empty path (or only separators) are skipped. An empty
/// input produces a root without children.
pub fn build_tree<'a, I>(entries: I) -> TreeNode
where
    I: IntoIterator<Item = &'a PathEntry>,
{
    let mut root = TreeNode::root();
    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = segments.split_last() else {
            debug!("Skipping entry with empty path.");
            continue;
        };

        let mut node = &mut root;
        let mut path = String::new();
        for segment in parents {
            push_segment(&mut path, segment);
            node = node.folder_child(segment, &path);
        }
        push_segment(&mut path, last);
        if entry.kind.is_file() {
            node.insert_file(last, &path);
        } else {
            node.folder_child(last, &path);
        }
    }
    root
}

fn push_segment(path: &mut String, segment: &str) {
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(segment);
}
