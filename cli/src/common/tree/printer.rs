//! # TreePT Tree Printer
//!
//! File: cli/src/common/tree/printer.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module prints a logical `TreeNode` hierarchy as text, similar to the
//! output of the `tree` command-line utility. It is used by `treept tree` to
//! show the repository structure a diagram would be built from.
//!
//! ## Architecture
//!
//! The tree printer implements several features:
//!
//! - Recursive traversal in the tree's own child order (first-seen order, no re-sorting)
//! - Indentation and connector lines (├──, └──, │)
//! - Bold formatting for folder names (using ANSI escape codes, optional)
//! - Optional `[category]` tags after file names
//!
//! ## Usage
//!
//! ```rust
//! let options = PrintOptions { color: false, show_categories: true };
//! let text = print_tree_to_string(&root, "my-repo", &options)?;
//! ```
//!
//! Example output:
//!
//! ```text
//! my-repo/
//! └── src/
//!     ├── app/
//!     │   └── page.tsx [page]
//!     └── index.js [code]
//! ```
//!
use super::builder::TreeNode;
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use std::fmt::Write as FmtWrite;

// --- Constants for Tree Drawing ---

/// Connector for intermediate items in a listing ("T" shape).
const TEE: &str = "├── ";
/// Connector for the last item in a listing ("L" shape).
const ELBOW: &str = "└── ";
/// Vertical line used for ongoing indentation levels.
const PIPE: &str = "│   ";
/// Spacer used for indentation levels after the last item has been printed.
const SPACER: &str = "    ";
/// ANSI escape code to start bold text formatting (for folders).
const BOLD_START: &str = "\x1b[1m";
/// ANSI escape code to reset text formatting.
const BOLD_END: &str = "\x1b[0m";

/// Presentation switches for the printer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    /// Bold folder names with ANSI codes.
    pub color: bool,
    /// Append `[category]` to file names.
    pub show_categories: bool,
}

/// # Generate Tree String (`print_tree_to_string`)
///
/// Renders the hierarchy below `root` as text. The root line uses
/// `display_name` since the synthetic root has no name of its own.
///
/// ## Returns
///
/// * `Result<String>` - The formatted tree, or an error if writing to the buffer fails.
pub fn print_tree_to_string(
    root: &TreeNode,
    display_name: &str,
    options: &PrintOptions,
) -> Result<String> {
    let mut output = String::new();
    write_folder_name(&mut output, display_name, options)
        .map_err(|e| anyhow!(e).context("Failed to write root name"))?;
    writeln!(output).map_err(|e| anyhow!(e))?;

    walk_and_build_string(root, &mut String::new(), options, &mut output)
        .context("Failed while generating tree string")?;
    Ok(output)
}

/// # Recursive Tree Walker (`walk_and_build_string`)
///
/// Writes one line per child of `node`, then recurses into folders while
/// growing `current_prefix` by a pipe or spacer, and truncates it again on the
/// way back up.
fn walk_and_build_string(
    node: &TreeNode,
    current_prefix: &mut String,
    options: &PrintOptions,
    output: &mut dyn FmtWrite,
) -> Result<()> {
    let num_children = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let is_last_entry = index == num_children - 1;

        write!(output, "{}", current_prefix).map_err(|e| anyhow!(e))?;
        let connector = if is_last_entry { ELBOW } else { TEE };
        write!(output, "{}", connector).map_err(|e| anyhow!(e))?;

        if child.is_folder() {
            write_folder_name(output, &child.name, options).map_err(|e| anyhow!(e))?;
            writeln!(output).map_err(|e| anyhow!(e))?;

            let prefix_component = if is_last_entry { SPACER } else { PIPE };
            current_prefix.push_str(prefix_component);
            walk_and_build_string(child, current_prefix, options, output)?;
            current_prefix.truncate(current_prefix.len() - prefix_component.len());
        } else {
            let written = match (options.show_categories, child.category) {
                (true, Some(category)) => writeln!(output, "{} [{}]", child.name, category),
                _ => writeln!(output, "{}", child.name),
            };
            written.map_err(|e| anyhow!(e))?;
        }
    }
    Ok(())
}

fn write_folder_name(
    output: &mut dyn FmtWrite,
    name: &str,
    options: &PrintOptions,
) -> std::fmt::Result {
    if options.color {
        write!(output, "{}{}/{}", BOLD_START, name, BOLD_END)
    } else {
        write!(output, "{}/", name)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tree::builder::build_tree;
    use crate::common::tree::entry::{entries_from_paths, PathEntry};

    fn sample_tree() -> TreeNode {
        build_tree(&entries_from_paths([
            "src/app/page.tsx",
            "src/app/api/route.ts",
            "src/index.js",
            "public/logo.png",
        ]))
    }

    #[test]
    fn test_print_tree_plain() -> Result<()> {
        let text = print_tree_to_string(&sample_tree(), "repo", &PrintOptions::default())?;
        let expected = "\
repo/
├── src/
│   ├── app/
│   │   ├── page.tsx
│   │   └── api/
│   │       └── route.ts
│   └── index.js
└── public/
    └── logo.png
";
        assert_eq!(text, expected);
        Ok(())
    }

    #[test]
    fn test_print_tree_with_categories_and_color() -> Result<()> {
        let options = PrintOptions {
            color: true,
            show_categories: true,
        };
        let text = print_tree_to_string(&sample_tree(), "repo", &options)?;
        assert!(text.starts_with(&format!("{}repo/{}", BOLD_START, BOLD_END)));
        assert!(text.contains(&format!("{}src/{}", BOLD_START, BOLD_END)));
        assert!(text.contains("page.tsx [page]"));
        assert!(text.contains("route.ts [api]"));
        assert!(text.contains("logo.png [other]"));
        Ok(())
    }

    #[test]
    fn test_print_empty_tree() -> Result<()> {
        let root = build_tree(&Vec::<PathEntry>::new());
        let text = print_tree_to_string(&root, "empty", &PrintOptions::default())?;
        assert_eq!(text, "empty/\n");
        Ok(())
    }
}
