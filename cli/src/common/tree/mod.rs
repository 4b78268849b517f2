//! # TreePT Tree Module (`common::tree`)
//!
//! File: cli/src/common/tree/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything needed to turn a flat list of repository paths into a logical
//! tree: decoding the inputs, the page denylist, category heuristics, the
//! builder itself and a text printer.
//!
//! ```rust
//! let entries = PathFilter::default().apply(parse_entries(&json)?);
//! let root = build_tree(&entries);
//! ```
//!

/// Input records (`PathEntry`) and lenient JSON decoding.
pub mod entry;
/// The fixed denylist applied before building.
pub mod filter;
/// Category heuristics for file nodes.
pub mod category;
/// `TreeNode` and `build_tree`.
pub mod builder;
/// Text rendering with box-drawing connectors.
pub mod printer;

pub use builder::{build_tree, NodeKind, TreeNode};
pub use category::Category;
pub use entry::{entries_from_paths, parse_entries, EntryKind, PathEntry};
pub use filter::PathFilter;
