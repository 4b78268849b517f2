//! # TreePT Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers. Command-specific
//! logic lives under `commands::`; configuration, errors and templating under
//! `core::`.
//!
//! - **`tree`**: path lists to a logical `TreeNode` hierarchy.
//! - **`diagram`**: the stateful, animated node-link renderer.
//! - **`fs`**: input reading, output writing and local directory scans.
//!

/// Path list decoding, filtering, categorizing and tree building.
pub mod tree;
/// Layout, diffing and SVG output for the interactive diagram.
pub mod diagram;
/// Filesystem operations (I/O, directory scan).
pub mod fs;
