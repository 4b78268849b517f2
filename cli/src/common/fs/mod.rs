//! # TreePT Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers shared by the commands:
//!
//! - **`io`**: reading inputs (files or stdin) and writing rendered output.
//! - **`scan`**: turning a local checkout into a path list.
//!
//! Import from the submodule, e.g. `crate::common::fs::io::write_string_to_file`.
//!

/// Basic file I/O (`ensure_dir_exists`, `read_input`, `write_string_to_file`).
pub mod io;
/// Directory walking (`scan_directory`).
pub mod scan;
