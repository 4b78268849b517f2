//! # TreePT Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach context to every error:
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`**: reads a whole file.
//! - **`read_input`**: reads a path-list source, where `-` means stdin.
//! - **`write_string_to_file`**: writes a file, creating its parent directory.
//!
//! ```rust
//! let json = io::read_input(Path::new("-"))?;
//! io::write_string_to_file(Path::new("out/diagram.svg"), &svg)?;
//! ```
//!
use crate::core::error::{Result, TreeptError};
use anyhow::Context;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`, creating parents as needed.
///
/// # Errors
///
/// Fails if the path exists but is not a directory, or if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(TreeptError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads an input document. `-` reads standard input to the end.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        debug!("Reading input from stdin.");
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read input from stdin")?;
        return Ok(buffer);
    }
    if !path.is_file() {
        anyhow::bail!(TreeptError::Input(format!(
            "Input file not found: {}",
            path.display()
        )));
    }
    read_file_to_string(path)
}

/// Writes `content` to `path`, overwriting it and creating the parent
/// directory if needed.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}
