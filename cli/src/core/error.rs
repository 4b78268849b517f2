//! # TreePT Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout TreePT. The tree builder
//! and the diagram renderer themselves never fail: malformed entries are skipped
//! and renders against an unmounted container are no-ops. Errors therefore only
//! come from the outer layers: reading inputs, loading configuration, rendering
//! templates and running the HTTP session.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `TreeptError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     return Err(TreeptError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read input: {}", path.display()))?;
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<TreeptError>().map_or(false, |te| matches!(te, TreeptError::NodeNotFound { .. })) => {
//!         // map to a 404
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the TreePT application.
#[derive(Error, Debug)]
pub enum TreeptError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Malformed path list: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Node '{key}' not found in the diagram.")]
    NodeNotFound { key: String },

    #[error("Server error: {0}")]
    Server(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
