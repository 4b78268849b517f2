//! # TreePT Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: layered TOML configuration (defaults, user file, project file)
//! - `error`: `TreeptError` and the crate-wide `Result` alias
//! - `templating`: the HTML page wrapped around rendered diagrams
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{TreeptError, Result}; // For error handling
//! use crate::core::templating; // For HTML output
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
