//! # TreePT Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level commands of the TreePT CLI. Each command defines its own
//! arguments struct and an async `handle_*` function called from `main.rs`.
//!
//! - `tree`: print the logical tree built from a path list
//! - `render`: write the diagram as SVG or HTML
//! - `serve`: interactive diagram session in the browser
//!
//! `input` holds the path-list source arguments all three share.
//!

/// Path-list sources shared by every command.
pub mod input;
/// Headless SVG/HTML rendering.
pub mod render;
/// Interactive diagram server.
pub mod serve;
/// Text and JSON tree listings.
pub mod tree;
