//! # TreePT Page Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Wraps a rendered SVG diagram in a standalone HTML page using the Tera
//! engine. The page template is compiled into the binary and rendered one-off
//! with a `PageContext`:
//!
//! - `title`, `files`, `folders`: header text
//! - `svg`: the diagram markup, inserted unescaped
//! - `generated_at`: render timestamp
//! - `interactive`: adds the click/pan/zoom/resize script used by `treept serve`
//!
//! ```rust
//! let page = templating::render_diagram_page(&PageContext::new("my-repo", &root, svg, false))?;
//! ```
//!
use crate::common::tree::TreeNode;
use crate::core::error::{Result, TreeptError};
use anyhow::anyhow;
use chrono::Local;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

const DIAGRAM_PAGE_TEMPLATE: &str = include_str!("../../templates/diagram.html.tera");

/// Values available to the page template.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub title: String,
    pub svg: String,
    pub files: usize,
    pub folders: usize,
    pub generated_at: String,
    pub interactive: bool,
}

impl PageContext {
    pub fn new(title: &str, root: &TreeNode, svg: String, interactive: bool) -> Self {
        Self {
            title: title.to_string(),
            svg,
            files: root.file_count(),
            folders: root.folder_count(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            interactive,
        }
    }
}

/// Renders the HTML page around a diagram.
pub fn render_diagram_page(page: &PageContext) -> Result<String> {
    let context = tera::Context::from_serialize(page).map_err(|e| {
        anyhow!(TreeptError::Template { source: e }).context("Failed to create Tera context for the diagram page")
    })?;
    let html = Tera::one_off(DIAGRAM_PAGE_TEMPLATE, &context, true).map_err(|e| {
        anyhow!(TreeptError::Template { source: e }).context("Tera rendering failed for the diagram page")
    })?;
    debug!("Rendered diagram page '{}' ({} bytes).", page.title, html.len());
    Ok(html)
}
