//! # Legend
//!
//! File: cli/src/common/diagram/legend.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The color lookup used to paint nodes. Folders get one fixed color; files
//! are colored by category, with a fallback for files that carry none. Two
//! presets exist:
//!
//! - `categories`: five category colors, used by the repository explorer
//! - `two-tone`: folder/file only, used by the related-files view
//!
use crate::common::tree::{Category, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named legend presets selectable from the CLI and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LegendScheme {
    #[default]
    Categories,
    TwoTone,
}

/// One row of a rendered legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub folder: String,
    pub categories: BTreeMap<Category, String>,
    pub fallback: String,
}

impl Default for Legend {
    fn default() -> Self {
        Self::categories()
    }
}

impl Legend {
    pub fn categories() -> Self {
        let categories = BTreeMap::from([
            (Category::Page, "#3b82f6".to_string()),
            (Category::Api, "#10b981".to_string()),
            (Category::Component, "#f59e0b".to_string()),
            (Category::Code, "#8b5cf6".to_string()),
            (Category::Other, "#9ca3af".to_string()),
        ]);
        Self {
            folder: "#4b5563".to_string(),
            categories,
            fallback: "#d1d5db".to_string(),
        }
    }

    pub fn two_tone() -> Self {
        Self {
            folder: "#4b5563".to_string(),
            categories: BTreeMap::new(),
            fallback: "#60a5fa".to_string(),
        }
    }

    pub fn from_scheme(scheme: LegendScheme) -> Self {
        match scheme {
            LegendScheme::Categories => Self::categories(),
            LegendScheme::TwoTone => Self::two_tone(),
        }
    }

    /// Fill color for a node.
    pub fn color_for(&self, kind: NodeKind, category: Option<Category>) -> &str {
        match kind {
            NodeKind::Folder => &self.folder,
            NodeKind::File => category
                .and_then(|category| self.categories.get(&category))
                .unwrap_or(&self.fallback),
        }
    }

    /// Rows to display, folder first, then categories in declaration order.
    pub fn entries(&self) -> Vec<LegendEntry> {
        let mut rows = vec![LegendEntry {
            label: "folder".to_string(),
            color: self.folder.clone(),
        }];
        if self.categories.is_empty() {
            rows.push(LegendEntry {
                label: "file".to_string(),
                color: self.fallback.clone(),
            });
        } else {
            rows.extend(self.categories.iter().map(|(category, color)| LegendEntry {
                label: category.to_string(),
                color: color.clone(),
            }));
        }
        rows
    }
}
