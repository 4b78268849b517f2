//! # Tree Command (`treept tree`)
//!
//! File: cli/src/commands/tree.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Builds the logical tree from a path-list source and prints it, either as
//! an indented text listing or as JSON. Useful for checking what the denylist
//! and category heuristics make of a repository before rendering a diagram.
//!
//! ```bash
//! treept tree --dir . --categories
//! curl -s https://api.github.com/repos/o/r/git/trees/main?recursive=1 | treept tree --github-tree - --format json
//! ```
//!
use super::input::InputArgs;
use crate::common::tree::printer::{print_tree_to_string, PrintOptions};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TreeFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = TreeFormat::Text)]
    pub format: TreeFormat,

    /// Append the category of each file (text format).
    #[arg(long)]
    pub categories: bool,

    /// Never bold folder names.
    #[arg(long)]
    pub no_color: bool,
}

pub async fn handle_tree(args: TreeArgs) -> Result<()> {
    info!("Handling tree command...");
    let cfg = config::load_config().context("Failed to load TreePT configuration")?;
    let loaded = args.input.load_tree(&cfg)?;

    match args.format {
        TreeFormat::Json => {
            let json = serde_json::to_string_pretty(&loaded.root)
                .context("Failed to serialize tree as JSON")?;
            println!("{}", json);
        }
        TreeFormat::Text => {
            let options = PrintOptions {
                color: !args.no_color && std::io::stdout().is_terminal(),
                show_categories: args.categories,
            };
            let text = print_tree_to_string(&loaded.root, &loaded.title, &options)?;
            print!("{}", text);
            println!(
                "\n{} folders, {} files",
                loaded.root.folder_count(),
                loaded.root.file_count()
            );
        }
    }
    Ok(())
}
