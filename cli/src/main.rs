//! # TreePT Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point for the TreePT CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ```bash
//! treept --help
//! treept -v tree --dir .
//! treept render --github-tree tree.json -o diagram.svg
//! treept -vv serve --related related.json
//! ```
//!
//! Logs go to stderr so `tree` and `render` output can be piped.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // tree, render, serve
mod common; // tree model, diagram renderer, filesystem helpers
mod core; // errors, configuration, templating

#[derive(Parser, Debug)]
#[command(
    name = "treept",
    about = "🌳 TreePT: repository file trees and animated tree diagrams",
    long_about = "Builds a folder/file tree from a GitHub tree listing, a related-files list\n\
                  or a local checkout, and renders it as a collapsible, animated diagram.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Print the tree built from a path list.
    #[command(alias = "t")]
    Tree(commands::tree::TreeArgs),
    /// Render the tree diagram to SVG or HTML.
    #[command(alias = "r")]
    Render(commands::render::RenderArgs),
    /// Serve an interactive diagram in the browser.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Tree(args) => commands::tree::handle_tree(args).await,
        Commands::Render(args) => commands::render::handle_render(args).await,
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
