//! # Serve Command (`treept serve`)
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs an interactive diagram session in the browser. The tree is built once
//! at startup; the renderer then lives in the server process and every click,
//! drag, wheel or window resize on the page becomes an update on it. The page
//! only ever swaps in the SVG the server returns.
//!
//! ## Architecture
//!
//! - `config.rs`: arguments and their merge with `[server]` settings
//! - `session.rs`: renderer, container and tree behind a shared lock
//! - `server_logic.rs`: Axum routes, middleware and the serve loop
//! - `utils.rs`: LAN address detection for the startup banner
//!
//! ```bash
//! treept serve --dir .
//! treept serve --github-tree tree.json --port 9000 --host 0.0.0.0
//! ```
//!
use crate::common::diagram::{DiagramRenderer, LegendScheme};
use crate::core::config as treept_config;
use crate::core::error::Result;
use anyhow::Context;
use tracing::info;

pub use config::ServeArgs;

/// Argument parsing and the merge with `[server]`/`[render]` settings.
pub mod config;

/// The Axum application and serve loop.
pub mod server_logic;

/// The renderer state shared by every request.
pub mod session;

pub mod utils;

/// # Handle Serve Command (`handle_serve`)
///
/// Entry point for `treept serve`:
/// 1. Loads the configuration and resolves host, port and initial size.
/// 2. Reads, filters and builds the tree from the selected source.
/// 3. Picks the legend (`--legend`, else two-tone for `--related`, else
///    `[legend] scheme`) and creates the renderer.
/// 4. Renders the first frame into a session and serves it until shutdown.
///
/// ## Errors
///
/// Returns an error if the configuration or input cannot be loaded, the size
/// is not drawable, or the server fails to start.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command...");
    let cfg = treept_config::load_config().context("Failed to load TreePT configuration")?;
    let settings = args.resolve(&cfg)?;
    let loaded = args.input.load_tree(&cfg)?;

    let scheme = args.legend.unwrap_or(if loaded.scheme == LegendScheme::TwoTone {
        LegendScheme::TwoTone
    } else {
        cfg.legend.scheme
    });
    let renderer = DiagramRenderer::new(cfg.renderer_config(&loaded.title), cfg.legend_for(scheme));
    let session = session::Session::new(renderer, settings.size, loaded.root, &loaded.title).shared();

    server_logic::run_server(settings, session).await
}
