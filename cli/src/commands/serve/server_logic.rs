//! # Diagram Server
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The Axum application behind `treept serve`. The page script posts user
//! gestures and swaps in the SVG each endpoint returns:
//!
//! | Route                         | Effect                                  |
//! |-------------------------------|-----------------------------------------|
//! | `GET /`                       | interactive HTML page                   |
//! | `GET /diagram.svg`            | current diagram                         |
//! | `GET /api/tree`               | logical tree as JSON                    |
//! | `POST /api/nodes/{id}/toggle` | expand/collapse a folder (404 if unknown) |
//! | `POST /api/resize`            | `{width, height}`: re-render from scratch |
//! | `POST /api/pan`               | `{dx, dy}`: move the viewport           |
//! | `POST /api/zoom`              | `{factor, x, y}`: zoom around a point   |
//!
//! Requests pass through a `TraceLayer` and, when enabled, a permissive
//! `CorsLayer`.
//!
//! ## Architecture
//!
//! All handlers share one `SharedSession` (`Arc<tokio::sync::Mutex<Session>>`)
//! through Axum state. Each handler holds the lock for the whole gesture, so
//! the renderer sees requests one at a time in arrival order. Handlers that
//! change the diagram answer with a fresh snapshot: the SVG of the transition
//! just computed, after which the session settles the scene so the next
//! gesture starts from rest.
//!
//! Request bodies are validated before the lock is taken. Sizes must be finite
//! and positive, pan offsets finite and zoom factors positive; anything else
//! is a `400`.
//!
//! ## Usage
//!
//! ```rust
//! let session = Session::new(renderer, size, tree, "my-app").shared();
//! run_server(settings, session).await?;
//! ```
//!
use super::config::ServeSettings;
use super::session::SharedSession;
use super::utils;
use crate::common::diagram::{NodeId, Point, Size};
use crate::core::error::{Result, TreeptError};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run Diagram Server (`run_server`)
///
/// Binds the first free port from the configured one, prints the URLs and
/// serves the diagram until Ctrl+C or SIGTERM.
///
/// ## Arguments
///
/// * `settings`: Host, port and CORS choice resolved from arguments and
///   configuration.
/// * `session`: The session holding the rendered diagram.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after a graceful shutdown.
///
/// ## Errors
///
/// Returns an error if no port is free within `MAX_PORT_ATTEMPTS`, the
/// listener cannot be bound, or the server fails while running.
pub async fn run_server(settings: ServeSettings, session: SharedSession) -> Result<()> {
    let addr = find_available_port(settings.host, settings.port, MAX_PORT_ATTEMPTS).await?;
    let local_ip = utils::get_local_ip();
    let title = session.lock().await.title().to_string();
    let app = create_app(session, settings.enable_cors);

    println!("\n=================================================================");
    println!("🌳 Diagram:           {}", title);
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    if local_ip != "localhost" && !addr.ip().is_loopback() {
        println!("🔗 Network URL:       http://{}:{}", local_ip, addr.port());
    }
    println!("⚙️  Binding to address: {}", addr);
    println!("🔒 CORS enabled:      {}", settings.enable_cors);
    println!("=================================================================\n");

    info!("Starting diagram server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM. A handler that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Returns the first port from `start_port` that can be bound, trying at most
/// `max_attempts` consecutive ports. The trial listener is dropped right away.
///
/// ## Arguments
///
/// * `host`: The interface to bind on.
/// * `start_port`: The first port to try.
/// * `max_attempts`: How many consecutive ports to try.
///
/// ## Returns
///
/// * `Result<SocketAddr>`: The address that could be bound.
///
/// ## Errors
///
/// Returns a `TreeptError::Server` if every attempt fails or the port range
/// runs out.
async fn find_available_port(host: IpAddr, start_port: u16, max_attempts: u8) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, using port {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: port {} on {} is unavailable ({}). Trying next port...",
                    attempt + 1,
                    current_port,
                    host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(port) => port,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(TreeptError::Server(format!(
        "No available port on {} starting from {} after {} attempts",
        host, start_port, max_attempts
    )))
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with every route in the table above plus the tracing
/// and CORS middleware.
///
/// ## Arguments
///
/// * `session`: Shared state handed to every handler.
/// * `enable_cors`: Adds a permissive `CorsLayer` when set.
///
/// ## Returns
///
/// * `Router`: Ready to be served, or driven directly with `oneshot` in tests.
pub fn create_app(session: SharedSession, enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        debug!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(page))
        .route("/diagram.svg", get(diagram))
        .route("/api/tree", get(tree))
        .route("/api/nodes/{id}/toggle", post(toggle))
        .route("/api/resize", post(resize))
        .route("/api/pan", post(pan))
        .route("/api/zoom", post(zoom))
        .with_state(session)
        .layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

/// Body of `POST /api/resize`: the new container size.
#[derive(Debug, Deserialize)]
struct ResizeRequest {
    width: f64,
    height: f64,
}

/// Body of `POST /api/pan`: a viewport offset in screen units.
#[derive(Debug, Deserialize)]
struct PanRequest {
    dx: f64,
    dy: f64,
}

/// Body of `POST /api/zoom`: a scale factor and the screen point kept fixed.
#[derive(Debug, Deserialize)]
struct ZoomRequest {
    factor: f64,
    x: f64,
    y: f64,
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, message.to_string()).into_response()
}

/// Serves the interactive page around a fresh snapshot.
async fn page(State(session): State<SharedSession>) -> Response {
    let mut session = session.lock().await;
    match session.page() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render diagram page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render diagram page").into_response()
        }
    }
}

async fn diagram(State(session): State<SharedSession>) -> Response {
    let mut session = session.lock().await;
    svg_response(session.snapshot())
}

async fn tree(State(session): State<SharedSession>) -> Response {
    let session = session.lock().await;
    Json(session.tree()).into_response()
}

/// Expands or collapses a folder. Files and nodes that are not on screen are
/// left alone and the current diagram is returned unchanged; ids the session
/// has never assigned are a `404`.
async fn toggle(State(session): State<SharedSession>, Path(id): Path<NodeId>) -> Response {
    let mut session = session.lock().await;
    match session.toggle(id) {
        Ok(report) => {
            if let Some(report) = report {
                debug!(
                    "Toggled node {}: {} entered, {} updated, {} exited.",
                    id, report.entered, report.updated, report.exited
                );
            }
            svg_response(session.snapshot())
        }
        Err(e @ TreeptError::NodeNotFound { .. }) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Toggle failed for node {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Re-renders from scratch at the requested size.
async fn resize(State(session): State<SharedSession>, Json(request): Json<ResizeRequest>) -> Response {
    let size = Size::new(request.width, request.height);
    if !size.is_drawable() {
        return bad_request("width and height must be finite and positive");
    }
    let mut session = session.lock().await;
    if let Some(report) = session.resize(size) {
        debug!("Resized to {:?}: {} visible nodes.", session.size(), report.visible);
    }
    svg_response(session.snapshot())
}

async fn pan(State(session): State<SharedSession>, Json(request): Json<PanRequest>) -> Response {
    if !(request.dx.is_finite() && request.dy.is_finite()) {
        return bad_request("dx and dy must be finite");
    }
    let mut session = session.lock().await;
    session.pan(request.dx, request.dy);
    svg_response(session.snapshot())
}

async fn zoom(State(session): State<SharedSession>, Json(request): Json<ZoomRequest>) -> Response {
    if !(request.factor.is_finite() && request.factor > 0.0) {
        return bad_request("factor must be positive");
    }
    let mut session = session.lock().await;
    session.zoom(request.factor, Point::new(request.x, request.y));
    debug!("Zoom scale is now {}.", session.scale());
    svg_response(session.snapshot())
}
