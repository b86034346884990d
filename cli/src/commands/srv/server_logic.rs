//! # fserve HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Builds the handler chain and runs the listener:
//! - `ServeDir` maps request paths under `/` to files under the served
//!   directory (index files, conditional and range requests are all
//!   `ServeDir`'s own behavior)
//! - `listing::directory_listing` answers what `ServeDir` cannot: it lists
//!   directories without an `index.html` and returns 404 for the rest
//! - `RequestLogLayer` prints one stdout line per request in front of it
//! - `TraceLayer` adds debug-level spans for diagnostics
//!
//! The server runs until the process is killed. There is no graceful
//! shutdown and no timeout.
//!
//! ## Examples
//!
//! ```rust
//! let config = config::load_config(args).await?;
//! server_logic::run_server(config).await?;
//! ```
//!
use super::config::ServerConfig;
use super::listing;
use super::request_log::RequestLogLayer;
use crate::core::error::{FserveError, Result};
use anyhow::Context;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::{service_fn, ServiceBuilder};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::fmt::MakeWriter;

/// # Run HTTP Server (`run_server`)
///
/// Prints the startup banner, binds `host:port` and serves the configured
/// directory forever.
///
/// ## Arguments
///
/// * `config`: The validated server configuration from `config::load_config`.
///
/// ## Returns
///
/// * `Result<()>`: Only returns on failure; a running server never completes.
///
/// ## Errors
///
/// - `FserveError::Bind` if the listener cannot be bound (port in use,
///   permission denied, unresolvable host).
/// - Any I/O error surfaced by the serve loop itself.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = config.bind_address();

    println!("http server starting...");
    println!("address: {}", addr);
    println!("directory: {}", config.directory.display());

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| FserveError::Bind {
            addr: addr.clone(),
            source,
        })?;

    serve(listener, create_app(&config)).await
}

/// # Serve On Listener (`serve`)
///
/// Runs `app` on an already bound listener, attaching each connection's peer
/// address so the request log can print it.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    if let Ok(local) = listener.local_addr() {
        info!("Listening on {}", local);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}

/// # Create Axum Application (`create_app`)
///
/// The file server for `config.directory`, logging each request to stdout.
pub fn create_app(config: &ServerConfig) -> Router {
    create_app_with_log(config, RequestLogLayer::stdout())
}

/// # Create Axum Application With Log Sink (`create_app_with_log`)
///
/// Same as [`create_app`] with a caller-chosen request log layer.
pub fn create_app_with_log<M>(config: &ServerConfig, request_log: RequestLogLayer<M>) -> Router
where
    M: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let root = Arc::new(config.directory.clone());
    let listing = service_fn(move |req: Request<Body>| {
        let root = Arc::clone(&root);
        let path = req.uri().path().to_owned();
        async move { Ok::<_, Infallible>(listing::directory_listing(&root, &path).await) }
    });

    Router::new()
        .fallback_service(ServeDir::new(&config.directory).fallback(listing))
        .layer(
            ServiceBuilder::new()
                .layer(request_log) // Outermost: log before anything else runs.
                .layer(trace_layer),
        )
}

// --- Unit Tests ---
