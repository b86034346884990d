//! # fserve Static File Server
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! The default mode of fserve: serve a directory over plain HTTP and print
//! one line per request.
//!
//! ## Architecture
//!
//! - `config.rs`: Flags, the path and port checks, the validated `ServerConfig`
//! - `listing.rs`: HTML listings for directories without an `index.html`
//! - `request_log.rs`: The per-request logging middleware
//! - `server_logic.rs`: Handler chain construction and the listener
//!
//! ## Examples
//!
//! ```bash
//! # Serve the current directory on 127.0.0.1:9001
//! fserve
//!
//! # Serve ./public on all interfaces, port 8080
//! fserve -ip 0.0.0.0 -p 8080 -dir ./public
//! ```
//!
//! Startup flow:
//! 1. Resolve the directory, then check the port (either failure is fatal)
//! 2. Print the banner (`http server starting...`, `address:`, `directory:`)
//! 3. Bind and serve until the process is killed
//!
use crate::core::error::Result;
use tracing::info;

pub use config::SrvArgs;

/// Flag definitions and startup validation.
pub mod config;

/// Directory listing fallback.
pub mod listing;

/// Per-request stdout logging middleware.
pub mod request_log;

/// Axum router and listener.
pub mod server_logic;

/// # Handle Serve Mode (`handle_srv`)
///
/// Validates `args` and runs the server. Only returns on error.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling serve mode with args: {:?}", args);

    let config = config::load_config(args).await?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config).await
}
