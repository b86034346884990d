//! # fserve Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! This module turns the raw command-line settings into a validated
//! `ServerConfig`. It owns the two startup checks:
//! 1. The directory to serve must resolve to an absolute path that exists.
//! 2. The port must lie within the TCP port range `1..=65535`.
//!
//! Either failure aborts startup. The checks run in that order, so a missing
//! directory is reported even when the port is also bad.
//!
//! ## Examples
//!
//! ```rust
//! let config = load_config(args).await?;
//! println!("address: {}", config.bind_address());
//! println!("directory: {}", config.directory.display());
//! ```
//!
//! There is no configuration file and no environment lookup: the command
//! line is the only source of settings.
//!
use crate::core::error::{FserveError, Result};
use anyhow::Context;
use clap::Args;
use std::env;
use std::net::Ipv6Addr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default bind address (loopback only).
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: i64 = 9001;

/// # Server Arguments (`SrvArgs`)
///
/// The serving-related flags, flattened into the top-level CLI. The port is
/// kept as a wide signed integer so that out-of-range input reaches
/// `validate_port` instead of failing inside clap.
#[derive(Args, Debug, Clone)]
pub struct SrvArgs {
    /// Network address to listen on. "0.0.0.0" is all addresses.
    #[arg(long = "ip", value_name = "ADDR", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Network port to listen on (1-65535).
    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        default_value_t = DEFAULT_PORT,
        allow_negative_numbers = true
    )]
    pub port: i64,

    /// Path to the directory to serve.
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,
}

impl Default for SrvArgs {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            directory: PathBuf::from("."),
        }
    }
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// Settings after validation. The listener is only ever started from this
/// type, so holding one means both startup checks have passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address as given on the command line (IP literal or host name).
    pub host: String,

    /// Validated TCP port.
    pub port: u16,

    /// Absolute, canonical path of the directory being served.
    pub directory: PathBuf,
}

impl ServerConfig {
    /// # Bind Address (`bind_address`)
    ///
    /// The `host:port` string shown in the startup banner. IPv6 literals are
    /// bracketed (`[::1]:9001`).
    pub fn bind_address(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// # Load Server Configuration (`load_config`)
///
/// Runs the path check, then the port check, and assembles the validated
/// `ServerConfig`.
///
/// ## Arguments
///
/// * `args`: The serving flags as parsed from the command line.
///
/// ## Returns
///
/// * `Result<ServerConfig>`: The host as given, the port as a `u16` and the
///   canonical absolute directory.
///
/// ## Errors
///
/// - `FserveError::DirectoryNotFound` if the directory cannot be resolved.
/// - `FserveError::InvalidPort` if the port is outside `1..=65535`.
pub async fn load_config(args: SrvArgs) -> Result<ServerConfig> {
    let directory = resolve_directory(&args.directory).await?;
    let port = validate_port(args.port)?;

    Ok(ServerConfig {
        host: args.host,
        port,
        directory,
    })
}

/// # Validate Port (`validate_port`)
///
/// Succeeds iff `1 <= port <= 65535`, returning the port as a `u16`.
pub fn validate_port(port: i64) -> Result<u16> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(FserveError::InvalidPort(port).into()),
    }
}

/// # Resolve Directory (`resolve_directory`)
///
/// Makes `dir` absolute (relative paths are joined onto the current working
/// directory) and canonicalizes it, which resolves `.`/`..` and symlinks and
/// fails if nothing exists at the path.
///
/// Only existence is checked. A path that exists but is not a directory is
/// accepted with a warning, since every request against it will come back
/// not-found.
///
/// ## Errors
///
/// - The current working directory cannot be determined.
/// - `FserveError::DirectoryNotFound` if canonicalization fails.
pub async fn resolve_directory(dir: &Path) -> Result<PathBuf> {
    let absolute_path = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir)
    };

    let canonical_path = tokio::fs::canonicalize(&absolute_path)
        .await
        .map_err(|source| FserveError::DirectoryNotFound {
            path: absolute_path.clone(),
            source,
        })?;

    let is_dir = tokio::fs::metadata(&canonical_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        warn!(
            "Serving path {} is not a directory; requests will not find any files",
            canonical_path.display()
        );
    }

    debug!("Resolved serving directory to: {}", canonical_path.display());
    Ok(canonical_path)
}

// --- Unit Tests ---
