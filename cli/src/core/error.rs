//! # fserve Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the fserve binary.
//!
//! ## Architecture
//!
//! The error system consists of two components:
//! - `FserveError`: A `thiserror` enum naming the failures the program reports
//!   on purpose (bad port, missing directory, bind failure, interface enumeration).
//! - `Result<T>`: A type alias for `anyhow::Result<T>`, so any error can carry
//!   extra context on its way up to `main`.
//!
//! Configuration and bind errors are fatal: they propagate to `main`, which
//! prints them and exits with status 1. Interface enumeration errors are
//! reported and swallowed by the listing command.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !(1..=65535).contains(&port) {
//!     return Err(FserveError::InvalidPort(port).into());
//! }
//!
//! // Inspect the cause further up
//! if let Some(FserveError::InvalidPort(p)) = err.downcast_ref::<FserveError>() {
//!     eprintln!("rejected port {}", p);
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the fserve application.
#[derive(Error, Debug)]
pub enum FserveError {
    #[error("invalid port number: {0}")]
    InvalidPort(i64),

    #[error("directory '{}' could not be found or accessed: {source}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate network interfaces: {0}")]
    InterfaceEnumeration(#[source] std::io::Error),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
