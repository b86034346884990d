//! # fserve Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command mode:
//! - `args`: Rewrites single-dash long flags (`-ip`, `-dir`) before clap parses them
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::error::{FserveError, Result};
//! ```
//!
pub mod args;
pub mod error;
