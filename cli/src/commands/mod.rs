//! # fserve Command Modes
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! fserve has no subcommands; a flag picks one of two mutually exclusive
//! modes, each implemented in its own module:
//!
//! - `ifaces`: List network interfaces and their addresses (`-l`)
//! - `srv`: Serve a directory over HTTP (default)
//!
//! `main.rs` checks `-l` first, so interface listing never runs the
//! server's startup validation.
//!

/// Interface listing mode (`-l`).
pub mod ifaces;
/// Static file server mode.
pub mod srv;
