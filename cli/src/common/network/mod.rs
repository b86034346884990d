//! # fserve Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Network discovery helpers. Currently one submodule:
//!
//! - **`interfaces`**: enumerates local interfaces and their addresses, and
//!   renders them for the `-l` listing.
//!
//! ```rust
//! use crate::common::network::interfaces;
//!
//! let reports = interfaces::collect_interfaces()?;
//! interfaces::render_interfaces(&mut std::io::stdout().lock(), &reports)?;
//! ```
//!

/// Local interface enumeration and rendering.
pub mod interfaces;
