//! # fserve Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Root of the shared utility modules. Command modes (`commands::`) pull
//! platform-facing helpers from here rather than talking to the OS directly.
//!
//! - **`network`**: Local interface enumeration.
//!

/// Utilities related to network discovery (interface listing).
pub mod network;
