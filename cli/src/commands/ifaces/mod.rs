//! # fserve Interface Listing
//!
//! File: cli/src/commands/ifaces/mod.rs
//!
//! ## Overview
//!
//! The `-l` mode: print every local interface with its addresses and exit
//! without starting a server. The directory and port flags are not
//! validated on this path.
//!
//! A failure to enumerate interfaces is logged and the mode still ends
//! successfully; a failure for a single interface is printed in the listing
//! and the remaining interfaces are still shown.
//!
use crate::common::network::interfaces;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{self, Write};
use tracing::error;

/// # Handle List Interfaces (`handle_list_interfaces`)
///
/// Lists interfaces to standard output.
pub fn handle_list_interfaces() -> Result<()> {
    let stdout = io::stdout();
    list_interfaces(&mut stdout.lock())
}

/// Lists interfaces to `out`. Enumeration errors are logged, not returned;
/// only a failure to write the listing is an error.
fn list_interfaces<W: Write>(out: &mut W) -> Result<()> {
    let reports = match interfaces::collect_interfaces() {
        Ok(reports) => reports,
        Err(e) => {
            error!("{:#}", e);
            return Ok(());
        }
    };

    interfaces::render_interfaces(out, &reports).context("Failed to write interface listing")
}
