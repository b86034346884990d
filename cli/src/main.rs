//! # fserve Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the fserve static file server. It:
//! - Normalizes single-dash long flags (`-ip`, `-dir`) and parses them with Clap
//! - Sets up diagnostic logging (stderr) based on `-v` and `RUST_LOG`
//! - Runs either the interface listing (`-l`) or the file server
//!
//! ## Examples
//!
//! ```bash
//! fserve -ip 0.0.0.0 -p 8080 -dir ./public
//! fserve -l
//! ```
//!
//! Errors from either mode are logged, printed as `Error: ...` on stderr, and
//! end the process with exit status 1.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command modes (srv, ifaces)
mod common; // Shared utilities (network)
mod core; // Core infrastructure (args, error)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "fserve",
    about = "Serve a directory over HTTP, logging each request to stdout",
    version
)]
struct Cli {
    #[command(flatten)]
    serve: commands::srv::SrvArgs,

    /// List network interfaces and their IP addresses, then exit.
    #[arg(short = 'l', long = "list")]
    list_interfaces: bool,

    /// Increase diagnostic log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(crate::core::args::normalize_flags(std::env::args_os()));

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = if cli.list_interfaces {
        commands::ifaces::handle_list_interfaces()
    } else {
        commands::srv::handle_srv(cli.serve).await
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
