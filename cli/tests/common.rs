//! # fserve Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and uses what it needs.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::process::{Child, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// # Get fserve Command (`fserve_cmd`)
///
/// An `assert_cmd::Command` for the `fserve` binary built for this test run.
///
/// ## Panics
/// Panics if the `fserve` binary cannot be found.
pub fn fserve_cmd() -> Command {
    Command::cargo_bin("fserve").expect("Failed to find fserve binary for testing")
}

/// Path of the compiled `fserve` binary, for tests that need a long-running child.
pub fn fserve_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("fserve")
}

/// Picks a loopback port that is free right now.
pub fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("Failed to reserve a local port")
}

/// Waits until something accepts TCP connections on `addr`.
pub fn wait_for_listener(addr: SocketAddr, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    false
}

/// A running `fserve` child process, killed on drop.
pub struct ServerProcess {
    pub child: Child,
    pub addr: SocketAddr,
}

impl ServerProcess {
    /// Starts `fserve -p <free port> -dir <dir>` and waits for it to listen.
    pub fn start(dir: &std::path::Path) -> Self {
        let port = free_port();
        let child = std::process::Command::new(fserve_bin())
            .args(["-p", &port.to_string(), "-dir"])
            .arg(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn fserve");
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        assert!(
            wait_for_listener(addr, Duration::from_secs(10)),
            "fserve did not start listening on {}",
            addr
        );
        Self { child, addr }
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
