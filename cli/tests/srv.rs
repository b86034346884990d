//! # fserve Serve Mode Integration Tests
//!
//! File: cli/tests/srv.rs
//!
//! ## Overview
//!
//! Starts the real binary on a free loopback port, talks plain HTTP/1.1 to it
//! over a TCP socket, then kills it (the server has no graceful shutdown).
//!

mod common;
use common::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use tempfile::tempdir;

fn http_get(addr: SocketAddr, target: &str, referer: Option<&str>) -> String {
    let mut stream = TcpStream::connect(addr).expect("Failed to connect to fserve");
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .unwrap();

    let mut request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n", target);
    if let Some(referer) = referer {
        request.push_str(&format!("Referer: {}\r\n", referer));
    }
    request.push_str("\r\n");
    stream.write_all(request.as_bytes()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn test_srv_serves_index_and_404() {
    let site = tempdir().expect("Failed to create temp dir for serving");
    std::fs::write(site.path().join("index.html"), "<h1>it works</h1>").unwrap();

    let server = ServerProcess::start(site.path());

    let index = http_get(server.addr, "/", None);
    assert!(index.starts_with("HTTP/1.1 200 OK"), "got: {}", index);
    assert!(index.ends_with("<h1>it works</h1>"));

    let missing = http_get(server.addr, "/missing.txt", None);
    assert!(missing.starts_with("HTTP/1.1 404"), "got: {}", missing);
}

#[test]
fn test_srv_prints_banner_and_request_lines() {
    let site = tempdir().expect("Failed to create temp dir for serving");
    std::fs::write(site.path().join("index.html"), "hello").unwrap();
    let canonical = std::fs::canonicalize(site.path()).unwrap();

    let mut server = ServerProcess::start(site.path());
    http_get(server.addr, "/foo?bar=1", Some("http://x"));
    http_get(server.addr, "/", None);

    let stdout = server.child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines().map(|l| l.unwrap());

    assert_eq!(lines.next().unwrap(), "http server starting...");
    assert_eq!(
        lines.next().unwrap(),
        format!("address: 127.0.0.1:{}", server.addr.port())
    );
    assert_eq!(
        lines.next().unwrap(),
        format!("directory: {}", canonical.display())
    );

    let first = lines.next().unwrap();
    assert!(first.ends_with(" - /foo?bar=1 - http://x"), "got: {}", first);
    assert!(first.contains(" - 127.0.0.1:"));

    let second = lines.next().unwrap();
    assert!(second.ends_with(" - / - "), "got: {:?}", second);
}

#[test]
fn test_srv_lists_directory_without_index() {
    let site = tempdir().expect("Failed to create temp dir for serving");
    std::fs::write(site.path().join("notes.txt"), "n").unwrap();
    std::fs::create_dir(site.path().join("img")).unwrap();

    let server = ServerProcess::start(site.path());

    let listing = http_get(server.addr, "/", None);
    assert!(listing.starts_with("HTTP/1.1 200 OK"), "got: {}", listing);
    assert!(listing.contains("<a href=\"img/\">img/</a>"));
    assert!(listing.contains("<a href=\"notes.txt\">notes.txt</a>"));
}
