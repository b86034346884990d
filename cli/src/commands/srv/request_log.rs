//! # fserve Request Log Middleware
//!
//! File: cli/src/commands/srv/request_log.rs
//!
//! ## Overview
//!
//! A tower decorator that writes one line per request before handing the
//! request to the wrapped service:
//!
//! ```text
//! Jan  2 15:04:05 - 127.0.0.1:53412 - /docs/index.html?lang=en - http://localhost:9001/
//! ```
//!
//! Fields are separated by ` - `: local timestamp, peer address, raw request
//! target, and the `Referer` header (empty when the header is absent, decoded
//! lossily when it is not UTF-8).
//!
//! The middleware never short-circuits, never modifies the request and never
//! looks at the response. Its `Future` is the inner service's future.
//!
//! ## Output Sink
//!
//! Lines go to any `tracing_subscriber::fmt::MakeWriter`. The default sink is
//! `std::io::stdout`; every line is emitted with a single `write_all` on the
//! `Stdout` handle, which holds the stdout lock for the whole call, so lines
//! from concurrent requests never interleave.
//!
//! ```rust
//! let app = Router::new()
//!     .fallback_service(ServeDir::new(dir))
//!     .layer(RequestLogLayer::stdout());
//! ```
//!
use axum::extract::ConnectInfo;
use axum::http::{header::REFERER, Request};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;

/// `strftime` pattern for the timestamp field, e.g. `Jan  2 15:04:05`.
pub const TIMESTAMP_FORMAT: &str = "%b %e %H:%M:%S";

/// Placeholder for the peer address when the transport attached none.
const UNKNOWN_PEER: &str = "-";

/// # Request Log Layer (`RequestLogLayer`)
///
/// Wraps a service in a [`RequestLog`]. `M` makes the writer each line is
/// written to.
#[derive(Clone, Debug)]
pub struct RequestLogLayer<M = fn() -> io::Stdout> {
    make_writer: M,
}

impl RequestLogLayer {
    /// Logs to the process's standard output.
    pub fn stdout() -> Self {
        Self {
            make_writer: io::stdout,
        }
    }
}

impl<M> RequestLogLayer<M>
where
    M: for<'w> MakeWriter<'w>,
{
    /// Logs to a custom sink.
    pub fn with_writer(make_writer: M) -> Self {
        Self { make_writer }
    }
}

impl<S, M: Clone> Layer<S> for RequestLogLayer<M> {
    type Service = RequestLog<S, M>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLog {
            inner,
            make_writer: self.make_writer.clone(),
        }
    }
}

/// # Request Log Service (`RequestLog`)
///
/// The service produced by [`RequestLogLayer`].
#[derive(Clone, Debug)]
pub struct RequestLog<S, M> {
    inner: S,
    make_writer: M,
}

impl<S, M, B> Service<Request<B>> for RequestLog<S, M>
where
    S: Service<Request<B>>,
    M: for<'w> MakeWriter<'w>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let line = format_request_line(&req, Local::now());
        let mut writer = self.make_writer.make_writer();
        if let Err(e) = writer.write_all(line.as_bytes()) {
            warn!("Failed to write request log line: {}", e);
        }
        drop(writer);

        self.inner.call(req)
    }
}

/// # Format Request Line (`format_request_line`)
///
/// Builds the newline-terminated log line for `req` as of `now`.
///
/// The peer address comes from the `ConnectInfo<SocketAddr>` extension that
/// `into_make_service_with_connect_info` attaches to every request. The
/// request target is printed exactly as it was received (path and query for
/// the usual origin-form requests). The `Referer` value is printed as sent;
/// bytes that are not valid UTF-8 become U+FFFD.
pub fn format_request_line<B>(req: &Request<B>, now: DateTime<Local>) -> String {
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| UNKNOWN_PEER.to_string());

    let referer = req
        .headers()
        .get(REFERER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .unwrap_or_default();

    format!(
        "{} - {} - {} - {}\n",
        now.format(TIMESTAMP_FORMAT),
        remote,
        req.uri(),
        referer
    )
}

// --- Unit Tests ---
