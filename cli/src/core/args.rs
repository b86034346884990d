//! # fserve Flag Normalization
//!
//! File: cli/src/core/args.rs
//!
//! ## Overview
//!
//! fserve accepts its long flags with a single leading dash (`-ip`, `-dir`),
//! as well as with the usual two. Clap only understands single-character
//! short flags after one dash, so the raw argument list is rewritten before
//! parsing: a single-dash word whose name is one of the known long flags gets
//! a second dash.
//!
//! ```text
//! fserve -ip 0.0.0.0 -dir=./public -p 8080   ->   fserve --ip 0.0.0.0 --dir=./public -p 8080
//! ```
//!
//! Short flags (`-p`, `-l`, `-v`, `-vv`) and anything after a bare `--` pass
//! through unchanged.
//!
use std::ffi::OsString;

/// Long flag names that may be written with a single leading dash.
const LONG_FLAGS: &[&str] = &["ip", "dir", "port", "list", "verbose", "help", "version"];

/// # Normalize Flags (`normalize_flags`)
///
/// Rewrites single-dash long flags into their double-dash form. The first
/// element (the program name) is never touched, and neither are non-UTF-8
/// arguments.
pub fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        match arg.to_str().and_then(single_dash_long_flag) {
            Some(rewritten) => out.push(rewritten.into()),
            None => out.push(arg),
        }
    }

    out
}

fn single_dash_long_flag(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    LONG_FLAGS.contains(&name).then(|| format!("-{}", arg))
}
