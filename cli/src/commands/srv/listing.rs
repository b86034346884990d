//! # fserve Directory Listings
//!
//! File: cli/src/commands/srv/listing.rs
//!
//! ## Overview
//!
//! `ServeDir` answers a directory request with its `index.html`. When there
//! is none, the request falls through to this module, which renders a plain
//! HTML page linking every entry of the directory:
//!
//! ```text
//! <!doctype html>
//! <meta name="viewport" content="width=device-width">
//! <pre>
//! <a href="docs/">docs/</a>
//! <a href="notes%20v2.txt">notes v2.txt</a>
//! </pre>
//! ```
//!
//! Entries are sorted by name and subdirectories carry a trailing `/`. Only
//! request paths ending in `/` are listed (`ServeDir` redirects `/docs` to
//! `/docs/` first); anything else that reaches the fallback is a 404.
//!
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt::Write as _;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A directory entry as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// # Directory Listing (`directory_listing`)
///
/// Answers a request for `request_path` (the URI path, still percent-encoded)
/// that `ServeDir` could not satisfy from files under `root`.
///
/// ## Returns
///
/// * `200` with an HTML listing when the path names a directory under `root`.
/// * `404` when it does not, or when it would leave `root`.
/// * `500` when the directory exists but cannot be read.
pub async fn directory_listing(root: &Path, request_path: &str) -> Response {
    let Some(dir) = listing_target(root, request_path) else {
        return not_found();
    };

    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return not_found(),
    }

    match read_entries(&dir).await {
        Ok(entries) => {
            debug!("Listing {} entries of {}", entries.len(), dir.display());
            Html(render_listing(&entries)).into_response()
        }
        Err(e) => {
            warn!("Failed to read directory {}: {}", dir.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading directory\n").into_response()
        }
    }
}

/// Maps a request path ending in `/` onto a filesystem path under `root`.
/// Returns `None` for paths that are not directory requests, do not decode,
/// or contain any segment other than a plain name.
fn listing_target(root: &Path, request_path: &str) -> Option<PathBuf> {
    if !request_path.ends_with('/') {
        return None;
    }
    let decoded = urlencoding::decode(request_path).ok()?;

    let mut dir = root.to_path_buf();
    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !segment.contains('\\') => dir.push(name),
            _ => return None,
        }
    }
    Some(dir)
}

/// Reads `dir` into name-sorted entries. Symbolic links are listed as what
/// they are, not what they point to.
async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort();
    Ok(entries)
}

/// # Render Listing (`render_listing`)
///
/// The HTML page for `entries`, in the order given.
pub fn render_listing(entries: &[ListingEntry]) -> String {
    let mut html =
        String::from("<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n");

    for entry in entries {
        let slash = if entry.is_dir { "/" } else { "" };
        let _ = writeln!(
            html,
            "<a href=\"{}{}\">{}{}</a>",
            urlencoding::encode(&entry.name),
            slash,
            escape_html(&entry.name),
            slash
        );
    }

    html.push_str("</pre>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

// --- Unit Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;
    use tempfile::TempDir;

    fn entry(name: &str, is_dir: bool) -> ListingEntry {
        ListingEntry {
            name: name.into(),
            is_dir,
        }
    }

    async fn body_string(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_render_listing() {
        let html = render_listing(&[entry("docs", true), entry("a.txt", false)]);
        assert_eq!(
            html,
            "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n\
             <a href=\"docs/\">docs/</a>\n<a href=\"a.txt\">a.txt</a>\n</pre>\n"
        );
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_listing(&[entry("a b&<c>.txt", false), entry("x:y", false)]);
        assert!(html.contains("<a href=\"a%20b%26%3Cc%3E.txt\">a b&amp;&lt;c&gt;.txt</a>"));
        // A colon would otherwise read as a URL scheme.
        assert!(html.contains("<a href=\"x%3Ay\">x:y</a>"));
    }

    #[test]
    fn test_listing_target() {
        let root = Path::new("/srv/www");
        assert_eq!(listing_target(root, "/"), Some(root.to_path_buf()));
        assert_eq!(listing_target(root, "/docs/"), Some(root.join("docs")));
        assert_eq!(listing_target(root, "/my%20files/"), Some(root.join("my files")));
        assert_eq!(listing_target(root, "/docs"), None);
        assert_eq!(listing_target(root, "/../"), None);
        assert_eq!(listing_target(root, "/a/%2e%2e/"), None);
        assert_eq!(listing_target(root, "/./"), None);
        assert_eq!(listing_target(root, "/%ff/"), None);
    }

    #[tokio::test]
    async fn test_directory_listing_sorted() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let res = directory_listing(temp_dir.path(), "/").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let body = body_string(res).await;
        let a = body.find("<a href=\"a.txt\">a.txt</a>").unwrap();
        let b = body.find("<a href=\"b.txt\">b.txt</a>").unwrap();
        let sub = body.find("<a href=\"sub/\">sub/</a>").unwrap();
        assert!(a < b && b < sub, "unexpected order in {}", body);
    }

    #[tokio::test]
    async fn test_directory_listing_not_found() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("file.txt"), "x").unwrap();

        for path in ["/missing/", "/file.txt/", "/missing.txt", "/../"] {
            let res = directory_listing(temp_dir.path(), path).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {}", path);
        }
    }
}
