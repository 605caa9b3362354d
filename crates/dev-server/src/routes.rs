//! Request path → what to serve.

use std::path::{Path, PathBuf};

/// Prefixes the front-end router owns; always answered with the shell.
const SPA_PREFIXES: [&str; 2] = ["/game/", "/category/"];

/// What a request path maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Mock API endpoint; holds the path below `/api`.
    Api(String),
    /// The SPA shell (`index.html`).
    Shell,
    /// A file relative to the site root.
    File(PathBuf),
    /// Nothing servable (e.g. a `..` segment).
    NotFound,
}

/// Maps a decoded request path to a route.
///
/// Extension-less paths outside `/assets` go to the shell so the front
/// end's router can interpret them. `..` segments are never served.
pub fn route(path: &str, mock_api: bool) -> Route {
    if mock_api {
        if path == "/api" {
            return Route::Api(String::new());
        }
        if let Some(rest) = path.strip_prefix("/api/") {
            return Route::Api(rest.to_owned());
        }
    }

    if path == "/"
        || path == "/index.html"
        || SPA_PREFIXES.iter().any(|p| path.starts_with(p))
        || (!path.contains('.') && !path.starts_with("/assets"))
    {
        return Route::Shell;
    }

    let mut relative = PathBuf::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment == ".." || segment.contains('\\') {
            return Route::NotFound;
        }
        if segment != "." {
            relative.push(segment);
        }
    }

    if relative.as_os_str().is_empty() {
        Route::NotFound
    } else {
        Route::File(relative)
    }
}

/// MIME type from a file extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("wasm") => "application/wasm",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
