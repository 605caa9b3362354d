//! Local development server for the GameHub site.
//!
//! Serves the site root as static files. Paths the front-end router owns
//! (`/game/*`, `/category/*`, anything without an extension outside
//! `/assets`) get the `index.html` shell; unknown files get `404.html`.
//! An optional mock API answers `/api/*` with canned data.

mod http;
mod mock_api;
mod routes;
mod server;

use std::time::Duration;

pub use http::{Method, Request, Response};
pub use mock_api::{MockApi, sample_games};
pub use routes::{Route, content_type_for, route};
pub use server::{DevServer, ServerConfig};

/// Largest request head accepted before the request is rejected.
pub const MAX_REQUEST_HEAD: usize = 16 * 1024;

/// How long a client may take to send its request head.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors produced by the dev server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("timed out waiting for request")]
    Timeout,
}
