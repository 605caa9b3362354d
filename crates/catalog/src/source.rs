//! Where the game list comes from.
//!
//! A [`GameSource`] only fetches raw bytes; [`load_games`] parses and
//! validates them. Sources are used exactly once per session by
//! [`CatalogStore::load`](crate::CatalogStore::load).

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use gamehub_protocol::Game;
use tracing::{debug, info, warn};

use crate::error::CatalogError;

/// A boxed future returned by [`GameSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, CatalogError>> + Send + 'a>>;

/// Abstract origin of the `games.json` document.
pub trait GameSource: Send + Sync {
    /// Fetches the raw JSON document.
    fn fetch(&self) -> FetchFuture<'_>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads the catalog from a file on disk.
#[derive(Debug, Clone)]
pub struct FileGameSource {
    path: PathBuf,
}

impl FileGameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GameSource for FileGameSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move { Ok(tokio::fs::read(&self.path).await?) })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the catalog over HTTP.
///
/// The relative path is tried first from the site root and then relative
/// to the page URL; the first successful response wins.
#[derive(Debug, Clone)]
pub struct HttpGameSource {
    client: reqwest::Client,
    candidates: Vec<reqwest::Url>,
}

impl HttpGameSource {
    /// `page_url` is the URL of the page doing the fetch; `rel_path` is the
    /// catalog path, e.g. `assets/JSON/games.json`.
    pub fn new(
        client: reqwest::Client,
        page_url: &str,
        rel_path: &str,
    ) -> Result<Self, CatalogError> {
        let base = reqwest::Url::parse(page_url)
            .map_err(|e| CatalogError::Http(format!("invalid page URL {page_url}: {e}")))?;
        let clean = rel_path.trim_start_matches('/');

        let mut candidates = Vec::with_capacity(2);
        for target in [format!("/{clean}"), rel_path.to_owned()] {
            let url = base
                .join(&target)
                .map_err(|e| CatalogError::Http(format!("invalid catalog path {target}: {e}")))?;
            if !candidates.contains(&url) {
                candidates.push(url);
            }
        }

        Ok(Self { client, candidates })
    }

    /// URLs tried, in order.
    pub fn candidates(&self) -> &[reqwest::Url] {
        &self.candidates
    }
}

impl GameSource for HttpGameSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            for url in &self.candidates {
                let response = match self.client.get(url.clone()).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        debug!(%url, error = %e, "catalog candidate unreachable");
                        continue;
                    }
                };

                if !response.status().is_success() {
                    debug!(%url, status = %response.status(), "catalog candidate rejected");
                    continue;
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| CatalogError::Http(format!("failed to read {url}: {e}")))?;
                return Ok(bytes.to_vec());
            }

            Err(CatalogError::Http(format!("failed to fetch {}", self.describe())))
        })
    }

    fn describe(&self) -> String {
        self.candidates
            .first()
            .map(|u| u.to_string())
            .unwrap_or_default()
    }
}

/// Fetches and parses the catalog from `source`.
///
/// The document must be a JSON array. Records that fail to parse, have an
/// empty name, or repeat an earlier id are skipped with a warning.
pub async fn load_games(source: &dyn GameSource) -> Result<Vec<Game>, CatalogError> {
    let bytes = source.fetch().await?;
    let games = parse_games(&bytes)?;
    info!(source = %source.describe(), count = games.len(), "catalog loaded");
    Ok(games)
}

/// Parses a `games.json` document, dropping invalid records.
pub fn parse_games(bytes: &[u8]) -> Result<Vec<Game>, CatalogError> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut seen = HashSet::with_capacity(raw.len());
    let mut games = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        let game: Game = match serde_json::from_value(value) {
            Ok(g) => g,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed game record");
                continue;
            }
        };

        if game.name.trim().is_empty() {
            warn!(index, id = game.id, "skipping game with empty name");
            continue;
        }

        if !seen.insert(game.id) {
            warn!(index, id = game.id, name = %game.name, "skipping duplicate game id");
            continue;
        }

        games.push(game);
    }

    Ok(games)
}
