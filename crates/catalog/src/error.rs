//! Error types for catalog loading and game launches.

/// Errors produced while loading the catalog or handling intents.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("catalog not loaded")]
    NotLoaded,

    #[error("catalog already loaded")]
    AlreadyLoaded,
}

/// Errors produced while resolving a game launch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("game not found: #{0}")]
    GameNotFound(u64),

    #[error("no game with slug {0:?}")]
    UnknownSlug(String),

    #[error("catalog not loaded")]
    NotLoaded,
}
