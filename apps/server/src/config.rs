//! Server configuration from the environment.
//!
//! - `PORT`: listen port, default 8080
//! - `GAMEHUB_MOCK_API`: `0`/`false`/`off` disables `/api/*`
//!
//! The site root is always the current directory.

use std::path::PathBuf;

use anyhow::Context;
use gamehub_dev_server::ServerConfig;
use gamehub_protocol::constants::DEFAULT_PORT;

/// Builds the server config from the process environment.
pub fn from_env() -> anyhow::Result<ServerConfig> {
    let root = std::env::current_dir().context("cannot determine current directory")?;
    from_lookup(root, |key| std::env::var(key).ok())
}

/// Builds the server config from an arbitrary variable lookup.
pub fn from_lookup(
    root: PathBuf,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ServerConfig> {
    let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid PORT {raw:?}"))?,
        None => DEFAULT_PORT,
    };

    let mock_api = lookup("GAMEHUB_MOCK_API")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"))
        .unwrap_or(true);

    Ok(ServerConfig {
        port,
        root,
        mock_api,
    })
}
