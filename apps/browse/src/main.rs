//! Terminal front end for the GameHub catalog.
//!
//! Usage: `gamehub-browse [games.json | http://site/]`
//!
//! Reads commands from stdin (`help` lists them). `GAMEHUB_MESSAGE` and
//! `GAMEHUB_MESSAGE_TYPE` show a site banner.

mod commands;
mod render;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use gamehub_catalog::{CatalogConfig, CatalogStore, FileGameSource, GameSource, HttpGameSource};
use gamehub_protocol::constants::GAMES_JSON_PATH;

use crate::commands::{Command, Flow};
use crate::render::TextRenderer;

fn main() -> anyhow::Result<()> {
    // stdout belongs to the catalog view.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| GAMES_JSON_PATH.to_owned());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(location))
}

fn source_for(location: &str) -> anyhow::Result<Box<dyn GameSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Box::new(HttpGameSource::new(
            client,
            location,
            GAMES_JSON_PATH,
        )?))
    } else {
        Ok(Box::new(FileGameSource::new(location)))
    }
}

async fn run(location: String) -> anyhow::Result<()> {
    let mut store = CatalogStore::new(
        CatalogConfig::default(),
        TextRenderer::new(std::io::stdout()),
    );

    if let Ok(message) = std::env::var("GAMEHUB_MESSAGE") {
        let kind = std::env::var("GAMEHUB_MESSAGE_TYPE").unwrap_or_else(|_| "info".into());
        store
            .notices_mut()
            .register_site_notification_str(message, &kind);
        if let Some(banner) = store.notices().banner().cloned() {
            store.renderer_mut().render_banner(&banner);
        }
    }

    let source = source_for(&location)?;
    tracing::info!(source = %source.describe(), "loading catalog");
    if let Err(e) = store.load(source.as_ref()).await {
        // The notice is already on screen; keep going so the user can quit.
        tracing::error!("catalog load failed: {e}");
    } else {
        println!("{} games loaded. Type `help` for commands.", store.games().len());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command.apply(&mut store) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => println!("{e}"),
        }
    }

    tracing::debug!("input closed");
    Ok(())
}
