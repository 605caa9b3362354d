//! GameHub catalog view model.
//!
//! Holds the loaded game list and decides which games are on screen: a
//! category filter, a text search and pagination, recomputed after every
//! user intent. The crate has no UI of its own; a front end implements
//! [`RenderAdapter`] and feeds intents into [`CatalogStore`].
//!
//! # Pieces
//!
//! - **Filter**: pure `(games, category, query) -> filtered games`
//! - **Pager**: pure page slicing and page-button layout
//! - **Store**: owns the state and drives the render adapter
//! - **Launch**: embed / redirect / routed navigation for a game id
//! - **Source**: one-shot loading of `games.json` from disk or HTTP

pub mod error;
pub mod filter;
pub mod launch;
pub mod pager;
pub mod source;
pub mod store;
pub mod thumbnails;

// Re-export primary types for convenience.
pub use error::{CatalogError, LaunchError};
pub use filter::compute_filtered_games;
pub use launch::{Disposition, GameRouter, resolve_launch, slugify};
pub use pager::{Page, PagerItem, PagerLayout, compute_page};
pub use source::{FileGameSource, GameSource, HttpGameSource, load_games};
pub use store::{CatalogConfig, CatalogStore, LoadState, PageView, RenderAdapter, ViewState};
pub use thumbnails::ThumbnailTracker;

#[cfg(test)]
pub(crate) mod test_support {
    use gamehub_protocol::{Game, LaunchMode};

    /// Builds a plain iframe game.
    pub fn game(id: u64, name: &str, category: Option<&str>) -> Game {
        Game {
            id,
            name: name.into(),
            category: category.map(Into::into),
            thumbnail: String::new(),
            url: format!("/games/{id}/index.html"),
            launch_mode: LaunchMode::Iframe,
            emulator_config: None,
            description: String::new(),
            instructions: String::new(),
        }
    }
}
