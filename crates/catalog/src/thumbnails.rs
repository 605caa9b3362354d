use std::collections::HashSet;

use gamehub_protocol::Game;
use gamehub_protocol::constants::PLACEHOLDER_THUMBNAIL;

/// Remembers which thumbnails failed to load so they render as the
/// placeholder. Purely cosmetic; failures are never reported further.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailTracker {
    failed: HashSet<u64>,
}

impl ThumbnailTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the thumbnail of game `id` as failed. Returns `false` if it was
    /// already marked.
    pub fn mark_failed(&mut self, id: u64) -> bool {
        self.failed.insert(id)
    }

    pub fn is_failed(&self, id: u64) -> bool {
        self.failed.contains(&id)
    }

    /// Image source to display for `game`.
    pub fn src_for<'a>(&self, game: &'a Game) -> &'a str {
        if game.thumbnail.is_empty() || self.is_failed(game.id) {
            PLACEHOLDER_THUMBNAIL
        } else {
            &game.thumbnail
        }
    }
}
