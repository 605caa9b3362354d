//! Launch resolution: what happens when the user opens a game.

use gamehub_protocol::constants::RECOMMENDATION_LIMIT;
use gamehub_protocol::{Game, LaunchMode};

use crate::error::LaunchError;

/// Front-end router that can show a game page by slug.
///
/// When one is registered it takes precedence over every other launch
/// disposition.
pub trait GameRouter: Send + Sync {
    fn navigate_to_game(&self, slug: &str);
}

/// The resolved action for a launch.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition<'a> {
    /// Hand off to the registered router.
    RoutedNavigate { slug: String },
    /// Navigate the whole page to the game's own URL.
    Redirect { url: &'a str },
    /// Open inside the in-page frame with a recommendation strip.
    Embed {
        game: &'a Game,
        recommendations: Vec<&'a Game>,
    },
}

/// Decides how game `id` should be opened.
///
/// Precedence: router (if any), then `use: "redirect"`, then embed.
/// Emulator and unknown modes embed like `iframe`.
pub fn resolve_launch<'a>(
    games: &'a [Game],
    id: u64,
    router: Option<&dyn GameRouter>,
) -> Result<Disposition<'a>, LaunchError> {
    let game = games
        .iter()
        .find(|g| g.id == id)
        .ok_or(LaunchError::GameNotFound(id))?;

    if router.is_some() {
        return Ok(Disposition::RoutedNavigate {
            slug: slugify(&game.name),
        });
    }

    if game.launch_mode == LaunchMode::Redirect {
        return Ok(Disposition::Redirect { url: &game.url });
    }

    Ok(Disposition::Embed {
        game,
        recommendations: recommendations(games, id),
    })
}

/// The first [`RECOMMENDATION_LIMIT`] games in catalog order, skipping `id`.
pub fn recommendations(games: &[Game], id: u64) -> Vec<&Game> {
    games
        .iter()
        .filter(|g| g.id != id)
        .take(RECOMMENDATION_LIMIT)
        .collect()
}

/// URL slug for a game name: lowercase alphanumerics joined by single
/// dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Finds the game a router slug refers to. The first match in catalog
/// order wins when two names share a slug.
pub fn find_by_slug<'a>(games: &'a [Game], slug: &str) -> Result<&'a Game, LaunchError> {
    games
        .iter()
        .find(|g| slugify(&g.name) == slug)
        .ok_or_else(|| LaunchError::UnknownSlug(slug.to_owned()))
}
