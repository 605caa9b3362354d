//! Category + search filtering over the loaded catalog.
//!
//! Everything here is pure and cheap enough to run on every keystroke.
//! Results keep the catalog order; nothing is re-sorted.

use gamehub_protocol::{Game, find_category};

/// Returns the games matching `category` and `query`, in catalog order.
///
/// `category` must be one of the configured ids; anything else yields an
/// empty result. An empty `query` matches every game in the category.
pub fn compute_filtered_games<'a>(all: &'a [Game], category: &str, query: &str) -> Vec<&'a Game> {
    filter_indices(all, category, query)
        .into_iter()
        .map(|i| &all[i])
        .collect()
}

/// Same as [`compute_filtered_games`] but returns positions into `all`.
pub fn filter_indices(all: &[Game], category: &str, query: &str) -> Vec<usize> {
    let Some(category) = find_category(category) else {
        return Vec::new();
    };
    let query = query.to_lowercase();

    all.iter()
        .enumerate()
        .filter(|(_, game)| category.is_all() || in_category(game, category.id))
        .filter(|(_, game)| matches_query(game, &query))
        .map(|(i, _)| i)
        .collect()
}

/// Whether `game` belongs to the category `id` (case-insensitive).
/// Uncategorized games never match.
fn in_category(game: &Game, id: &str) -> bool {
    game.category()
        .is_some_and(|c| c.to_lowercase() == id.to_lowercase())
}

/// `query` must already be lowercased.
fn matches_query(game: &Game, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    game.name.to_lowercase().contains(query)
        || game
            .category()
            .is_some_and(|c| c.to_lowercase().contains(query))
}
