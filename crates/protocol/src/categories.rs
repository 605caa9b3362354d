//! Static category table shown as category cards.
//!
//! Categories are configuration, not derived from the loaded games. The
//! synthetic [`ALL_CATEGORY_ID`] entry matches every game.

use serde::Serialize;

/// Id of the synthetic category that matches every game.
pub const ALL_CATEGORY_ID: &str = "all";

/// A category card entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
}

impl Category {
    const fn new(id: &'static str, display_name: &'static str, icon: &'static str) -> Self {
        Self {
            id,
            display_name,
            icon,
        }
    }

    /// Whether this is the synthetic `all` category.
    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORY_ID
    }
}

/// Every configured category, in display order. `all` comes first.
pub const CATEGORIES: &[Category] = &[
    Category::new(ALL_CATEGORY_ID, "All", "🎮"),
    Category::new("shooter", "Shooter", "🔫"),
    Category::new("racing", "Racing", "🏎️"),
    Category::new("puzzle", "Puzzle", "🧩"),
    Category::new("adventure", "Adventure", "🗺️"),
    Category::new("action", "Action", "⚡"),
    Category::new("sports", "Sports", "⚽"),
    Category::new("strategy", "Strategy", "🎯"),
    Category::new("escape", "Escape", "🚪"),
    Category::new("retro", "Retro", "👾"),
    Category::new("educational", "Educational", "📚"),
    Category::new("platformer", "Platformer", "🏃"),
    Category::new("casual", "Casual", "☕"),
    Category::new("simulation", "Simulation", "🎮"),
    Category::new("runner", "Runner", "🏃‍♂️"),
    Category::new("horror", "Horror", "👻"),
    Category::new("building", "Building", "🏗️"),
];

/// Looks up a configured category by id (case-insensitive).
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
