/// Location of the catalog file, relative to the site root.
pub const GAMES_JSON_PATH: &str = "assets/JSON/games.json";

/// Number of games on one catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Maximum number of recommendations shown next to an embedded game.
pub const RECOMMENDATION_LIMIT: usize = 6;

/// Maximum number of numbered page buttons in the pager window.
pub const PAGER_WINDOW: usize = 5;

/// Image shown in place of a thumbnail that failed to load.
pub const PLACEHOLDER_THUMBNAIL: &str = "/assets/img/logo.png";

/// Page shell that hosts embedded games.
pub const GAME_SHELL_PATH: &str = "/assets/public/gs/game.html";

/// Default dev server port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;
