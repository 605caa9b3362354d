//! Canned API endpoints for front-end development.
//!
//! | Endpoint                         | Response                         |
//! |----------------------------------|----------------------------------|
//! | `GET /api/games`                 | the whole list                   |
//! | `GET /api/games/{id}`            | one game, or 404                 |
//! | `GET /api/games/{id}/recommended`| first six games other than `id`  |
//! | `GET /api/token`                 | fresh `{id, token}` pair         |
//! | `GET /api/me`                    | anonymous session                |

use std::path::Path;

use gamehub_catalog::launch::recommendations;
use gamehub_catalog::source::parse_games;
use gamehub_protocol::constants::GAMES_JSON_PATH;
use gamehub_protocol::{ApiError, Game, LaunchMode, SessionInfo, TokenResponse};
use tracing::{info, warn};

use crate::ServerError;
use crate::http::Response;

/// Serves canned data from a fixed game list.
#[derive(Debug, Clone)]
pub struct MockApi {
    games: Vec<Game>,
}

impl MockApi {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// Uses the site's own `games.json` when it exists and parses, and the
    /// built-in sample list otherwise.
    pub fn from_root(root: &Path) -> Self {
        let path = root.join(GAMES_JSON_PATH);
        let games = match std::fs::read(&path) {
            Ok(bytes) => match parse_games(&bytes) {
                Ok(games) => {
                    info!(path = %path.display(), count = games.len(), "mock API using site catalog");
                    games
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable catalog, using sample games");
                    sample_games()
                }
            },
            Err(_) => sample_games(),
        };
        Self::new(games)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Answers a request for `endpoint` (the path below `/api/`).
    pub fn handle(&self, endpoint: &str) -> Result<Response, ServerError> {
        let segments: Vec<&str> = endpoint.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["games"] => Response::json(200, &self.games),
            ["games", id] => match parse_id(id) {
                Some(id) => match self.games.iter().find(|g| g.id == id) {
                    Some(game) => Response::json(200, game),
                    None => Response::json(404, &ApiError::new("game not found")),
                },
                None => Response::json(400, &ApiError::new("invalid game id")),
            },
            ["games", id, "recommended"] => match parse_id(id) {
                Some(id) => Response::json(200, &recommendations(&self.games, id)),
                None => Response::json(400, &ApiError::new("invalid game id")),
            },
            ["token"] => Response::json(
                200,
                &TokenResponse {
                    id: uuid::Uuid::new_v4().to_string(),
                    token: uuid::Uuid::new_v4().simple().to_string(),
                },
            ),
            ["me"] => Response::json(200, &SessionInfo::anonymous()),
            _ => Response::json(404, &ApiError::new("unknown endpoint")),
        }
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

/// Small built-in catalog for sites without a `games.json`.
pub fn sample_games() -> Vec<Game> {
    let game = |id: u64, name: &str, category: &str, launch_mode: LaunchMode, url: &str| Game {
        id,
        name: name.into(),
        category: Some(category.into()),
        thumbnail: format!("/assets/img/games/{id}.png"),
        url: url.into(),
        launch_mode,
        emulator_config: None,
        description: String::new(),
        instructions: String::new(),
    };

    vec![
        game(1, "Space Blaster", "action", LaunchMode::Iframe, "/games/space-blaster/"),
        game(2, "Retro Racer", "racing", LaunchMode::Iframe, "/games/retro-racer/"),
        game(3, "Block Drop", "puzzle", LaunchMode::Iframe, "/games/block-drop/"),
        game(4, "Escape the Lab", "escape", LaunchMode::Redirect, "/demo-gd-embed.html"),
    ]
}
