pub mod api;
pub mod categories;
pub mod constants;
pub mod types;

// Re-export primary types for convenience.
pub use api::{ApiError, SessionInfo, TokenResponse};
pub use categories::{ALL_CATEGORY_ID, CATEGORIES, Category, find_category};
pub use types::{EmulatorConfig, Game, LaunchMode};
