pub mod api;
pub mod models;
pub mod processors;
pub mod schedule;
pub mod season;

pub use api::{FeedSource, HttpFeed};
pub use models::{Game, GameStatus, TeamSnapshot};
pub use schedule::fetch_season_schedule;
pub use season::{current_season, is_in_season};
