//! Team Result Tracker Library
//!
//! Keeps a per-sport view of a team's most recent completed game and its
//! next (or live) game, synchronized from a sports schedule feed, and
//! projects that view into a small status payload.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use win_tracker::config::Config;
//! use win_tracker::data_fetcher::HttpFeed;
//! use win_tracker::engine::{GameStateStore, sync_sport};
//! use win_tracker::error::AppError;
//! use win_tracker::status::query_status;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     let feed = HttpFeed::from_config(&config)?;
//!     let store = GameStateStore::from_config(&config);
//!
//!     for sport in &config.sports {
//!         sync_sport(&feed, &store, sport, Utc::now()).await;
//!     }
//!
//!     let status = query_status(&store, &config, "basketball")?;
//!     println!("{}", serde_json::to_string_pretty(&status)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod engine;
pub mod error;
pub mod server;
pub mod status;

#[cfg(test)]
pub(crate) mod testing_utils;

// Re-export commonly used types for convenience
pub use config::{Config, SportConfig};
pub use data_fetcher::{FeedSource, Game, GameStatus, HttpFeed, TeamSnapshot};
pub use engine::{GameStateStore, SportState};
pub use error::AppError;
pub use status::{ScoreLink, StatusPayload, project_status, query_status};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
