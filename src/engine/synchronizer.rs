//! Schedule synchronization: recompute a sport's last and next game.

use chrono::{DateTime, Local, Utc};
use tracing::{debug, error, info, instrument, warn};

use super::store::{GameStateStore, SportState, StatePatch};
use crate::config::SportConfig;
use crate::data_fetcher::api::FeedSource;
use crate::data_fetcher::models::{Game, GameStatus};
use crate::data_fetcher::schedule::fetch_season_schedule;
use crate::data_fetcher::season::{current_season, is_in_season};

/// Result of one synchronization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The pass completed; carries the state it left behind
    Synced(SportState),
    /// The feed could not be read; cached state was left as it was
    Failed { reason: String },
    UnknownSport,
}

/// The latest game that is final and started strictly before `now`.
/// `games` must be sorted ascending by start.
pub fn select_last_game(games: &[Game], now: DateTime<Utc>) -> Option<&Game> {
    games
        .iter()
        .rev()
        .find(|game| game.status == GameStatus::Final && game.start < now)
}

/// A game in progress if there is one, otherwise the earliest game that is
/// not final and starts strictly after `now`. `games` must be sorted
/// ascending by start.
pub fn select_next_game(games: &[Game], now: DateTime<Utc>) -> Option<&Game> {
    games
        .iter()
        .find(|game| game.status == GameStatus::InProgress)
        .or_else(|| {
            games
                .iter()
                .find(|game| game.status != GameStatus::Final && game.start > now)
        })
}

/// Runs one synchronization pass for `sport` as of `now`.
///
/// Off season, an empty or unreachable current season falls back to the
/// previous season's schedule, and no next game is searched for. The pass
/// fails, leaving the cache untouched, only when its working schedule could
/// not be read at all. When the working schedule has no completed game, the
/// previous season is searched for one; if none is found the cached last
/// game stays as it was. While the monitor is active
/// the watched next game is left alone.
#[instrument(skip(feed, store, sport), fields(sport = %sport.key))]
pub async fn sync_sport<F: FeedSource>(
    feed: &F,
    store: &GameStateStore,
    sport: &SportConfig,
    now: DateTime<Utc>,
) -> SyncOutcome {
    let Some(writer) = store.lock(&sport.key).await else {
        warn!("Sync requested for unknown sport {}", sport.key);
        return SyncOutcome::UnknownSport;
    };

    let today = now.with_timezone(&Local).date_naive();
    let in_season = is_in_season(today, sport);
    let season = current_season(today, sport);
    info!(
        "Syncing {} schedule: season {}, in season: {}",
        sport.key, season, in_season
    );

    let mut games = match fetch_season_schedule(feed, sport, season).await {
        Ok(games) => games,
        Err(e) if !in_season => {
            warn!(
                "{} season {} unavailable off season, treating as empty: {}",
                sport.key, season, e
            );
            Vec::new()
        }
        Err(e) => {
            error!("Sync of {} failed, keeping cached state: {}", sport.key, e);
            return SyncOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let mut fetched_prior = false;
    if !in_season && games.is_empty() {
        info!("No games for {} season {}, trying {}", sport.key, season, season - 1);
        match fetch_season_schedule(feed, sport, season - 1).await {
            Ok(prior) => games = prior,
            Err(e) => {
                error!("Sync of {} failed, keeping cached state: {}", sport.key, e);
                return SyncOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        }
        fetched_prior = true;
    }

    let mut last_game = select_last_game(&games, now).cloned();
    if last_game.is_none() && !fetched_prior {
        debug!(
            "No completed {} games in season {}, searching season {}",
            sport.key,
            season,
            season - 1
        );
        match fetch_season_schedule(feed, sport, season - 1).await {
            Ok(prior) => last_game = select_last_game(&prior, now).cloned(),
            Err(e) => warn!("Previous season lookup for {} failed: {}", sport.key, e),
        }
    }

    let next_game = if in_season {
        select_next_game(&games, now).cloned()
    } else {
        None
    };

    let current = writer.snapshot();
    let next_game_patch = if current.monitoring {
        debug!("Monitor active for {}, keeping watched game", sport.key);
        None
    } else {
        Some(next_game)
    };

    match &last_game {
        Some(game) => info!("Last {} game: {} on {}", sport.key, game.id, game.date),
        None => info!("No completed {} game found, last game unchanged", sport.key),
    }
    if let Some(Some(game)) = &next_game_patch {
        info!("Next {} game: {} at {}", sport.key, game.id, game.start);
    }

    let state = writer.apply(StatePatch {
        last_game,
        next_game: next_game_patch,
        monitoring: None,
        last_refreshed_at: Some(now),
    });

    SyncOutcome::Synced(state)
}
