//! Live result monitoring.
//!
//! A sport moves through these phases:
//!
//! - `Idle`: no next game is known
//! - `Armed`: the next game starts in the future
//! - `Due`: the next game's start has passed but the monitor has not started
//! - `Active`: the game's detail is refreshed on every monitor tick until
//!   the feed reports it final
//!
//! `Due -> Active` happens in [`probe`]. The only way back to `Idle` is a
//! refresh that sees the game final.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use super::store::{GameStateStore, SportState, SportWriter, StatePatch};
use crate::config::SportConfig;
use crate::data_fetcher::api::FeedSource;
use crate::data_fetcher::models::Game;
use crate::data_fetcher::processors::parse_game_detail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle,
    Armed,
    Due,
    Active,
}

/// Phase of a sport's monitor as implied by its cached state at `now`.
pub fn monitor_phase(state: &SportState, now: DateTime<Utc>) -> MonitorPhase {
    match (&state.next_game, state.monitoring) {
        (_, true) => MonitorPhase::Active,
        (None, false) => MonitorPhase::Idle,
        (Some(game), false) if now >= game.start => MonitorPhase::Due,
        (Some(_), false) => MonitorPhase::Armed,
    }
}

/// True when monitoring should start for this state at `now`.
pub fn should_start_monitoring(state: &SportState, now: DateTime<Utc>) -> bool {
    monitor_phase(state, now) == MonitorPhase::Due
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing is being watched
    NotMonitoring,
    /// Game still running; carries the updated snapshot
    StillLive(Game),
    /// Game ended and moved to `last_game`; a schedule sync should follow
    Finished(Game),
    /// Detail could not be fetched or parsed; state untouched, retry next tick
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    NoGame,
    /// Next game has not started yet
    NotYet { starts_at: DateTime<Utc> },
    AlreadyActive,
    /// Monitoring started and one refresh ran immediately
    Started(RefreshOutcome),
}

/// The coarse "should monitoring start?" check. Cheap unless it starts the
/// monitor, in which case it performs one immediate refresh.
#[instrument(skip(feed, store, sport), fields(sport = %sport.key))]
pub async fn probe<F: FeedSource>(
    feed: &F,
    store: &GameStateStore,
    sport: &SportConfig,
    now: DateTime<Utc>,
) -> ProbeOutcome {
    let Some(writer) = store.lock(&sport.key).await else {
        return ProbeOutcome::NoGame;
    };
    let state = writer.snapshot();

    match monitor_phase(&state, now) {
        MonitorPhase::Idle => ProbeOutcome::NoGame,
        MonitorPhase::Active => ProbeOutcome::AlreadyActive,
        MonitorPhase::Armed => {
            let starts_at = state.next_game.as_ref().map(|g| g.start).unwrap_or(now);
            debug!("Next {} game starts at {}", sport.key, starts_at);
            ProbeOutcome::NotYet { starts_at }
        }
        MonitorPhase::Due => {
            info!("Starting {} game monitoring", sport.key);
            writer.apply(StatePatch {
                monitoring: Some(true),
                ..Default::default()
            });
            ProbeOutcome::Started(refresh_locked(feed, &writer, sport).await)
        }
    }
}

/// One monitor tick: refresh the watched game's live detail.
#[instrument(skip(feed, store, sport), fields(sport = %sport.key))]
pub async fn refresh<F: FeedSource>(
    feed: &F,
    store: &GameStateStore,
    sport: &SportConfig,
) -> RefreshOutcome {
    let Some(writer) = store.lock(&sport.key).await else {
        return RefreshOutcome::NotMonitoring;
    };
    refresh_locked(feed, &writer, sport).await
}

async fn refresh_locked<F: FeedSource>(
    feed: &F,
    writer: &SportWriter<'_>,
    sport: &SportConfig,
) -> RefreshOutcome {
    let state = writer.snapshot();
    if !state.monitoring {
        return RefreshOutcome::NotMonitoring;
    }
    let Some(watched) = state.next_game else {
        warn!("{} monitoring without a watched game, stopping", sport.key);
        writer.apply(StatePatch {
            monitoring: Some(false),
            ..Default::default()
        });
        return RefreshOutcome::NotMonitoring;
    };

    let response = match feed.fetch_summary(sport, &watched.id).await {
        Ok(response) => response,
        Err(e) if e.is_transport() => {
            error!("Error checking {} game {}: {}", sport.key, watched.id, e);
            return RefreshOutcome::Failed;
        }
        Err(e) => {
            warn!("Unreadable detail for {} game {}: {}", sport.key, watched.id, e);
            return RefreshOutcome::Failed;
        }
    };

    let detail = match parse_game_detail(&watched.id, &response) {
        Ok(detail) => detail,
        Err(e) => {
            warn!("Unusable detail for {} game {}: {}", sport.key, watched.id, e);
            return RefreshOutcome::Failed;
        }
    };

    let updated = detail.merge_into(&watched);

    if updated.is_final() {
        info!(
            "{} game {} finished: {}",
            sport.key,
            updated.id,
            updated.score_line(sport)
        );
        writer.apply(StatePatch {
            last_game: Some(updated.clone()),
            next_game: Some(None),
            monitoring: Some(false),
            last_refreshed_at: None,
        });
        RefreshOutcome::Finished(updated)
    } else {
        debug!(
            "{} game {} live: {}",
            sport.key,
            updated.id,
            updated.score_line(sport)
        );
        writer.apply(StatePatch {
            next_game: Some(Some(updated.clone())),
            ..Default::default()
        });
        RefreshOutcome::StillLive(updated)
    }
}
