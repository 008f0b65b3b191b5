//! Per-sport in-memory state, owned by [`GameStateStore`].
//!
//! Each sport has two locks. The async *lane* serializes every mutating
//! operation for that sport end to end, network calls included, so a sync
//! pass and a monitor refresh can never interleave their read-decide-write.
//! The state itself sits behind a short-lived `RwLock` that is only held to
//! clone or patch, so status reads never wait on the network.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

use crate::config::Config;
use crate::data_fetcher::models::Game;

/// Derived state for one sport. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SportState {
    /// Most recent completed game
    pub last_game: Option<Game>,
    /// Live game, or the soonest upcoming one
    pub next_game: Option<Game>,
    /// True while the result monitor owns `next_game`
    pub monitoring: bool,
    /// Time of the last successful schedule sync
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Field-level update of a [`SportState`]. `None` leaves a field untouched.
///
/// `last_game` can only be replaced, never cleared: once a completed game is
/// known it stays known until a newer one replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub last_game: Option<Game>,
    /// `Some(None)` clears the next game, `Some(Some(game))` replaces it
    pub next_game: Option<Option<Game>>,
    pub monitoring: Option<bool>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl StatePatch {
    pub fn apply_to(self, state: &mut SportState) {
        if let Some(last_game) = self.last_game {
            state.last_game = Some(last_game);
        }
        if let Some(next_game) = self.next_game {
            state.next_game = next_game;
        }
        if let Some(monitoring) = self.monitoring {
            state.monitoring = monitoring;
        }
        if let Some(refreshed_at) = self.last_refreshed_at {
            state.last_refreshed_at = Some(refreshed_at);
        }
    }
}

struct SportSlot {
    lane: Mutex<()>,
    state: RwLock<SportState>,
}

/// Owner of every sport's [`SportState`], keyed by lower-cased sport key.
pub struct GameStateStore {
    slots: HashMap<String, SportSlot>,
}

impl GameStateStore {
    /// Creates a store with an empty state for every given sport key.
    pub fn new<I, S>(sport_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = sport_keys
            .into_iter()
            .map(|key| {
                (
                    normalize_key(key.as_ref()),
                    SportSlot {
                        lane: Mutex::new(()),
                        state: RwLock::new(SportState::default()),
                    },
                )
            })
            .collect();
        Self { slots }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sports.iter().map(|sport| sport.key.as_str()))
    }

    pub fn contains(&self, sport: &str) -> bool {
        self.slots.contains_key(&normalize_key(sport))
    }

    /// Copy of a sport's current state. Never waits on a writer's network call.
    pub fn snapshot(&self, sport: &str) -> Option<SportState> {
        self.slots.get(&normalize_key(sport)).map(|slot| {
            slot.state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }

    /// Enters the sport's writer lane. Held for a whole read-decide-write,
    /// suspensions included; other writers for the same sport wait their turn.
    pub async fn lock(&self, sport: &str) -> Option<SportWriter<'_>> {
        let slot = self.slots.get(&normalize_key(sport))?;
        let lane = slot.lane.lock().await;
        trace!("Entered writer lane for {sport}");
        Some(SportWriter {
            _lane: lane,
            state: &slot.state,
        })
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// Exclusive write access to one sport for the lifetime of the guard
pub struct SportWriter<'a> {
    _lane: MutexGuard<'a, ()>,
    state: &'a RwLock<SportState>,
}

impl SportWriter<'_> {
    pub fn snapshot(&self) -> SportState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `patch` and returns the resulting state.
    pub fn apply(&self, patch: StatePatch) -> SportState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        patch.apply_to(&mut state);
        state.clone()
    }
}
