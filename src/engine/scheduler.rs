//! Per-sport cadence: startup sync, daily sync, monitor probe, live refresh
//! and the settle sync after a game ends.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at, sleep, sleep_until};
use tracing::{debug, info, instrument, warn};

use super::monitor::{ProbeOutcome, RefreshOutcome, probe, refresh};
use super::store::GameStateStore;
use super::synchronizer::{SyncOutcome, sync_sport};
use crate::config::{Config, SportConfig};
use crate::data_fetcher::api::FeedSource;
use crate::status::{StatusPayload, project_status};

/// Fallback wait in hours when the next daily sync time cannot be computed
const DAILY_SYNC_RETRY_HOURS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub probe_interval: Duration,
    pub monitor_interval: Duration,
    pub settle_delay: Duration,
    pub daily_sync_hour: u32,
}

impl SchedulerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            probe_interval: config.probe_interval(),
            monitor_interval: config.monitor_interval(),
            settle_delay: config.settle_delay(),
            daily_sync_hour: config.daily_sync_hour,
        }
    }
}

/// Next occurrence of `hour`:00 strictly after `now`, in `now`'s time zone.
///
/// Days where that local time does not exist (DST gaps) are skipped.
pub fn next_daily_sync<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let mut day = now.date_naive();
    for _ in 0..3 {
        if let Some(candidate) = day
            .and_hms_opt(hour, 0, 0)
            .and_then(|time| time.and_local_timezone(tz.clone()).earliest())
            && candidate > *now
        {
            return Some(candidate);
        }
        day = day.succ_opt()?;
    }
    None
}

/// Daily sync that follows the one due at `previous`.
///
/// Counted from `now` when `previous` is already behind it, so a late run
/// never queues up missed days.
pub fn following_daily_sync<Tz: TimeZone>(
    previous: &DateTime<Tz>,
    now: &DateTime<Tz>,
    hour: u32,
) -> DateTime<Tz> {
    let from = if previous > now { previous } else { now };
    next_daily_sync(from, hour)
        .unwrap_or_else(|| from.clone() + TimeDelta::hours(DAILY_SYNC_RETRY_HOURS))
}

fn deadline_for(target: &DateTime<Local>) -> Instant {
    let wait = (*target - Local::now()).to_std().unwrap_or(Duration::ZERO);
    Instant::now() + wait
}

/// Runs one sport's schedule forever. Cancel by aborting the task.
#[instrument(skip(feed, store, sport, settings), fields(sport = %sport.key))]
pub async fn run_sport<F: FeedSource>(
    feed: Arc<F>,
    store: Arc<GameStateStore>,
    sport: SportConfig,
    settings: SchedulerSettings,
) {
    info!(
        "Scheduling {}: daily sync at {:02}:00, probe every {:?}",
        sport.key, settings.daily_sync_hour, settings.probe_interval
    );
    sync_sport(feed.as_ref(), &store, &sport, Utc::now()).await;

    let mut probe_ticker = interval(settings.probe_interval);
    probe_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut monitor_ticker = interval_at(
        Instant::now() + settings.monitor_interval,
        settings.monitor_interval,
    );
    monitor_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Stays due across iterations: a long arm that runs past the target
    // leaves the deadline in the past and the sync fires right after it.
    let now = Local::now();
    let mut daily_target = following_daily_sync(&now, &now, settings.daily_sync_hour);
    let daily = sleep_until(deadline_for(&daily_target));
    tokio::pin!(daily);

    loop {
        let monitoring = store
            .snapshot(&sport.key)
            .is_some_and(|state| state.monitoring);

        tokio::select! {
            _ = &mut daily => {
                info!("Daily {} schedule sync", sport.key);
                sync_sport(feed.as_ref(), &store, &sport, Utc::now()).await;
                daily_target =
                    following_daily_sync(&daily_target, &Local::now(), settings.daily_sync_hour);
                debug!("Next daily {} sync at {}", sport.key, daily_target);
                daily.as_mut().reset(deadline_for(&daily_target));
            }
            _ = probe_ticker.tick() => {
                match probe(feed.as_ref(), &store, &sport, Utc::now()).await {
                    ProbeOutcome::Started(outcome) => {
                        // First refresh already ran; next one a full interval out
                        monitor_ticker.reset();
                        if let RefreshOutcome::Finished(_) = outcome {
                            settle_and_sync(feed.as_ref(), &store, &sport, settings.settle_delay).await;
                        }
                    }
                    ProbeOutcome::NotYet { starts_at } => {
                        debug!("{} game not started, starts at {}", sport.key, starts_at);
                    }
                    ProbeOutcome::NoGame | ProbeOutcome::AlreadyActive => {}
                }
            }
            _ = monitor_ticker.tick(), if monitoring => {
                match refresh(feed.as_ref(), &store, &sport).await {
                    RefreshOutcome::Finished(_) => {
                        settle_and_sync(feed.as_ref(), &store, &sport, settings.settle_delay).await;
                    }
                    RefreshOutcome::Failed => warn!("{} refresh failed, retrying next tick", sport.key),
                    RefreshOutcome::StillLive(_) | RefreshOutcome::NotMonitoring => {}
                }
            }
        }
    }
}

async fn settle_and_sync<F: FeedSource>(
    feed: &F,
    store: &GameStateStore,
    sport: &SportConfig,
    delay: Duration,
) {
    debug!("Waiting {:?} before re-syncing {}", delay, sport.key);
    sleep(delay).await;
    sync_sport(feed, store, sport, Utc::now()).await;
}

/// One pass over `sports`: sync, probe, and project the resulting status.
/// Sports run concurrently.
pub async fn run_once<F: FeedSource>(
    feed: &F,
    store: &GameStateStore,
    sports: &[&SportConfig],
    now: DateTime<Utc>,
) -> BTreeMap<String, StatusPayload> {
    let passes = sports.iter().map(|&sport| async move {
        if let SyncOutcome::Failed { reason } = sync_sport(feed, store, sport, now).await {
            warn!("{} status may be empty: {}", sport.key, reason);
        }
        probe(feed, store, sport, now).await;
        let state = store.snapshot(&sport.key).unwrap_or_default();
        (sport.key.clone(), project_status(&state, sport))
    });

    join_all(passes).await.into_iter().collect()
}
