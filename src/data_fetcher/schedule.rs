//! Schedule fetching: every configured phase of a season, normalized and sorted.

use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

use crate::config::SportConfig;
use crate::data_fetcher::api::FeedSource;
use crate::data_fetcher::models::Game;
use crate::data_fetcher::processors::normalize_event;
use crate::error::AppError;

/// Fetches and normalizes a season's games, sorted ascending by start.
///
/// Partial failures never fail the call: a phase whose request fails is
/// logged and skipped, a malformed event is logged and skipped. The call
/// fails only when the feed cannot be addressed at all, or when every phase
/// request failed, so that an outage is never mistaken for an empty season.
#[instrument(skip(feed, sport), fields(sport = %sport.key))]
pub async fn fetch_season_schedule<F: FeedSource>(
    feed: &F,
    sport: &SportConfig,
    season: i32,
) -> Result<Vec<Game>, AppError> {
    if sport.feed_base_url.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "Sport '{}' has no feed address",
            sport.key
        )));
    }

    let mut games = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut last_failure = None;
    let mut failed_phases = 0usize;

    for &phase in &sport.phases {
        let response = match feed.fetch_schedule(sport, season, phase).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "Failed to fetch {} schedule for season {} phase {}: {}",
                    sport.key, season, phase, e
                );
                failed_phases += 1;
                last_failure = Some(e);
                continue;
            }
        };

        let events = response.events.unwrap_or_default();
        if events.is_empty() {
            debug!("No events for {} season {} phase {}", sport.key, season, phase);
            continue;
        }

        let mut accepted = 0usize;
        for raw in &events {
            match normalize_event(raw) {
                Ok(game) => {
                    if seen_ids.insert(game.id.clone()) {
                        games.push(game);
                        accepted += 1;
                    } else {
                        debug!("Dropping duplicate event {} from phase {}", game.id, phase);
                    }
                }
                Err(e) => warn!("Skipping event in {} phase {}: {}", sport.key, phase, e),
            }
        }

        debug!(
            "Phase {} of season {}: {} of {} events accepted",
            phase,
            season,
            accepted,
            events.len()
        );
    }

    if failed_phases == sport.phases.len()
        && let Some(e) = last_failure
    {
        return Err(e);
    }

    games.sort_by_key(|game| game.start);
    info!("Fetched {} games for {} season {}", games.len(), sport.key, season);

    Ok(games)
}
