//! Status projection: the read-only view served to status queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{Config, SportConfig};
use crate::data_fetcher::api::build_display_url;
use crate::engine::store::{GameStateStore, SportState};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreLink {
    /// `W 78-70` or `L 70-78`, monitored team first
    pub text: String,
    pub url: String,
}

/// Status of one sport. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub did_win: Option<bool>,
    pub score_link: Option<ScoreLink>,
    pub is_live: bool,
    pub live_score: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Projects a sport's cached state into its status payload.
///
/// A live game takes precedence over the last result. Pure: no I/O, no locks.
pub fn project_status(state: &SportState, sport: &SportConfig) -> StatusPayload {
    let last_updated = state.last_refreshed_at;

    if state.monitoring
        && let Some(game) = &state.next_game
    {
        return StatusPayload {
            is_live: true,
            live_score: Some(game.score_line(sport)),
            last_updated,
            ..Default::default()
        };
    }

    if let Some(game) = state.last_game.as_ref().filter(|game| game.is_final()) {
        let (ours, _) = game.sides_for(sport);
        let marker = if ours.winner { "W" } else { "L" };
        return StatusPayload {
            did_win: Some(ours.winner),
            score_link: Some(ScoreLink {
                text: format!("{marker} {}", game.score_line(sport)),
                url: build_display_url(&sport.display_url_prefix, &game.id),
            }),
            last_updated,
            ..Default::default()
        };
    }

    StatusPayload {
        last_updated,
        ..Default::default()
    }
}

/// Resolves `selector` to a configured sport and projects its current state.
pub fn query_status(
    store: &GameStateStore,
    config: &Config,
    selector: &str,
) -> Result<StatusPayload, AppError> {
    let sport = config
        .sport(selector)
        .ok_or_else(|| AppError::unknown_sport(selector))?;
    let state = store
        .snapshot(&sport.key)
        .ok_or_else(|| AppError::unknown_sport(selector))?;
    Ok(project_status(&state, sport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{Game, GameStatus, TeamSnapshot};
    use crate::engine::store::StatePatch;
    use chrono::TimeZone;

    fn team(code: &str, score: &str, winner: bool) -> TeamSnapshot {
        TeamSnapshot {
            code: code.to_string(),
            score: score.to_string(),
            winner,
        }
    }

    fn game(status: GameStatus, home: TeamSnapshot, away: TeamSnapshot) -> Game {
        let start = Utc.with_ymd_and_hms(2025, 1, 4, 19, 0, 0).unwrap();
        Game {
            id: "401".to_string(),
            date: start.date_naive(),
            start,
            status,
            home,
            away,
        }
    }

    #[test]
    fn test_final_win() {
        let sport = SportConfig::default_basketball();
        let state = SportState {
            last_game: Some(game(
                GameStatus::Final,
                team("ku", "78", true),
                team("duke", "70", false),
            )),
            ..Default::default()
        };

        let status = project_status(&state, &sport);
        assert_eq!(status.did_win, Some(true));
        assert!(!status.is_live);
        let link = status.score_link.unwrap();
        assert_eq!(link.text, "W 78-70");
        assert_eq!(
            link.url,
            "https://www.espn.com/mens-college-basketball/game/_/gameId/401"
        );
    }

    #[test]
    fn test_final_loss_as_away_team() {
        let sport = SportConfig::default_basketball();
        let state = SportState {
            last_game: Some(game(
                GameStatus::Final,
                team("duke", "81", true),
                team("KU", "75", false),
            )),
            ..Default::default()
        };

        let status = project_status(&state, &sport);
        assert_eq!(status.did_win, Some(false));
        assert_eq!(status.score_link.unwrap().text, "L 75-81");
    }

    #[test]
    fn test_live_takes_precedence() {
        let sport = SportConfig::default_basketball();
        let state = SportState {
            last_game: Some(game(
                GameStatus::Final,
                team("ku", "78", true),
                team("duke", "70", false),
            )),
            next_game: Some(game(
                GameStatus::InProgress,
                team("unc", "40", false),
                team("ku", "44", false),
            )),
            monitoring: true,
            ..Default::default()
        };

        let status = project_status(&state, &sport);
        assert!(status.is_live);
        assert_eq!(status.live_score.as_deref(), Some("44-40"));
        assert_eq!(status.did_win, None);
        assert_eq!(status.score_link, None);
    }

    #[test]
    fn test_unmatched_codes_treat_home_as_ours() {
        let sport = SportConfig::default_basketball();
        let state = SportState {
            next_game: Some(game(
                GameStatus::InProgress,
                team("jayhawks", "10", false),
                team("duke", "12", false),
            )),
            monitoring: true,
            ..Default::default()
        };
        assert_eq!(
            project_status(&state, &sport).live_score.as_deref(),
            Some("10-12")
        );
    }

    #[test]
    fn test_defaults_serialize_as_nulls() {
        let sport = SportConfig::default_basketball();
        let refreshed = Utc.with_ymd_and_hms(2025, 1, 5, 8, 0, 0).unwrap();
        let state = SportState {
            next_game: Some(game(
                GameStatus::Scheduled,
                team("ku", "0", false),
                team("duke", "0", false),
            )),
            last_refreshed_at: Some(refreshed),
            ..Default::default()
        };

        let status = project_status(&state, &sport);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["didWin"], serde_json::Value::Null);
        assert_eq!(json["scoreLink"], serde_json::Value::Null);
        assert_eq!(json["isLive"], false);
        assert_eq!(json["liveScore"], serde_json::Value::Null);
        assert_eq!(json["lastUpdated"], "2025-01-05T08:00:00Z");
    }

    #[tokio::test]
    async fn test_query_status_resolves_selector() {
        let config = Config::default();
        let store = GameStateStore::from_config(&config);
        {
            let writer = store.lock("basketball").await.unwrap();
            writer.apply(StatePatch {
                last_game: Some(game(
                    GameStatus::Final,
                    team("ku", "78", true),
                    team("duke", "70", false),
                )),
                ..Default::default()
            });
        }

        let status = query_status(&store, &config, "Basketball").unwrap();
        assert_eq!(status.did_win, Some(true));

        let football = query_status(&store, &config, "football").unwrap();
        assert_eq!(football, StatusPayload::default());

        assert!(matches!(
            query_status(&store, &config, "hockey"),
            Err(AppError::UnknownSport(_))
        ));
    }
}
