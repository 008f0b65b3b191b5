use super::game_status::determine_game_status;
use super::normalize::normalize_score;
use crate::constants::feed::HOME_SIDE;
use crate::data_fetcher::models::{Game, GameStatus, SummaryResponse};
use crate::error::AppError;

/// Live update for one side of a watched game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideUpdate {
    pub score: String,
    pub winner: bool,
}

/// Parsed single-event detail: status plus whatever per-side data the feed sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetail {
    pub status: GameStatus,
    pub home: Option<SideUpdate>,
    pub away: Option<SideUpdate>,
}

impl GameDetail {
    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// Merges this detail into the snapshot being watched.
    ///
    /// Identity fields (id, start, team codes) always come from `watched`.
    /// Scores are overwritten for every side the detail carries. Winner flags
    /// and the `Final` status are only taken once the detail is final; before
    /// that the status only ever moves forward to `InProgress`.
    pub fn merge_into(&self, watched: &Game) -> Game {
        let mut merged = watched.clone();

        for (side, update) in [(&mut merged.home, &self.home), (&mut merged.away, &self.away)] {
            if let Some(update) = update {
                side.score = update.score.clone();
                if self.is_final() {
                    side.winner = update.winner;
                }
            }
        }

        match self.status {
            GameStatus::Final => merged.status = GameStatus::Final,
            GameStatus::InProgress => merged.status = GameStatus::InProgress,
            GameStatus::Scheduled => {}
        }

        merged
    }
}

/// Parses the summary endpoint response for `event_id`.
pub fn parse_game_detail(event_id: &str, response: &SummaryResponse) -> Result<GameDetail, AppError> {
    let competition = response
        .header
        .as_ref()
        .and_then(|header| header.competitions.as_ref())
        .and_then(|competitions| competitions.first())
        .ok_or_else(|| AppError::malformed_event(event_id, "summary without header competition"))?;

    let mut detail = GameDetail {
        status: determine_game_status(competition),
        home: None,
        away: None,
    };

    for competitor in competition.competitors.iter().flatten() {
        let update = SideUpdate {
            score: normalize_score(competitor.score.as_ref()),
            winner: competitor.winner.unwrap_or(false),
        };
        if competitor.home_away.as_deref() == Some(HOME_SIDE) {
            detail.home = Some(update);
        } else {
            detail.away = Some(update);
        }
    }

    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::TeamSnapshot;
    use chrono::{TimeZone, Utc};

    fn watched() -> Game {
        let start = Utc.with_ymd_and_hms(2025, 1, 4, 19, 0, 0).unwrap();
        Game {
            id: "401".to_string(),
            date: start.date_naive(),
            start,
            status: GameStatus::Scheduled,
            home: TeamSnapshot {
                code: "ku".to_string(),
                score: "0".to_string(),
                winner: false,
            },
            away: TeamSnapshot {
                code: "duke".to_string(),
                score: "0".to_string(),
                winner: false,
            },
        }
    }

    fn summary(json: serde_json::Value) -> SummaryResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_live_detail() {
        let response = summary(serde_json::json!({
            "header": {"competitions": [{
                "status": {"type": {"name": "STATUS_IN_PROGRESS", "completed": false}},
                "competitors": [
                    {"homeAway": "home", "score": "40", "winner": false},
                    {"homeAway": "away", "score": "35"}
                ]
            }]}
        }));

        let detail = parse_game_detail("401", &response).unwrap();
        assert_eq!(detail.status, GameStatus::InProgress);
        assert_eq!(detail.home.as_ref().unwrap().score, "40");
        assert_eq!(detail.away.as_ref().unwrap().score, "35");

        let merged = detail.merge_into(&watched());
        assert_eq!(merged.status, GameStatus::InProgress);
        assert_eq!(merged.home.score, "40");
        assert_eq!(merged.home.code, "ku");
        assert!(!merged.home.winner);
    }

    #[test]
    fn test_final_detail_sets_winner_flags() {
        let response = summary(serde_json::json!({
            "header": {"competitions": [{
                "status": {"type": {"name": "STATUS_FINAL", "completed": true}},
                "competitors": [
                    {"homeAway": "home", "score": "78", "winner": true},
                    {"homeAway": "away", "score": "70", "winner": false}
                ]
            }]}
        }));

        let merged = parse_game_detail("401", &response)
            .unwrap()
            .merge_into(&watched());
        assert_eq!(merged.status, GameStatus::Final);
        assert!(merged.home.winner);
        assert!(!merged.away.winner);
        assert_eq!(merged.away.score, "70");
    }

    #[test]
    fn test_partial_detail_keeps_watched_fields() {
        let mut game = watched();
        game.status = GameStatus::InProgress;
        game.away.score = "12".to_string();

        let response = summary(serde_json::json!({
            "header": {"competitions": [{
                "status": {"type": {"name": "STATUS_HALFTIME", "completed": false}},
                "competitors": [{"homeAway": "home", "score": "15"}]
            }]}
        }));

        let merged = parse_game_detail("401", &response)
            .unwrap()
            .merge_into(&game);
        assert_eq!(merged.status, GameStatus::InProgress);
        assert_eq!(merged.home.score, "15");
        assert_eq!(merged.away.score, "12");
    }

    #[test]
    fn test_summary_without_header_is_malformed() {
        let response = summary(serde_json::json!({}));
        assert!(matches!(
            parse_game_detail("401", &response),
            Err(AppError::MalformedEvent { .. })
        ));
    }
}
