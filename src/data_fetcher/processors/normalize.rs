//! Ingestion boundary: raw feed events become canonical [`Game`] records.

use serde_json::Value;

use super::game_status::determine_game_status;
use super::time_parsing::parse_start_time;
use crate::constants::feed::{DEFAULT_SCORE, HOME_SIDE};
use crate::data_fetcher::models::{FeedCompetitor, FeedEvent, FeedScore, Game, TeamSnapshot};
use crate::error::AppError;

/// Renders a feed score as text.
///
/// `displayValue` wins over `value`; an absent or unusable score becomes `"0"`.
pub fn normalize_score(score: Option<&FeedScore>) -> String {
    let rendered = match score {
        Some(FeedScore::Text(text)) => non_empty(text),
        Some(FeedScore::Number(value)) => Some(format_number(*value)),
        Some(FeedScore::Detailed {
            display_value,
            value,
        }) => display_value
            .as_deref()
            .and_then(non_empty)
            .or_else(|| value.map(format_number)),
        None => None,
    };

    rendered.unwrap_or_else(|| DEFAULT_SCORE.to_string())
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn snapshot(event_id: &str, competitor: &FeedCompetitor) -> Result<TeamSnapshot, AppError> {
    let code = competitor
        .team
        .as_ref()
        .and_then(|team| team.abbreviation.as_deref())
        .and_then(non_empty)
        .ok_or_else(|| AppError::malformed_event(event_id, "competitor without team abbreviation"))?;

    Ok(TeamSnapshot {
        code: code.to_lowercase(),
        score: normalize_score(competitor.score.as_ref()),
        winner: competitor.winner.unwrap_or(false),
    })
}

fn is_home(competitor: &FeedCompetitor) -> bool {
    competitor.home_away.as_deref() == Some(HOME_SIDE)
}

/// Converts one raw schedule event into a [`Game`].
///
/// Any structural problem yields [`AppError::MalformedEvent`]; the caller is
/// expected to log it and carry on with the rest of the batch.
pub fn normalize_event(raw: &Value) -> Result<Game, AppError> {
    let raw_id = raw
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();

    let event: FeedEvent = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::malformed_event(&raw_id, e.to_string()))?;

    let id = event
        .id
        .as_deref()
        .and_then(non_empty)
        .ok_or_else(|| AppError::malformed_event(&raw_id, "missing id"))?;

    let date = event
        .date
        .as_deref()
        .ok_or_else(|| AppError::malformed_event(&id, "missing date"))?;
    let start = parse_start_time(date).map_err(|e| AppError::malformed_event(&id, e.to_string()))?;

    let competition = event
        .competitions
        .as_ref()
        .and_then(|competitions| competitions.first())
        .ok_or_else(|| AppError::malformed_event(&id, "missing competition"))?;

    let status = determine_game_status(competition);

    let mut home = None;
    let mut away = None;
    for competitor in competition.competitors.iter().flatten() {
        let team = snapshot(&id, competitor)?;
        if is_home(competitor) {
            home = Some(team);
        } else {
            away = Some(team);
        }
    }

    let (Some(home), Some(away)) = (home, away) else {
        return Err(AppError::malformed_event(&id, "expected a home and an away competitor"));
    };

    Ok(Game {
        date: start.date_naive(),
        id,
        start,
        status,
        home,
        away,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::GameStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    fn event(id: &str, completed: bool, home_score: Value, away_score: Value) -> Value {
        json!({
            "id": id,
            "date": "2025-01-04T19:00Z",
            "competitions": [{
                "status": {"type": {"name": "STATUS_FINAL", "completed": completed}},
                "competitors": [
                    {"homeAway": "home", "team": {"abbreviation": "KU"}, "score": home_score, "winner": true},
                    {"homeAway": "away", "team": {"abbreviation": "DUKE"}, "score": away_score}
                ]
            }]
        })
    }

    #[test]
    fn test_normalize_final_event() {
        let raw = event(
            "401",
            true,
            json!({"value": 78.0, "displayValue": "78"}),
            json!({"value": 70.0, "displayValue": "70"}),
        );
        let game = normalize_event(&raw).unwrap();

        assert_eq!(game.id, "401");
        assert_eq!(game.status, GameStatus::Final);
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        assert_eq!(game.start, Utc.with_ymd_and_hms(2025, 1, 4, 19, 0, 0).unwrap());
        assert_eq!(game.home.code, "ku");
        assert_eq!(game.home.score, "78");
        assert!(game.home.winner);
        assert_eq!(game.away.code, "duke");
        assert_eq!(game.away.score, "70");
        assert!(!game.away.winner);
    }

    #[test]
    fn test_missing_or_bad_scores_become_zero() {
        let raw = event("402", false, Value::Null, json!({"unexpected": []}));
        let game = normalize_event(&raw).unwrap();
        assert_eq!(game.home.score, "0");
        assert_eq!(game.away.score, "0");
        assert_eq!(game.status, GameStatus::Scheduled);
    }

    #[test]
    fn test_score_rendering() {
        assert_eq!(normalize_score(Some(&FeedScore::Number(81.0))), "81");
        assert_eq!(normalize_score(Some(&FeedScore::Text(" 64 ".into()))), "64");
        assert_eq!(normalize_score(Some(&FeedScore::Text("".into()))), "0");
        assert_eq!(
            normalize_score(Some(&FeedScore::Detailed {
                display_value: None,
                value: Some(55.0)
            })),
            "55"
        );
        assert_eq!(normalize_score(None), "0");
    }

    #[test]
    fn test_non_home_side_is_away() {
        let raw = json!({
            "id": "403",
            "date": "2025-01-04T19:00Z",
            "competitions": [{
                "competitors": [
                    {"homeAway": "neutral", "team": {"abbreviation": "UK"}},
                    {"homeAway": "home", "team": {"abbreviation": "KU"}}
                ]
            }]
        });
        let game = normalize_event(&raw).unwrap();
        assert_eq!(game.home.code, "ku");
        assert_eq!(game.away.code, "uk");
    }

    #[test]
    fn test_malformed_events_rejected() {
        let missing_date = json!({"id": "1", "competitions": []});
        assert!(matches!(
            normalize_event(&missing_date),
            Err(AppError::MalformedEvent { .. })
        ));

        let bad_date = json!({"id": "2", "date": "yesterday", "competitions": []});
        assert!(normalize_event(&bad_date).is_err());

        let one_side = json!({
            "id": "3",
            "date": "2025-01-04T19:00Z",
            "competitions": [{"competitors": [{"homeAway": "home", "team": {"abbreviation": "KU"}}]}]
        });
        assert!(normalize_event(&one_side).is_err());

        let no_abbreviation = json!({
            "id": "4",
            "date": "2025-01-04T19:00Z",
            "competitions": [{"competitors": [
                {"homeAway": "home", "team": {}},
                {"homeAway": "away", "team": {"abbreviation": "DUKE"}}
            ]}]
        });
        assert!(normalize_event(&no_abbreviation).is_err());

        let wrong_type = json!({"id": 5, "date": "2025-01-04T19:00Z"});
        assert!(normalize_event(&wrong_type).is_err());
    }
}
