use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SportConfig;

/// Lifecycle of a single contest as reported by the feed.
///
/// `Scheduled -> InProgress -> Final`; a game may also jump straight from
/// `Scheduled` to `Final` when the feed is polled rarely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Final,
}

/// One side of a game as seen at the time of the last fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    /// Lower-cased short code, e.g. `ku`
    pub code: String,
    /// Rendered score. Kept as text since the feed shows placeholders before tip-off.
    pub score: String,
    /// Only meaningful once the game is final
    pub winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub status: GameStatus,
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
}

impl Game {
    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// Splits the game into (ours, opponent) for the sport's monitored team.
    ///
    /// If neither side carries a monitored short code, `home` is treated as ours.
    /// This can misattribute the result when the feed changes its code format.
    pub fn sides_for<'a>(&'a self, sport: &SportConfig) -> (&'a TeamSnapshot, &'a TeamSnapshot) {
        if sport.is_monitored_code(&self.home.code) {
            (&self.home, &self.away)
        } else if sport.is_monitored_code(&self.away.code) {
            (&self.away, &self.home)
        } else {
            tracing::debug!(
                "Game {}: neither '{}' nor '{}' matches team codes {:?}, treating home as ours",
                self.id,
                self.home.code,
                self.away.code,
                sport.team_codes
            );
            (&self.home, &self.away)
        }
    }

    /// Score line from the monitored team's perspective, e.g. `78-70`
    pub fn score_line(&self, sport: &SportConfig) -> String {
        let (ours, theirs) = self.sides_for(sport);
        format!("{}-{}", ours.score, theirs.score)
    }
}
