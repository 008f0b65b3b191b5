//! Per-sport program configuration

use serde::{Deserialize, Serialize};

use crate::constants::feed::{PHASE_POSTSEASON, PHASE_REGULAR_SEASON};

/// Static description of one tracked program: where its feed lives, which team
/// is ours, and when its season runs. Immutable for the lifetime of the process.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SportConfig {
    /// Selector used by status queries, e.g. `basketball`
    pub key: String,
    /// Base address of the feed for this sport, without trailing slash
    pub feed_base_url: String,
    /// Feed identifier of the monitored team
    pub team_id: String,
    /// Short codes that identify the monitored team in a game record.
    /// Matched case-insensitively.
    pub team_codes: Vec<String>,
    /// Calendar months (1-12) considered in season
    pub season_months: Vec<u32>,
    /// First month of a new season label. Seasons crossing a year boundary are
    /// keyed by their starting year; a value of 1 keys seasons by calendar year.
    pub season_rollover_month: u32,
    /// Prefix of the public game page; the game id is appended
    pub display_url_prefix: String,
    /// Feed phases (season types) queried on every schedule fetch
    #[serde(default = "default_phases")]
    pub phases: Vec<u32>,
}

fn default_phases() -> Vec<u32> {
    vec![PHASE_REGULAR_SEASON, PHASE_POSTSEASON]
}

impl SportConfig {
    /// Returns true if the given short code belongs to the monitored team.
    pub fn is_monitored_code(&self, code: &str) -> bool {
        self.team_codes
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(code))
    }

    /// Kansas men's basketball on the ESPN site API. Season runs November to
    /// April and is labelled by its starting year.
    pub fn default_basketball() -> Self {
        SportConfig {
            key: "basketball".to_string(),
            feed_base_url:
                "https://site.api.espn.com/apis/site/v2/sports/basketball/mens-college-basketball"
                    .to_string(),
            team_id: "2305".to_string(),
            team_codes: vec!["ku".to_string(), "kansas".to_string()],
            season_months: vec![11, 12, 1, 2, 3, 4],
            season_rollover_month: 11,
            display_url_prefix: "https://www.espn.com/mens-college-basketball/game/_/gameId/"
                .to_string(),
            phases: default_phases(),
        }
    }

    /// Kansas football on the ESPN site API. Season runs August to January.
    pub fn default_football() -> Self {
        SportConfig {
            key: "football".to_string(),
            feed_base_url: "https://site.api.espn.com/apis/site/v2/sports/football/college-football"
                .to_string(),
            team_id: "2305".to_string(),
            team_codes: vec!["ku".to_string(), "kansas".to_string()],
            season_months: vec![8, 9, 10, 11, 12, 1],
            season_rollover_month: 8,
            display_url_prefix: "https://www.espn.com/college-football/game/_/gameId/".to_string(),
            phases: default_phases(),
        }
    }
}
