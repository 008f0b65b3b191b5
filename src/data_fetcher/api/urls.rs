//! URL building utilities for feed endpoints

/// Builds the team schedule URL for one season and phase.
///
/// # Example
/// ```
/// use win_tracker::data_fetcher::api::build_schedule_url;
///
/// let url = build_schedule_url("https://feed.example.com/basketball", "2305", 2024, 2);
/// assert_eq!(
///     url,
///     "https://feed.example.com/basketball/teams/2305/schedule?season=2024&seasontype=2"
/// );
/// ```
pub fn build_schedule_url(base_url: &str, team_id: &str, season: i32, phase: u32) -> String {
    format!(
        "{}/teams/{team_id}/schedule?season={season}&seasontype={phase}",
        base_url.trim_end_matches('/')
    )
}

/// Builds the single-event summary URL.
///
/// # Example
/// ```
/// use win_tracker::data_fetcher::api::build_summary_url;
///
/// let url = build_summary_url("https://feed.example.com/basketball/", "401");
/// assert_eq!(url, "https://feed.example.com/basketball/summary?event=401");
/// ```
pub fn build_summary_url(base_url: &str, event_id: &str) -> String {
    format!("{}/summary?event={event_id}", base_url.trim_end_matches('/'))
}

/// Builds the public page link for a game.
pub fn build_display_url(prefix: &str, game_id: &str) -> String {
    format!("{prefix}{game_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_url() {
        assert_eq!(
            build_display_url("https://www.espn.com/mens-college-basketball/game/_/gameId/", "401"),
            "https://www.espn.com/mens-college-basketball/game/_/gameId/401"
        );
    }
}
