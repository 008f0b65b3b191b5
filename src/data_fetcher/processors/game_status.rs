use crate::constants::feed::STATUS_IN_PROGRESS;
use crate::data_fetcher::models::{FeedCompetition, GameStatus};

/// Determines a game's status from the feed's competition block.
///
/// Precedence: the `completed` flag wins, then a live status name, otherwise
/// the game is treated as scheduled. A missing status block means scheduled.
///
/// # Examples
///
/// ```rust
/// use win_tracker::data_fetcher::models::{FeedCompetition, FeedStatus, FeedStatusType, GameStatus};
/// use win_tracker::data_fetcher::processors::determine_game_status;
///
/// let competition = FeedCompetition {
///     status: Some(FeedStatus {
///         status_type: Some(FeedStatusType {
///             name: Some("STATUS_IN_PROGRESS".to_string()),
///             completed: Some(false),
///         }),
///     }),
///     competitors: None,
/// };
///
/// assert_eq!(determine_game_status(&competition), GameStatus::InProgress);
/// ```
pub fn determine_game_status(competition: &FeedCompetition) -> GameStatus {
    let status_type = competition
        .status
        .as_ref()
        .and_then(|status| status.status_type.as_ref());

    let Some(status_type) = status_type else {
        return GameStatus::Scheduled;
    };

    if status_type.completed.unwrap_or(false) {
        GameStatus::Final
    } else if status_type.name.as_deref() == Some(STATUS_IN_PROGRESS) {
        GameStatus::InProgress
    } else {
        GameStatus::Scheduled
    }
}
