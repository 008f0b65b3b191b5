//! Season resolution: which season label the feed expects for a given date.

use chrono::{Datelike, NaiveDate};

use crate::config::SportConfig;

/// Returns the season label for `date`.
///
/// Seasons that cross a calendar-year boundary are keyed by their starting
/// year: from the rollover month onwards the label is the current year,
/// before it the previous year.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use win_tracker::config::SportConfig;
/// use win_tracker::data_fetcher::season::current_season;
///
/// let basketball = SportConfig::default_basketball();
/// let january = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// assert_eq!(current_season(january, &basketball), 2024);
/// ```
pub fn current_season(date: NaiveDate, sport: &SportConfig) -> i32 {
    if date.month() >= sport.season_rollover_month {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Returns true if `date` falls in one of the sport's in-season months.
pub fn is_in_season(date: NaiveDate, sport: &SportConfig) -> bool {
    sport.season_months.contains(&date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_basketball_rollover() {
        let sport = SportConfig::default_basketball();
        assert_eq!(current_season(date(2025, 1, 10), &sport), 2024);
        assert_eq!(current_season(date(2025, 10, 31), &sport), 2024);
        assert_eq!(current_season(date(2025, 11, 1), &sport), 2025);
        assert_eq!(current_season(date(2025, 12, 20), &sport), 2025);
    }

    #[test]
    fn test_calendar_year_seasons() {
        let mut sport = SportConfig::default_basketball();
        sport.season_rollover_month = 1;
        assert_eq!(current_season(date(2025, 1, 1), &sport), 2025);
        assert_eq!(current_season(date(2025, 12, 31), &sport), 2025);
    }

    #[test]
    fn test_in_season_matches_month_set_for_every_month() {
        let sport = SportConfig::default_basketball();
        for month in 1..=12 {
            let expected = sport.season_months.contains(&month);
            assert_eq!(is_in_season(date(2025, month, 15), &sport), expected, "month {month}");
        }
        assert!(is_in_season(date(2025, 11, 1), &sport));
        assert!(is_in_season(date(2025, 4, 30), &sport));
        assert!(!is_in_season(date(2025, 5, 1), &sport));
        assert!(!is_in_season(date(2025, 10, 31), &sport));
    }

    #[test]
    fn test_football_rollover() {
        let sport = SportConfig::default_football();
        assert_eq!(current_season(date(2025, 1, 5), &sport), 2024);
        assert_eq!(current_season(date(2025, 8, 30), &sport), 2025);
    }
}
