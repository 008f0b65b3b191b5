use crate::config::sport::SportConfig;
use crate::error::AppError;
use std::collections::HashSet;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - At least one sport must be configured, with unique keys
/// - Every feed base URL must be an http(s) URL
/// - Team codes and season months must be non-empty, months within 1-12
/// - Poll cadences must be non-zero
/// - If a log file path is provided, it cannot be empty and its parent must be creatable
pub fn validate_config(
    sports: &[SportConfig],
    log_file_path: &Option<String>,
    intervals: &[(&str, u64)],
) -> Result<(), AppError> {
    if sports.is_empty() {
        return Err(AppError::config_error("At least one sport must be configured"));
    }

    let mut seen = HashSet::new();
    for sport in sports {
        validate_sport(sport)?;
        if !seen.insert(sport.key.to_ascii_lowercase()) {
            return Err(AppError::config_error(format!(
                "Duplicate sport key '{}'",
                sport.key
            )));
        }
    }

    for (name, value) in intervals {
        if *value == 0 {
            return Err(AppError::config_error(format!("{name} must be greater than zero")));
        }
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn validate_sport(sport: &SportConfig) -> Result<(), AppError> {
    if sport.key.trim().is_empty() {
        return Err(AppError::config_error("Sport key cannot be empty"));
    }

    let url = sport.feed_base_url.as_str();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "Sport '{}': feed_base_url must start with http:// or https://",
            sport.key
        )));
    }

    if sport.team_id.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "Sport '{}': team_id cannot be empty",
            sport.key
        )));
    }

    if sport.team_codes.iter().all(|c| c.trim().is_empty()) {
        return Err(AppError::config_error(format!(
            "Sport '{}': at least one team code is required",
            sport.key
        )));
    }

    if sport.season_months.is_empty() {
        return Err(AppError::config_error(format!(
            "Sport '{}': season_months cannot be empty",
            sport.key
        )));
    }

    let in_range = |m: &u32| (1..=12).contains(m);
    if !sport.season_months.iter().all(in_range) || !in_range(&sport.season_rollover_month) {
        return Err(AppError::config_error(format!(
            "Sport '{}': months must be between 1 and 12",
            sport.key
        )));
    }

    if sport.phases.is_empty() {
        return Err(AppError::config_error(format!(
            "Sport '{}': at least one phase is required",
            sport.key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals() -> Vec<(&'static str, u64)> {
        vec![("probe_interval_seconds", 300)]
    }

    #[test]
    fn test_default_sports_are_valid() {
        let sports = vec![
            SportConfig::default_basketball(),
            SportConfig::default_football(),
        ];
        assert!(validate_config(&sports, &None, &intervals()).is_ok());
    }

    #[test]
    fn test_empty_sports_rejected() {
        assert!(validate_config(&[], &None, &intervals()).is_err());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let sports = vec![
            SportConfig::default_basketball(),
            SportConfig::default_basketball(),
        ];
        let err = validate_config(&sports, &None, &intervals()).unwrap_err();
        assert!(err.to_string().contains("Duplicate sport key"));
    }

    #[test]
    fn test_bad_month_rejected() {
        let mut sport = SportConfig::default_basketball();
        sport.season_months.push(13);
        assert!(validate_config(&[sport], &None, &intervals()).is_err());
    }

    #[test]
    fn test_feed_url_without_scheme_rejected() {
        let mut sport = SportConfig::default_basketball();
        sport.feed_base_url = "site.api.espn.com".to_string();
        assert!(validate_config(&[sport], &None, &intervals()).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let sports = vec![SportConfig::default_basketball()];
        let err = validate_config(&sports, &None, &[("monitor_interval_seconds", 0)]).unwrap_err();
        assert!(err.to_string().contains("monitor_interval_seconds"));
    }

    #[test]
    fn test_empty_log_path_rejected() {
        let sports = vec![SportConfig::default_basketball()];
        assert!(validate_config(&sports, &Some(String::new()), &intervals()).is_err());
    }
}
