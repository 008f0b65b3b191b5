use crate::constants::{self, env_vars, schedule};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

pub mod paths;
pub mod sport;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
pub use sport::SportConfig;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Tracked programs. Defaults to Kansas basketball and football.
    #[serde(default = "default_sports")]
    pub sports: Vec<SportConfig>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for feed requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Retries per feed request for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Cadence of the "should monitoring start?" probe.
    #[serde(default = "default_probe_interval")]
    pub probe_interval_seconds: u64,
    /// Cadence of live-game refreshes while monitoring.
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval_seconds: u64,
    /// Wait after a game turns final before re-syncing the schedule.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_seconds: u64,
    /// Local hour (0-23) of the daily schedule sync.
    #[serde(default = "default_daily_sync_hour")]
    pub daily_sync_hour: u32,
    /// Socket address the status endpoint listens on.
    #[serde(default = "default_status_listen_addr")]
    pub status_listen_addr: String,
}

fn default_sports() -> Vec<SportConfig> {
    vec![
        SportConfig::default_basketball(),
        SportConfig::default_football(),
    ]
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_max_retries() -> u32 {
    constants::DEFAULT_MAX_RETRIES
}

fn default_probe_interval() -> u64 {
    schedule::PROBE_INTERVAL_SECONDS
}

fn default_monitor_interval() -> u64 {
    schedule::MONITOR_INTERVAL_SECONDS
}

fn default_settle_delay() -> u64 {
    schedule::SETTLE_DELAY_SECONDS
}

fn default_daily_sync_hour() -> u32 {
    schedule::DAILY_SYNC_HOUR
}

fn default_status_listen_addr() -> String {
    constants::DEFAULT_STATUS_LISTEN_ADDR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sports: default_sports(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            max_retries: default_max_retries(),
            probe_interval_seconds: default_probe_interval(),
            monitor_interval_seconds: default_monitor_interval(),
            settle_delay_seconds: default_settle_delay(),
            daily_sync_hour: default_daily_sync_hour(),
            status_listen_addr: default_status_listen_addr(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default config file location.
    /// A missing file is not an error: built-in defaults are used instead.
    /// Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `WIN_TRACKER_LOG_FILE` - Override log file path
    /// - `WIN_TRACKER_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `WIN_TRACKER_STATUS_ADDR` - Override the status endpoint address
    pub async fn load(path: Option<&str>) -> Result<Self, AppError> {
        let config_path = path.map(str::to_string).unwrap_or_else(get_config_path);

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            tracing::info!("No config file at {config_path}, using built-in defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(addr) = std::env::var(env_vars::STATUS_ADDR) {
            self.status_listen_addr = addr;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        if self.daily_sync_hour > 23 {
            return Err(AppError::config_error(
                "daily_sync_hour must be between 0 and 23",
            ));
        }
        self.status_socket_addr()?;
        validate_config(
            &self.sports,
            &self.log_file_path,
            &[
                ("http_timeout_seconds", self.http_timeout_seconds),
                ("probe_interval_seconds", self.probe_interval_seconds),
                ("monitor_interval_seconds", self.monitor_interval_seconds),
            ],
        )
    }

    /// Looks up a sport by its key, case-insensitively.
    pub fn sport(&self, selector: &str) -> Option<&SportConfig> {
        self.sports
            .iter()
            .find(|sport| sport.key.eq_ignore_ascii_case(selector.trim()))
    }

    /// Parsed `status_listen_addr`.
    pub fn status_socket_addr(&self) -> Result<SocketAddr, AppError> {
        self.status_listen_addr.parse().map_err(|e| {
            AppError::config_error(format!(
                "Invalid status_listen_addr '{}': {e}",
                self.status_listen_addr
            ))
        })
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_seconds)
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_secs(self.monitor_interval_seconds)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_seconds)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub fn display(&self, config_path: &str) {
        let log_dir = get_log_dir_path();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path} (not found, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("Sports:");
        for sport in &self.sports {
            println!(
                "{} - team {} ({}) via {}",
                sport.key,
                sport.team_id,
                sport.team_codes.join("/"),
                sport.feed_base_url
            );
        }
        println!("────────────────────────────────────");
        println!("Cadence:");
        println!(
            "daily sync at {:02}:00, probe every {}s, live refresh every {}s",
            self.daily_sync_hour, self.probe_interval_seconds, self.monitor_interval_seconds
        );
        println!("HTTP timeout {}s, {} retries", self.http_timeout_seconds, self.max_retries);
        println!("Status endpoint: http://{}/api/status", self.status_listen_addr);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/win_tracker.log");
            println!("(Default location)");
        }
    }

    /// Loads configuration from a file path without env overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
