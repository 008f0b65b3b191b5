//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default number of retries for transient feed failures (timeouts, 429, 5xx)
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Initial backoff between retries in milliseconds; doubles on every attempt
pub const RETRY_INITIAL_BACKOFF_MS: u64 = 250;

/// Upper bound on a server-requested `Retry-After` wait, in seconds
pub const MAX_RETRY_AFTER_SECONDS: u64 = 60;

/// Default listen address of the status endpoint
pub const DEFAULT_STATUS_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Scheduling cadences, all in seconds unless noted otherwise
pub mod schedule {
    /// How often the "should monitoring start?" probe runs
    pub const PROBE_INTERVAL_SECONDS: u64 = 5 * 60;

    /// How often a live game's detail is refreshed while monitoring
    pub const MONITOR_INTERVAL_SECONDS: u64 = 5 * 60;

    /// Delay between a game turning final and the follow-up schedule sync
    pub const SETTLE_DELAY_SECONDS: u64 = 5;

    /// Local hour of the daily schedule sync
    pub const DAILY_SYNC_HOUR: u32 = 8;
}

/// Feed vocabulary
pub mod feed {
    /// Status name the feed reports for a game in progress
    pub const STATUS_IN_PROGRESS: &str = "STATUS_IN_PROGRESS";

    /// Competitor side marker for the home team
    pub const HOME_SIDE: &str = "home";

    /// Regular season phase identifier
    pub const PHASE_REGULAR_SEASON: u32 = 2;

    /// Postseason phase identifier
    pub const PHASE_POSTSEASON: u32 = 3;

    /// Score used when the feed omits one or renders a placeholder
    pub const DEFAULT_SCORE: &str = "0";
}

/// Environment variable names
pub mod env_vars {
    /// Override for the log file path
    pub const LOG_FILE: &str = "WIN_TRACKER_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "WIN_TRACKER_HTTP_TIMEOUT";

    /// Override for the status endpoint listen address
    pub const STATUS_ADDR: &str = "WIN_TRACKER_STATUS_ADDR";
}
