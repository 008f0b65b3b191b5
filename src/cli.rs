use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use std::net::SocketAddr;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Team result tracker
///
/// Keeps each configured sport's last result and next game in sync with the
/// schedule feed, and follows games live while they are being played.
///
/// By default it runs until interrupted:
/// - Syncs every sport's schedule at startup and once a day
/// - Checks every few minutes whether the next game has started
/// - Refreshes the live score while a game is on, and re-syncs after it ends
/// - Answers `GET /api/status/<sport>` with the sport's status JSON
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Sync every sport once, print their status as JSON and exit.
    #[arg(short, long)]
    pub once: bool,

    /// Only track the sport with this key (e.g. "basketball").
    #[arg(long = "sport", short = 's', value_name = "KEY")]
    pub sport: Option<String>,

    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", short = 'c', value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Serve the status endpoint on this address instead of the configured one.
    #[arg(long = "listen", value_name = "ADDR", help_heading = "Configuration")]
    pub listen: Option<SocketAddr>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Logging")]
    pub log_file: Option<String>,

    /// Log at debug level. With --once, logs are also shown in the terminal.
    #[arg(long = "debug", help_heading = "Logging")]
    pub debug: bool,

    /// Only log to the log file, never to the terminal.
    #[arg(long = "quiet", short = 'q', help_heading = "Logging")]
    pub quiet: bool,
}

/// Whether log lines should also go to stdout.
///
/// `--once` keeps stdout clean for its JSON output unless `--debug` is set.
pub fn logs_to_stdout(args: &Args) -> bool {
    !args.quiet && (!args.once || args.debug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["win_tracker", "--once", "--sport", "football"]);
        assert!(args.once);
        assert_eq!(args.sport.as_deref(), Some("football"));
        assert!(args.config.is_none());
        assert!(args.listen.is_none());
    }

    #[test]
    fn test_parse_listen_address() {
        let args = Args::parse_from(["win_tracker", "--listen", "0.0.0.0:8080"]);
        assert_eq!(args.listen, Some("0.0.0.0:8080".parse().unwrap()));
        assert!(Args::try_parse_from(["win_tracker", "--listen", "nowhere"]).is_err());
    }

    #[test]
    fn test_logs_to_stdout() {
        let daemon = Args::parse_from(["win_tracker"]);
        assert!(logs_to_stdout(&daemon));

        let once = Args::parse_from(["win_tracker", "--once"]);
        assert!(!logs_to_stdout(&once));

        let once_debug = Args::parse_from(["win_tracker", "--once", "--debug"]);
        assert!(logs_to_stdout(&once_debug));

        let quiet = Args::parse_from(["win_tracker", "--debug", "--quiet"]);
        assert!(!logs_to_stdout(&quiet));
    }
}
