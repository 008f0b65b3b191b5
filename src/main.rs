// src/main.rs
mod cli;
mod logging;

use chrono::Utc;
use clap::Parser;
use cli::Args;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};
use win_tracker::config::{Config, SportConfig};
use win_tracker::data_fetcher::HttpFeed;
use win_tracker::engine::{GameStateStore, SchedulerSettings, run_once, run_sport};
use win_tracker::error::AppError;
use win_tracker::server::{self, StatusServerState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).await?;

    if args.list_config {
        let config_path = args.config.clone().unwrap_or_else(Config::get_config_path);
        config.display(&config_path);
        return Ok(());
    }

    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    info!(
        "{} {} starting, logging to {}",
        win_tracker::NAME,
        win_tracker::VERSION,
        log_file_path
    );

    let sports: Vec<&SportConfig> = match &args.sport {
        Some(selector) => vec![
            config
                .sport(selector)
                .ok_or_else(|| AppError::unknown_sport(selector))?,
        ],
        None => config.sports.iter().collect(),
    };

    let feed = Arc::new(HttpFeed::from_config(&config)?);
    let store = Arc::new(GameStateStore::from_config(&config));

    if args.once {
        let statuses = run_once(feed.as_ref(), &store, &sports, Utc::now()).await;
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    let listen_addr = match args.listen {
        Some(addr) => addr,
        None => config.status_socket_addr()?,
    };
    let settings = SchedulerSettings::from_config(&config);
    let mut tasks = JoinSet::new();
    for sport in sports {
        tasks.spawn(run_sport(
            Arc::clone(&feed),
            Arc::clone(&store),
            sport.clone(),
            settings,
        ));
    }

    let status_state = StatusServerState {
        store: Arc::clone(&store),
        config: Arc::new(config.clone()),
    };
    let mut status_server = tokio::spawn(server::serve(listen_addr, status_state));

    let mut outcome = Ok(());
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupted, stopping schedules");
        }
        Some(joined) = tasks.join_next() => {
            if let Err(e) = joined {
                error!("Sport task stopped unexpectedly: {e}");
            }
        }
        served = &mut status_server => {
            match served {
                Ok(Ok(())) => info!("Status endpoint closed"),
                Ok(Err(e)) => {
                    error!("Status endpoint failed: {e}");
                    outcome = Err(e);
                }
                Err(e) => error!("Status endpoint stopped unexpectedly: {e}"),
            }
        }
    }

    status_server.abort();
    tasks.abort_all();
    outcome
}
