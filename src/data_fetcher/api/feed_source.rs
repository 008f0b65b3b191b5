//! The feed client seam: everything the engine needs from the outside world.

use reqwest::Client;
use std::future::Future;
use tracing::instrument;

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_schedule_url, build_summary_url};
use crate::config::{Config, SportConfig};
use crate::data_fetcher::models::{ScheduleResponse, SummaryResponse};
use crate::error::AppError;

/// Read-only access to the sports-data provider. Both calls are idempotent GETs.
pub trait FeedSource: Send + Sync {
    /// Schedule of the sport's monitored team for one season and phase.
    fn fetch_schedule(
        &self,
        sport: &SportConfig,
        season: i32,
        phase: u32,
    ) -> impl Future<Output = Result<ScheduleResponse, AppError>> + Send;

    /// Live detail of a single event.
    fn fetch_summary(
        &self,
        sport: &SportConfig,
        event_id: &str,
    ) -> impl Future<Output = Result<SummaryResponse, AppError>> + Send;
}

/// [`FeedSource`] over HTTP with retries for transient failures
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    max_retries: u32,
}

impl HttpFeed {
    pub fn new(client: Client, max_retries: u32) -> Self {
        Self {
            client,
            max_retries,
        }
    }

    /// Builds a feed client with the configured timeout and retry budget.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.max_retries))
    }
}

impl FeedSource for HttpFeed {
    #[instrument(skip(self, sport), fields(sport = %sport.key))]
    async fn fetch_schedule(
        &self,
        sport: &SportConfig,
        season: i32,
        phase: u32,
    ) -> Result<ScheduleResponse, AppError> {
        let url = build_schedule_url(&sport.feed_base_url, &sport.team_id, season, phase);
        fetch(&self.client, &url, self.max_retries).await
    }

    #[instrument(skip(self, sport), fields(sport = %sport.key))]
    async fn fetch_summary(
        &self,
        sport: &SportConfig,
        event_id: &str,
    ) -> Result<SummaryResponse, AppError> {
        let url = build_summary_url(&sport.feed_base_url, event_id);
        fetch(&self.client, &url, self.max_retries).await
    }
}
