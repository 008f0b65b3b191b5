//! Generic HTTP fetching with retry logic and error classification

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::constants::{MAX_RETRY_AFTER_SECONDS, RETRY_INITIAL_BACKOFF_MS};
use crate::error::AppError;

/// Fetches `url` and decodes the JSON body into `T`.
///
/// - Maps non-success statuses and request failures onto [`AppError`]
/// - Retries errors that [`AppError::is_retryable`] accepts, up to
///   `max_retries` times with exponential backoff, honouring a capped `Retry-After`
/// - Distinguishes empty bodies, non-JSON bodies and unexpected structure
#[instrument(skip(client))]
pub(super) async fn fetch<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    max_retries: u32,
) -> Result<T, AppError> {
    debug!("Fetching feed URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(RETRY_INITIAL_BACKOFF_MS);
    let response = loop {
        let (error, retry_after) = match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => break resp,
            Ok(resp) => {
                let retry_after = resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string);
                (status_error(resp.status(), url), retry_after)
            }
            Err(e) => (request_error(e, url), None),
        };

        if !error.is_retryable() || attempt >= max_retries {
            return Err(error);
        }

        let wait = retry_wait(retry_after.as_deref(), backoff);
        warn!(
            "{}. Retrying in {:?} (attempt {}/{})",
            error,
            wait,
            attempt + 1,
            max_retries
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
        backoff = backoff.saturating_mul(2);
    };

    debug!("Response status: {}", response.status());

    let response_text = response.text().await.map_err(|e| {
        error!("Failed to read response body from {}: {}", url, e);
        AppError::ApiFetch(e)
    })?;

    debug!("Response length: {} bytes", response_text.len());

    serde_json::from_str::<T>(&response_text).map_err(|e| {
        let trimmed = response_text.trim_start();
        if trimmed.is_empty() {
            AppError::api_no_data("Response body is empty", url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            AppError::api_malformed_json("Response is not valid JSON", url)
        } else {
            AppError::api_unexpected_structure(e.to_string(), url)
        }
    })
}

fn status_error(status: StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");

    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

fn request_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Wait before the next attempt: `Retry-After` seconds when present, capped
/// so a sport's writer lane is never held for long, otherwise `backoff`.
fn retry_wait(retry_after: Option<&str>, backoff: Duration) -> Duration {
    retry_after
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECONDS)))
        .unwrap_or(backoff)
}
