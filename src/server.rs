//! HTTP status endpoint served while the schedules run.
//!
//! `GET /api/status` answers for the first configured sport and
//! `GET /api/status/:sport` for any configured sport key.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::GameStateStore;
use crate::error::AppError;
use crate::status::query_status;

/// State shared by the status handlers
#[derive(Clone)]
pub struct StatusServerState {
    pub store: Arc<GameStateStore>,
    pub config: Arc<Config>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router(state: StatusServerState) -> Router {
    Router::new()
        .route("/api/status", get(default_status_handler))
        .route("/api/status/:sport", get(sport_status_handler))
        .with_state(state)
}

/// Serves the status endpoint on `addr` until the task is aborted.
pub async fn serve(addr: SocketAddr, state: StatusServerState) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    info!("Status endpoint listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn default_status_handler(State(state): State<StatusServerState>) -> Response {
    match state.config.sports.first() {
        Some(sport) => status_response(&state, &sport.key),
        None => error_response(StatusCode::NOT_FOUND, "no sports configured".to_string()),
    }
}

async fn sport_status_handler(
    State(state): State<StatusServerState>,
    Path(sport): Path<String>,
) -> Response {
    status_response(&state, &sport)
}

fn status_response(state: &StatusServerState, selector: &str) -> Response {
    debug!("Status requested for {}", selector);
    match query_status(&state.store, &state.config, selector) {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e @ AppError::UnknownSport(_)) => error_response(StatusCode::NOT_FOUND, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
