//! Health endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{AppState, HealthResponse};

/// `GET /api/health`
///
/// Reports database connectivity. Answers `503` when the database is unreachable.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            database,
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
        .into_response()
}
