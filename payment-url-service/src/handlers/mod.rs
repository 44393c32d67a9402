//! HTTP handlers for payment-url-service.

pub mod payment;

use crate::{services::get_metrics, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "payment-url-service" })),
    )
}

/// Ready once the catalog database answers; always ready without one.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if let Some(db) = &state.database {
        db.health_check().await.map_err(|e| {
            tracing::warn!(error = %e, "Readiness check failed");
            AppError::ServiceUnavailable
        })?;
    }

    Ok((StatusCode::OK, Json(json!({ "status": "ready" }))))
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
