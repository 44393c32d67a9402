//! Payment URL service: product id → provider payment URL, with an
//! app-store fallback when the provider cannot serve the request.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{middleware::from_fn, routing::get, Router};
use service_core::middleware::{
    metrics_middleware, request_logging_middleware, server_headers_middleware,
};
use tower_http::trace::TraceLayer;

use config::ResponseMode;
use services::{Database, PaymentService};

#[derive(Clone)]
pub struct AppState {
    pub payment: PaymentService,
    pub response_mode: ResponseMode,
    /// Present when the catalog lives in Postgres; probed by `/ready`.
    pub database: Option<Database>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/api/v1/payment/url", get(handlers::payment::payment_url))
        .with_state(state)
        .layer(from_fn(request_logging_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the response time covers every other layer.
        .layer(from_fn(server_headers_middleware))
}
