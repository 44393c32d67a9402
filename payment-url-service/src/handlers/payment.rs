//! `GET /api/v1/payment/url`.

use crate::{
    config::ResponseMode,
    dtos::{PaymentUrlQuery, PaymentUrlResponse, BAD_FORMAT, MISSING_PRODUCT_ID, SOMETHING_WENT_WRONG},
    services::{record_outcome, PaymentError},
    AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Payment URL for `productID`, or the app-store links when the provider
/// cannot serve it.
///
/// Internal error details are logged by the service and never echoed; the
/// client only sees the fixed envelope messages.
pub async fn payment_url(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Response {
    let mode = state.response_mode;
    let query = query
        .map(|Query(pairs)| PaymentUrlQuery::from(pairs))
        .unwrap_or_default();

    let product_id = match query.product_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::error!("Failed to retrieve 'productID' parameter");
            record_outcome("bad_request");
            return respond(
                mode,
                PaymentUrlResponse::error(StatusCode::BAD_REQUEST, MISSING_PRODUCT_ID),
            );
        }
    };

    let body = match state.payment.payment_url(&product_id).await {
        Ok(url) => {
            record_outcome("success");
            PaymentUrlResponse::url(url)
        }
        Err(PaymentError::UuidInvalidFormat | PaymentError::NotFound) => bad_format(),
        Err(PaymentError::Unexpected) => match mode {
            ResponseMode::Compat => bad_format(),
            ResponseMode::Strict => internal_error(),
        },
        Err(PaymentError::Provider) => match state.payment.stores_urls().await {
            Ok(urls) => {
                record_outcome("fallback");
                PaymentUrlResponse::stores(urls)
            }
            Err(_) => internal_error(),
        },
        Err(PaymentError::Store) => internal_error(),
    };

    respond(mode, body)
}

fn bad_format() -> PaymentUrlResponse {
    record_outcome("bad_request");
    PaymentUrlResponse::error(StatusCode::BAD_REQUEST, BAD_FORMAT)
}

fn internal_error() -> PaymentUrlResponse {
    record_outcome("error");
    PaymentUrlResponse::error(StatusCode::INTERNAL_SERVER_ERROR, SOMETHING_WENT_WRONG)
}

fn respond(mode: ResponseMode, body: PaymentUrlResponse) -> Response {
    let status = match mode {
        ResponseMode::Compat => StatusCode::BAD_REQUEST,
        ResponseMode::Strict => {
            StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    (status, Json(body)).into_response()
}
