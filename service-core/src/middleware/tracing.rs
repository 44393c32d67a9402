use axum::{extract::Request, middleware::Next, response::Response};

/// Logs every incoming request before dispatch. Nothing is logged on the
/// response side; the trace layer span covers that.
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    tracing::info!(
        method = %req.method(),
        path = %req.uri().path(),
        "Request"
    );

    next.run(req).await
}
