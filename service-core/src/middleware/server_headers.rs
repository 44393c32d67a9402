use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const SERVER_NAME_HEADER: &str = "x-server-name";
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Stamps `X-Server-Name` (the request's Host) and `X-Response-Time`
/// (elapsed microseconds) on every response.
///
/// The response head returned by `next` has not been written to the socket
/// yet; hyper flushes it after this layer returns, so the elapsed time is
/// measured at header-flush time and the body is never buffered.
pub async fn server_headers_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let server_name = req
        .headers()
        .get(header::HOST)
        .cloned()
        .or_else(|| {
            req.uri()
                .authority()
                .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
        })
        .unwrap_or_else(|| HeaderValue::from_static(""));

    let mut response = next.run(req).await;

    let elapsed_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
    let headers = response.headers_mut();
    headers.insert(SERVER_NAME_HEADER, server_name);
    headers.insert(RESPONSE_TIME_HEADER, HeaderValue::from(elapsed_micros));

    response
}
