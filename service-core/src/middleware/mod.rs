pub mod metrics;
pub mod server_headers;
pub mod tracing;

pub use self::metrics::metrics_middleware;
pub use self::server_headers::{server_headers_middleware, RESPONSE_TIME_HEADER, SERVER_NAME_HEADER};
pub use self::tracing::request_logging_middleware;
