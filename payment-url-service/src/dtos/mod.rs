use crate::models::StoreUrl;
use axum::http::StatusCode;
use serde::Serialize;

pub const MISSING_PRODUCT_ID: &str = "Missing productID parameter";
pub const BAD_FORMAT: &str = "Provided parameter has bad format";
pub const SOMETHING_WENT_WRONG: &str = "Oops, something went wrong";

pub const PRODUCT_ID_PARAM: &str = "productID";

/// Query of `GET /api/v1/payment/url`.
///
/// Built from the raw query pairs: a repeated `productID` keeps its first
/// value and unrelated keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PaymentUrlQuery {
    pub product_id: Option<String>,
}

impl From<Vec<(String, String)>> for PaymentUrlQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            product_id: pairs
                .into_iter()
                .find(|(key, _)| key == PRODUCT_ID_PARAM)
                .map(|(_, value)| value),
        }
    }
}

/// Envelope of every payment-url response.
///
/// `code` carries the semantic status; exactly one of `data`,
/// `stores_urls` or `message` is present.
#[derive(Debug, Serialize)]
pub struct PaymentUrlResponse {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stores_urls: Option<Vec<StoreUrl>>,
}

impl PaymentUrlResponse {
    pub fn url(url: String) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: Some(url),
            message: None,
            stores_urls: None,
        }
    }

    pub fn stores(urls: Vec<StoreUrl>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: None,
            message: None,
            stores_urls: Some(urls),
        }
    }

    pub fn error(code: StatusCode, message: &str) -> Self {
        Self {
            code: code.as_u16(),
            data: None,
            message: Some(message.to_string()),
            stores_urls: None,
        }
    }
}
