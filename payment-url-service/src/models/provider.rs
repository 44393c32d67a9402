//! Provider catalog records and the closed set of payment providers.

use chrono::NaiveDateTime;
use secrecy::Secret;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the canonical hyphenated form, e.g. `f3694470-79e5-46c2-bcab-cad4750cdbcc`.
const PRODUCT_ID_LEN: usize = 36;

/// Parse a product identifier.
///
/// Only the 36-character hyphenated form is accepted; braced, URN and
/// simple (no hyphen) encodings are rejected.
pub fn parse_product_id(raw: &str) -> Option<Uuid> {
    if raw.len() != PRODUCT_ID_LEN {
        return None;
    }
    Uuid::try_parse(raw).ok()
}

/// Payment providers the URL resolver knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderName {
    ApplePay,
    GooglePay,
    PayPal,
    Stripe,
}

impl ProviderName {
    pub const ALL: [ProviderName; 4] = [
        ProviderName::ApplePay,
        ProviderName::GooglePay,
        ProviderName::PayPal,
        ProviderName::Stripe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::ApplePay => "ApplePay",
            ProviderName::GooglePay => "GooglePay",
            ProviderName::PayPal => "PayPal",
            ProviderName::Stripe => "Stripe",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Unknown provider name: {}", s))
    }
}

/// Row shape of `SELECT id, name, api_key, secret FROM providers`.
#[derive(Clone, FromRow)]
pub struct ProviderRecord {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub secret: String,
    #[sqlx(default)]
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl fmt::Debug for ProviderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A catalog entry.
///
/// `name` stays a string because the table also holds sentinel rows
/// (`InvalidProvider`) that must reach the resolver and fail there.
#[derive(Debug, Clone)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub api_key: Secret<String>,
    pub secret: Secret<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Provider {
    pub fn new(id: Uuid, name: impl Into<String>, api_key: &str, secret: &str) -> Self {
        Self {
            id,
            name: name.into(),
            api_key: Secret::new(api_key.to_string()),
            secret: Secret::new(secret.to_string()),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<ProviderRecord> for Provider {
    fn from(record: ProviderRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            api_key: Secret::new(record.api_key),
            secret: Secret::new(record.secret),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
