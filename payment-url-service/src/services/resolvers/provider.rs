use super::{absolute_url, read_table, ResolverError};
use crate::models::ProviderName;
use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;

/// Produces the payment URL for a provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// `name` is the catalog's stored name; anything outside the closed
    /// provider set fails with `UnknownProvider`.
    async fn payment_url(
        &self,
        name: &str,
        api_key: &Secret<String>,
        secret: &Secret<String>,
    ) -> Result<String, ResolverError>;
}

/// Shape of the providers JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUrls {
    pub apple_pay: String,
    pub google_pay: String,
    pub pay_pal: String,
    pub stripe: String,
}

impl ProviderUrls {
    pub fn url_for(&self, name: ProviderName) -> &str {
        match name {
            ProviderName::ApplePay => &self.apple_pay,
            ProviderName::GooglePay => &self.google_pay,
            ProviderName::PayPal => &self.pay_pal,
            ProviderName::Stripe => &self.stripe,
        }
    }
}

/// Mock gateway integration: looks the URL up in a static JSON file.
#[derive(Debug, Clone)]
pub struct FileProviderResolver {
    file_path: PathBuf,
}

impl FileProviderResolver {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

#[async_trait]
impl PaymentProvider for FileProviderResolver {
    async fn payment_url(
        &self,
        name: &str,
        _api_key: &Secret<String>,
        _secret: &Secret<String>,
    ) -> Result<String, ResolverError> {
        let table: ProviderUrls = read_table(&self.file_path).await?;

        let provider: ProviderName = name
            .parse()
            .map_err(|_| ResolverError::UnknownProvider(name.to_string()))?;

        tracing::info!(provider = %provider, "Generating payment link");
        absolute_url(table.url_for(provider))
    }
}
