//! Resolves product ids into payment URLs, with the app-store fallback.

use crate::models::{parse_product_id, StoreName, StoreUrl};
use crate::services::catalog::{CatalogError, ProviderCatalog};
use crate::services::resolvers::{AppStores, PaymentProvider};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, instrument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("uuid has invalid format")]
    UuidInvalidFormat,

    #[error("record not found")]
    NotFound,

    #[error("something happened on the provider side")]
    Provider,

    #[error("something happened on the stores side")]
    Store,

    #[error("unexpected error")]
    Unexpected,
}

#[derive(Clone)]
pub struct PaymentService {
    catalog: Arc<dyn ProviderCatalog>,
    provider: Arc<dyn PaymentProvider>,
    stores: Arc<dyn AppStores>,
}

impl PaymentService {
    pub fn new(
        catalog: Arc<dyn ProviderCatalog>,
        provider: Arc<dyn PaymentProvider>,
        stores: Arc<dyn AppStores>,
    ) -> Self {
        Self {
            catalog,
            provider,
            stores,
        }
    }

    /// Payment URL of the provider registered under `product_id`.
    ///
    /// Resolver failures of any kind collapse to `Provider`, which callers
    /// answer with [`stores_urls`](Self::stores_urls).
    #[instrument(skip(self))]
    pub async fn payment_url(&self, product_id: &str) -> Result<String, PaymentError> {
        // Checked here as well as in the catalog so that no implementation
        // is ever queried with a malformed id.
        if parse_product_id(product_id).is_none() {
            error!(product_id = %product_id, "Failed to validate product id");
            return Err(PaymentError::UuidInvalidFormat);
        }

        let provider = self.catalog.fetch_by_id(product_id).await.map_err(|e| {
            error!(product_id = %product_id, error = %e, "Failed to fetch provider by id");
            match e {
                CatalogError::NotFound => PaymentError::NotFound,
                CatalogError::UuidInvalidFormat => PaymentError::UuidInvalidFormat,
                CatalogError::Backend(_) => PaymentError::Unexpected,
            }
        })?;

        self.provider
            .payment_url(&provider.name, &provider.api_key, &provider.secret)
            .await
            .map_err(|e| {
                error!(provider = %provider.name, error = %e, "Failed to get url from provider");
                PaymentError::Provider
            })
    }

    /// URLs of every store hosting the app, in `StoreName::ALL` order.
    #[instrument(skip(self))]
    pub async fn stores_urls(&self) -> Result<Vec<StoreUrl>, PaymentError> {
        let mut urls = Vec::with_capacity(StoreName::ALL.len());

        for store in StoreName::ALL {
            let url = self.stores.app_url(store).await.map_err(|e| {
                error!(store = %store, error = %e, "Failed to get url from store");
                PaymentError::Store
            })?;
            urls.push(StoreUrl { store, url });
        }

        Ok(urls)
    }
}
