use super::{absolute_url, read_table, ResolverError};
use crate::models::StoreName;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Produces the app-store URL of the mobile application.
#[async_trait]
pub trait AppStores: Send + Sync {
    async fn app_url(&self, store: StoreName) -> Result<String, ResolverError>;

    /// Resolve by raw store name; names outside the closed set fail with
    /// `UnknownStore`.
    async fn app_url_for(&self, name: &str) -> Result<String, ResolverError> {
        let store: StoreName = name
            .parse()
            .map_err(|_| ResolverError::UnknownStore(name.to_string()))?;
        self.app_url(store).await
    }
}

/// Shape of the stores JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreUrls {
    pub apple_store: String,
    pub play_market: String,
}

impl StoreUrls {
    pub fn url_for(&self, store: StoreName) -> &str {
        match store {
            StoreName::AppleStore => &self.apple_store,
            StoreName::PlayMarket => &self.play_market,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStoreResolver {
    file_path: PathBuf,
}

impl FileStoreResolver {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

#[async_trait]
impl AppStores for FileStoreResolver {
    async fn app_url(&self, store: StoreName) -> Result<String, ResolverError> {
        let table: StoreUrls = read_table(&self.file_path).await?;
        absolute_url(table.url_for(store))
    }
}
