//! Read-only provider catalog.

use crate::models::{parse_product_id, Provider, ProviderRecord};
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::{error, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("uuid has invalid format")]
    UuidInvalidFormat,

    #[error("record is not found")]
    NotFound,

    #[error("catalog backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Lookup of provider records by product id.
#[async_trait]
pub trait ProviderCatalog: Send + Sync {
    /// Returns the single record whose primary key is `id`.
    ///
    /// Malformed ids fail with `UuidInvalidFormat` before any storage access.
    async fn fetch_by_id(&self, id: &str) -> Result<Provider, CatalogError>;
}

/// Catalog backed by the `providers` table.
#[derive(Clone)]
pub struct PgProviderCatalog {
    pool: PgPool,
}

impl PgProviderCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderCatalog for PgProviderCatalog {
    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: &str) -> Result<Provider, CatalogError> {
        let id = parse_product_id(id).ok_or(CatalogError::UuidInvalidFormat)?;

        let record = sqlx::query_as::<_, ProviderRecord>(
            r#"
            SELECT id, name, api_key, secret
            FROM providers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match record {
            Ok(Some(record)) => Ok(record.into()),
            Ok(None) | Err(sqlx::Error::RowNotFound) => {
                warn!(product_id = %id, "Provider not found");
                Err(CatalogError::NotFound)
            }
            Err(e) => {
                error!(product_id = %id, error = %e, "Failed to fetch provider by id");
                Err(CatalogError::Backend(e))
            }
        }
    }
}

/// Catalog held in memory; used for tests and local runs without Postgres.
#[derive(Default)]
pub struct InMemoryProviderCatalog {
    providers: HashMap<Uuid, Provider>,
    lookups: AtomicUsize,
}

impl InMemoryProviderCatalog {
    pub fn new(providers: impl IntoIterator<Item = Provider>) -> Self {
        Self {
            providers: providers
                .into_iter()
                .map(|provider| (provider.id, provider))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of lookups that reached storage (i.e. passed id validation).
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderCatalog for InMemoryProviderCatalog {
    async fn fetch_by_id(&self, id: &str) -> Result<Provider, CatalogError> {
        let id = parse_product_id(id).ok_or(CatalogError::UuidInvalidFormat)?;
        self.lookups.fetch_add(1, Ordering::SeqCst);

        self.providers
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}
