//! Connection pool plus the one-shot schema/seed bootstrap.

use crate::config::DatabaseConfig;
use crate::models::{ProviderName, ProviderRecord};
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const CREATE_PROVIDERS_TABLE: &str = r#"
    CREATE TABLE providers (
        id UUID PRIMARY KEY,
        name VARCHAR(32) NOT NULL CHECK (name <> ''),
        api_key VARCHAR(255) NOT NULL,
        secret VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Row that no resolver recognises; requests for it take the store fallback.
pub const SENTINEL_PROVIDER: &str = "InvalidProvider";

const SEED_API_KEY: &str = "test_api_key";
const SEED_SECRET: &str = "test_secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Table was missing; created and seeded with this many rows.
    Seeded(usize),
    /// Table already existed; nothing was executed.
    AlreadyPresent,
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(host = %config.host, database = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(config.connect_options())
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Create and seed the `providers` table unless it already exists.
    ///
    /// Schema and seed rows run in a single transaction, so a failed seed
    /// leaves no half-created table behind.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass('providers') IS NOT NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to inspect schema: {}", e))
            })?;

        if exists {
            info!("providers table already exists, skipping seed");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        let mut tx = self.pool.begin().await?;

        info!("Creating providers table");
        sqlx::query(CREATE_PROVIDERS_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to create providers: {}", e))
            })?;

        let names = ProviderName::ALL
            .iter()
            .map(ProviderName::as_str)
            .chain(std::iter::once(SENTINEL_PROVIDER));

        let mut seeded = 0;
        for name in names {
            info!(name = %name, "Seeding provider");
            sqlx::query("INSERT INTO providers (id, name, api_key, secret) VALUES ($1, $2, $3, $4)")
                .bind(Uuid::new_v4())
                .bind(name)
                .bind(SEED_API_KEY)
                .bind(SEED_SECRET)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to seed {}: {}", name, e))
                })?;
            seeded += 1;
        }

        tx.commit().await?;

        info!(rows = seeded, "providers table seeded");
        Ok(BootstrapOutcome::Seeded(seeded))
    }

    /// Every catalog record, oldest first. Used to print usable product ids at startup.
    #[instrument(skip(self))]
    pub async fn list_providers(&self) -> Result<Vec<ProviderRecord>, AppError> {
        let providers = sqlx::query_as::<_, ProviderRecord>(
            r#"
            SELECT id, name, api_key, secret, created_at, updated_at
            FROM providers
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list providers: {}", e)))?;

        Ok(providers)
    }
}
