//! Application startup and lifecycle management.

use crate::config::PaymentConfig;
use crate::services::{
    Database, FileProviderResolver, FileStoreResolver, PaymentService, PgProviderCatalog,
};
use crate::{build_router, AppState};
use axum::Router;
use service_core::error::AppError;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    shutdown_grace: Duration,
}

impl Application {
    /// Connect the catalog, bootstrap it, wire the services and bind the listener.
    pub async fn build(config: PaymentConfig) -> Result<Self, AppError> {
        let database = Database::connect(&config.database).await?;

        database.bootstrap().await?;
        for provider in database.list_providers().await? {
            tracing::info!(id = %provider.id, name = %provider.name, "Product");
        }

        let payment = PaymentService::new(
            Arc::new(PgProviderCatalog::new(database.pool().clone())),
            Arc::new(FileProviderResolver::new(
                config.assets.provider_file_path.clone(),
            )),
            Arc::new(FileStoreResolver::new(config.assets.stores_file_path.clone())),
        );

        let state = AppState {
            payment,
            response_mode: config.response_mode,
            database: Some(database),
        };

        Self::with_router(&config, build_router(state)).await
    }

    /// Bind the configured address for an already-built router.
    pub async fn with_router(config: &PaymentConfig, router: Router) -> Result<Self, AppError> {
        let addr = config.common.address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(service = %config.service_name, port, "Listening");

        Ok(Self {
            port,
            listener,
            router,
            shutdown_grace: config.shutdown_grace,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until `shutdown` resolves, then let in-flight requests drain for
    /// at most the configured grace period before dropping them.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stopping_tx, mut stopping_rx) = watch::channel(false);
        let signal = async move {
            shutdown.await;
            let _ = stopping_tx.send(true);
        };

        let server = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => return result.map_err(AppError::from),
            _ = stopping_rx.changed() => {}
        }

        tracing::info!(grace = ?self.shutdown_grace, "Draining in-flight requests");
        match tokio::time::timeout(self.shutdown_grace, server).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                tracing::warn!("Grace period elapsed, aborting in-flight requests");
                Ok(())
            }
        }
    }
}
