#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use payment_url_service::config::{
    AssetsConfig, DatabaseConfig, Environment, PaymentConfig, ResponseMode,
};
use payment_url_service::models::Provider;
use payment_url_service::services::{
    CatalogError, FileProviderResolver, FileStoreResolver, InMemoryProviderCatalog,
    PaymentService, ProviderCatalog,
};
use payment_url_service::startup::Application;
use payment_url_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CommonConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const APPLE_PAY_ID: &str = "f3694470-79e5-46c2-bcab-cad4750cdbcc";
pub const GOOGLE_PAY_ID: &str = "3754705b-842a-4d53-a7e5-cbf8025a5ddb";
pub const PAY_PAL_ID: &str = "b6b37fd9-5cd9-4e07-8975-08e42a09f723";
pub const STRIPE_ID: &str = "39251d76-1b3c-470d-969d-c7dade716d97";
pub const INVALID_PROVIDER_ID: &str = "22881d76-1b3c-470d-969d-c7dade716d97";
pub const UNSEEDED_ID: &str = "7626be3d-06ea-43d0-895c-dfbf017c7fff";

pub const APPLE_STORE_URL: &str =
    "https://apps.apple.com/us/app/headway-daily-book-summaries/id1457185832";
pub const PLAY_MARKET_URL: &str =
    "https://play.google.com/store/apps/details?id=com.headway.books&hl=pl&pli=1";

pub fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(name)
}

/// The five seed rows, with fixed ids.
pub fn seeded_providers() -> Vec<Provider> {
    [
        (APPLE_PAY_ID, "ApplePay"),
        (GOOGLE_PAY_ID, "GooglePay"),
        (PAY_PAL_ID, "PayPal"),
        (STRIPE_ID, "Stripe"),
        (INVALID_PROVIDER_ID, "InvalidProvider"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name))| {
        Provider::new(
            Uuid::parse_str(id).unwrap(),
            name,
            &format!("api_key_{}", i),
            &format!("secret_{}", i),
        )
    })
    .collect()
}

pub fn seeded_catalog() -> Arc<InMemoryProviderCatalog> {
    Arc::new(InMemoryProviderCatalog::new(seeded_providers()))
}

/// Catalog whose storage is always down.
pub struct UnavailableCatalog;

#[async_trait]
impl ProviderCatalog for UnavailableCatalog {
    async fn fetch_by_id(&self, _id: &str) -> Result<Provider, CatalogError> {
        Err(CatalogError::Backend(sqlx::Error::PoolTimedOut))
    }
}

pub fn payment_service(catalog: Arc<dyn ProviderCatalog>, stores_file: PathBuf) -> PaymentService {
    PaymentService::new(
        catalog,
        Arc::new(FileProviderResolver::new(asset("providers.json"))),
        Arc::new(FileStoreResolver::new(stores_file)),
    )
}

pub fn router_with(
    catalog: Arc<dyn ProviderCatalog>,
    stores_file: PathBuf,
    response_mode: ResponseMode,
) -> Router {
    build_router(AppState {
        payment: payment_service(catalog, stores_file),
        response_mode,
        database: None,
    })
}

pub fn router(response_mode: ResponseMode) -> Router {
    router_with(seeded_catalog(), asset("stores.json"), response_mode)
}

pub fn test_config() -> PaymentConfig {
    PaymentConfig {
        common: CommonConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        environment: Environment::Development,
        service_name: "payment-url-service-test".to_string(),
        log_level: "debug".to_string(),
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            name: "postgres".to_string(),
            password: Secret::new("postgres".to_string()),
            max_connections: 2,
        },
        assets: AssetsConfig {
            provider_file_path: asset("providers.json"),
            stores_file_path: asset("stores.json"),
        },
        response_mode: ResponseMode::Compat,
        shutdown_grace: Duration::from_secs(5),
    }
}

/// Issue a GET against the router and decode the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("host", "payments.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).expect("Failed to parse JSON");

    (status, headers, json)
}

pub fn payment_uri(product_id: &str) -> String {
    format!("/api/v1/payment/url?productID={}", product_id)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Serve the in-memory router on a random local port.
    pub async fn spawn() -> Self {
        let config = test_config();
        let app = Application::with_router(&config, router(ResponseMode::Compat))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            app.run_until_stopped(async {
                rx.await.ok();
            })
            .await
            .ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            shutdown: Some(tx),
        }
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}
