mod common;

use async_trait::async_trait;
use common::*;
use payment_url_service::models::{Provider, ProviderName, StoreName};
use payment_url_service::services::{
    CatalogError, FileProviderResolver, PaymentError, PaymentProvider, ProviderCatalog,
};
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn seeded_providers_resolve_to_their_urls() {
    let service = payment_service(seeded_catalog(), asset("stores.json"));

    let cases = [
        (APPLE_PAY_ID, "https://apple-pay-gateway.apple.com"),
        (GOOGLE_PAY_ID, "https://google.com/pay"),
        (PAY_PAL_ID, "https://www.paypal.com/pay"),
        (STRIPE_ID, "https://stripe.com/pay"),
    ];

    for (id, expected) in cases {
        let url = service.payment_url(id).await.expect("Failed to resolve url");
        assert_eq!(url, expected, "product {}", id);
    }
}

#[tokio::test]
async fn sentinel_provider_fails_on_the_provider_side() {
    let service = payment_service(seeded_catalog(), asset("stores.json"));

    let result = service.payment_url(INVALID_PROVIDER_ID).await;
    assert_eq!(result, Err(PaymentError::Provider));
}

#[tokio::test]
async fn unseeded_id_is_not_found() {
    let service = payment_service(seeded_catalog(), asset("stores.json"));

    assert_eq!(service.payment_url(UNSEEDED_ID).await, Err(PaymentError::NotFound));
    assert_eq!(
        service.payment_url(&Uuid::new_v4().to_string()).await,
        Err(PaymentError::NotFound)
    );
}

/// Counts every call, valid id or not; never validates on its own.
#[derive(Default)]
struct CountingCatalog {
    calls: AtomicUsize,
}

#[async_trait]
impl ProviderCatalog for CountingCatalog {
    async fn fetch_by_id(&self, _id: &str) -> Result<Provider, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CatalogError::NotFound)
    }
}

#[tokio::test]
async fn malformed_ids_are_rejected_without_a_lookup() {
    let catalog = Arc::new(CountingCatalog::default());
    let service = payment_service(catalog.clone(), asset("stores.json"));

    for id in [
        "ab23bd-123efa4b1",
        "not-a-uuid",
        "f369447079e546c2bcabcad4750cdbcc",
        "{f3694470-79e5-46c2-bcab-cad4750cdbcc}",
    ] {
        assert_eq!(
            service.payment_url(id).await,
            Err(PaymentError::UuidInvalidFormat),
            "id {:?}",
            id
        );
    }

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);

    assert_eq!(service.payment_url(UNSEEDED_ID).await, Err(PaymentError::NotFound));
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn backend_failure_is_unexpected() {
    let service = payment_service(Arc::new(UnavailableCatalog), asset("stores.json"));

    assert_eq!(service.payment_url(STRIPE_ID).await, Err(PaymentError::Unexpected));
}

#[tokio::test]
async fn stores_are_listed_in_fixed_order() {
    let service = payment_service(seeded_catalog(), asset("stores.json"));

    let urls = service.stores_urls().await.expect("Failed to list stores");

    assert_eq!(urls.len(), 2);
    for (position, store) in StoreName::ALL.into_iter().enumerate() {
        assert_eq!(urls[position].store, store);
    }
    assert_eq!(urls[0].url, APPLE_STORE_URL);
    assert_eq!(urls[1].url, PLAY_MARKET_URL);
}

#[tokio::test]
async fn missing_stores_file_fails_on_the_store_side() {
    let service = payment_service(seeded_catalog(), asset("missing-stores.json"));

    assert_eq!(service.stores_urls().await, Err(PaymentError::Store));
}

#[tokio::test]
async fn resolver_matches_the_static_file_for_every_provider() {
    let raw = std::fs::read_to_string(asset("providers.json")).unwrap();
    let table: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let resolver = FileProviderResolver::new(asset("providers.json"));
    let key = Secret::new("test_api_key".to_string());
    let secret = Secret::new("test_secret".to_string());

    for (name, field) in ProviderName::ALL
        .into_iter()
        .zip(["apple_pay", "google_pay", "pay_pal", "stripe"])
    {
        let url = resolver
            .payment_url(name.as_str(), &key, &secret)
            .await
            .unwrap();
        assert_eq!(url, table[field].as_str().unwrap());
    }
}
