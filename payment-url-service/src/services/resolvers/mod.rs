//! File-backed URL tables for payment providers and app stores.
//!
//! Both resolvers re-read their JSON document on every call, so edits to the
//! files are picked up without a restart.

mod provider;
mod store;

pub use provider::{FileProviderResolver, PaymentProvider, ProviderUrls};
pub use store::{AppStores, FileStoreResolver, StoreUrls};

use axum::http::Uri;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("unknown provider name: {0}")]
    UnknownProvider(String),

    #[error("unknown store name: {0}")]
    UnknownStore(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0:?} is not an absolute URL")]
    InvalidUrl(String),
}

async fn read_table<T: DeserializeOwned>(path: &Path) -> Result<T, ResolverError> {
    let raw = tokio::fs::read(path).await.map_err(|source| ResolverError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| ResolverError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn absolute_url(url: &str) -> Result<String, ResolverError> {
    match url.parse::<Uri>() {
        Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => Ok(url.to_string()),
        _ => Err(ResolverError::InvalidUrl(url.to_string())),
    }
}
