use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// App stores the mobile application is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreName {
    AppleStore,
    PlayMarket,
}

impl StoreName {
    /// Fallback responses list stores in exactly this order.
    pub const ALL: [StoreName; 2] = [StoreName::AppleStore, StoreName::PlayMarket];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreName::AppleStore => "AppleStore",
            StoreName::PlayMarket => "PlayMarket",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Unknown store name: {}", s))
    }
}

/// One store link; serialized as the single-entry object `{"AppleStore": "<url>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrl {
    pub store: StoreName,
    pub url: String,
}

impl Serialize for StoreUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.store.as_str(), &self.url)?;
        map.end()
    }
}
