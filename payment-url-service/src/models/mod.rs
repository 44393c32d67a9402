pub mod provider;
pub mod store;

pub use provider::{parse_product_id, Provider, ProviderName, ProviderRecord};
pub use store::{StoreName, StoreUrl};
