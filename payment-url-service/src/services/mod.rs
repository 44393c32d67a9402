pub mod catalog;
pub mod database;
pub mod metrics;
pub mod payment;
pub mod resolvers;

pub use catalog::{CatalogError, InMemoryProviderCatalog, PgProviderCatalog, ProviderCatalog};
pub use database::{BootstrapOutcome, Database};
pub use metrics::{get_metrics, init_metrics, record_outcome};
pub use payment::{PaymentError, PaymentService};
pub use resolvers::{AppStores, FileProviderResolver, FileStoreResolver, PaymentProvider, ResolverError};
