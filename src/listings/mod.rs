pub mod cache;
pub mod error;
pub mod fields;
pub mod http;
pub mod models;
pub mod providers;
pub mod query;
pub mod reconcile;
pub mod service;

pub use cache::ListingsCache;
pub use error::ListingsError;
pub use models::ListingQuery;
pub use providers::build_provider;
pub use service::ListingsService;
