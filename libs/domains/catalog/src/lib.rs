//! Catalog Domain
//!
//! Categories and statuses are both plain named lookups, so one set of
//! models, storage and handlers serves each table. [`CatalogKind`] picks the
//! collection and the wording of error messages.
//!
//! ```rust,ignore
//! let categories = handlers::router(CatalogService::new(MongoCatalogRepository::categories(&db)));
//! let statuses = handlers::router(CatalogService::new(MongoCatalogRepository::statuses(&db)));
//!
//! Router::new()
//!     .nest("/categories", categories)
//!     .nest("/statuses", statuses)
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryCatalogRepository;
pub use models::{CatalogEntry, CatalogKind, CreateCatalogEntry};
pub use mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
