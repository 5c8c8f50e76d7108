//! Events Domain
//!
//! Event storage in MongoDB guarded by scheduling rules.
//!
//! ```text
//! Handlers ─► Service ─┬─► conflict::check_conflicts (pure)
//!                      └─► Repository (MongoDB / in-memory)
//! ```
//!
//! A new event is refused when another event already has its name, when a
//! time-overlapping event sits within 1 km, or when its host already runs an
//! overlapping event.
//!
//! ```rust,no_run
//! use domain_events::{EventService, MongoEventRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoEventRepository::new(client.database("event_management"));
//! repository.create_indexes().await?;
//!
//! let router = handlers::router(EventService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod conflict;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use conflict::{CONFLICT_RADIUS_KM, Violation, check_conflicts};
pub use error::{EventError, EventResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use handlers::ApiDoc;
pub use memory::InMemoryEventRepository;
pub use models::{ConflictReport, CreateEvent, DEFAULT_ADDRESS, Event, EventFilter, UpdateEvent};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
