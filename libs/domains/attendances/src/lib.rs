//! Attendances Domain
//!
//! Registrations of users for events, unique per (event, user), and the
//! one-time check-in of a registered attendee.

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{AttendanceError, AttendanceResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryAttendanceRepository;
pub use models::{Attendance, AttendanceKey};
pub use mongodb::MongoAttendanceRepository;
pub use repository::AttendanceRepository;
pub use service::AttendanceService;
