//! # parish-service
//!
//! Business logic for the parish booking service. Each service is built
//! from `Arc` handles to the store traits in `parish-database`, so the
//! same code runs against PostgreSQL or the in-memory store.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod context;
pub mod reservation;

pub use availability::{AvailabilityResolver, DayAvailability};
pub use booking::{BookingEngine, BookingRequest, LogNotifier, ReservationNotifier};
pub use catalog::CatalogService;
pub use context::RequestContext;
pub use reservation::ReservationService;
