//! Per-date slot availability.

pub mod resolver;

pub use resolver::{AvailabilityResolver, DayAvailability, parse_date};
