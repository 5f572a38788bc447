//! Staff endpoints. Mounted behind the admin token check.

pub mod mass_types;
pub mod reservations;
pub mod slots;
