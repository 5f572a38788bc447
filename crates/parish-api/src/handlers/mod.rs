//! Route handlers.

pub mod admin;
pub mod health;
pub mod mass_types;
pub mod reservations;
