//! # parish-entity
//!
//! Domain entity models for the parish booking service. Every struct in
//! this crate represents a database table row or a domain value object.
//! Row types derive `sqlx::FromRow`; enums map onto PostgreSQL enum types.

pub mod mass_type;
pub mod price;
pub mod reservation;
pub mod slot;
pub mod time_of_day;

pub use mass_type::{CreateMassType, MassType, UpdateMassType};
pub use price::Price;
pub use reservation::{
    NewReservation, PaymentMethod, Reservation, ReservationFilter, ReservationStatus,
    ReservationUpdate, StatusCount,
};
pub use slot::{CreateSlot, DayType, Slot, SlotAvailability, UpdateSlot};
