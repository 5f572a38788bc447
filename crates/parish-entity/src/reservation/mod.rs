//! Reservation domain entities.

pub mod model;
pub mod status;

pub use model::{NewReservation, Reservation, ReservationFilter, ReservationUpdate, StatusCount};
pub use status::{PaymentMethod, ReservationStatus};
