//! PostgreSQL implementations of the store traits.

pub mod mass_type;
pub mod reservation;
pub mod slot;

pub use mass_type::MassTypeRepository;
pub use reservation::ReservationRepository;
pub use slot::SlotRepository;
