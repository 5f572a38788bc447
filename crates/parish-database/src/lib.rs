//! # parish-database
//!
//! PostgreSQL connection management, migrations, the store traits the
//! services depend on, and two implementations of them: the PostgreSQL
//! repositories and an in-process store.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{MassTypeRepository, ReservationRepository, SlotRepository};
pub use store::{BookingDraft, CodeSource, MassTypeStore, ReservationStore, SlotStore};
