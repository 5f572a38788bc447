//! Mass slot catalog entities.

pub mod day_type;
pub mod model;

pub use day_type::DayType;
pub use model::{CreateSlot, Slot, SlotAvailability, UpdateSlot};
