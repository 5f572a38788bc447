//! Booking engine: validation, confirmation codes and the atomic write.

pub mod code;
pub mod engine;
pub mod notifier;
pub mod validation;

pub use code::ConfirmationCodeGenerator;
pub use engine::BookingEngine;
pub use notifier::{LogNotifier, ReservationNotifier};
pub use validation::{
    BookingRequest, is_valid_email, is_valid_national_id, validate_booking, validation_message,
};
