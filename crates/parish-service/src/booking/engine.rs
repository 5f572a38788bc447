//! Reservation intake.

use std::sync::Arc;

use tracing::{info, warn};

use parish_core::config::BookingConfig;
use parish_core::error::ErrorKind;
use parish_core::result::AppResult;
use parish_core::traits::Clock;
use parish_database::{BookingDraft, ReservationStore};
use parish_entity::{DayType, Reservation};

use super::code::ConfirmationCodeGenerator;
use super::notifier::ReservationNotifier;
use super::validation::{BookingRequest, validate_booking};
use crate::context::RequestContext;

/// Validates booking requests and hands them to the store's atomic write.
#[derive(Clone)]
pub struct BookingEngine {
    reservations: Arc<dyn ReservationStore>,
    notifier: Arc<dyn ReservationNotifier>,
    clock: Arc<dyn Clock>,
    codes: ConfirmationCodeGenerator,
    config: BookingConfig,
}

impl BookingEngine {
    /// Creates a new booking engine.
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        notifier: Arc<dyn ReservationNotifier>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Self {
        let codes = ConfirmationCodeGenerator::new(
            &config.confirmation_prefix,
            config.confirmation_suffix_length,
            clock.clone(),
        );
        Self {
            reservations,
            notifier,
            clock,
            codes,
            config,
        }
    }

    /// Validate and persist a reservation. The write is attempted once.
    pub async fn book(
        &self,
        request: BookingRequest,
        ctx: &RequestContext,
    ) -> AppResult<Reservation> {
        let reservation = validate_booking(
            request,
            self.clock.today(),
            self.config.min_intention_length,
            ctx,
        )?;
        let (date, time) = (reservation.date, reservation.time);

        let draft = BookingDraft {
            day_type: DayType::for_date(date),
            reservation,
            now: self.clock.now(),
            code_attempts: self.config.confirmation_code_attempts,
        };

        let created = match self.reservations.book(draft, &self.codes).await {
            Ok(created) => created,
            Err(e) => {
                if e.kind == ErrorKind::Availability {
                    warn!(%date, %time, client_ip = ctx.ip_or_unknown(), reason = %e.message, "Booking rejected");
                }
                return Err(e);
            }
        };

        info!(
            reservation_id = %created.id,
            confirmation_code = %created.confirmation_code,
            %date,
            %time,
            status = %created.status,
            price = %created.price,
            "Reservation created"
        );

        self.notifier.reservation_created(&created).await;
        Ok(created)
    }
}
