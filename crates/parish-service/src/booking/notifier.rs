//! Post-commit booking notification.

use async_trait::async_trait;
use tracing::info;

use parish_entity::Reservation;

/// Told about each reservation after it has been committed. Failures stay
/// inside the notifier; the booking has already succeeded.
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    /// A reservation was created.
    async fn reservation_created(&self, reservation: &Reservation);
}

/// Notifier that only writes a log line. No email or SMS is sent.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ReservationNotifier for LogNotifier {
    async fn reservation_created(&self, reservation: &Reservation) {
        info!(
            target: "notification",
            reservation_id = %reservation.id,
            confirmation_code = %reservation.confirmation_code,
            email = %reservation.email,
            "Would send booking confirmation"
        );
    }
}
