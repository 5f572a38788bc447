//! Reservation entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parish_core::types::ReservationId;
use parish_core::{AppError, AppResult};

use super::status::{PaymentMethod, ReservationStatus};
use crate::price::Price;

/// A booked mass intention.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Internal identifier.
    pub id: ReservationId,
    /// Day of the mass.
    #[sqlx(rename = "reservation_date")]
    pub date: NaiveDate,
    /// Start time of the mass.
    #[sqlx(rename = "reservation_time")]
    #[serde(with = "crate::time_of_day")]
    pub time: NaiveTime,
    /// Location copied from the slot.
    pub location: String,
    /// Requester given name.
    pub first_name: String,
    /// Requester family name.
    pub last_name: String,
    /// 8-digit national identity number.
    pub national_id: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Mass type code at booking time.
    pub mass_type_code: String,
    /// Intention text read during mass.
    pub intention: String,
    /// Names of the deceased, for memorial masses.
    pub deceased_names: Option<String>,
    /// Free-form notes from the requester.
    pub notes: Option<String>,
    /// Price snapshot taken from the mass type when booked.
    #[sqlx(rename = "price_cents")]
    pub price: Price,
    /// Claimed payment method.
    pub payment_method: PaymentMethod,
    /// Reference to a proof of payment, if provided.
    pub proof_of_payment_url: Option<String>,
    /// Set by staff once the payment has been checked.
    pub payment_verified: bool,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Human-shareable confirmation code.
    pub confirmation_code: String,
    /// Requesting client address.
    pub client_ip: Option<String>,
    /// Requesting client user agent.
    pub user_agent: Option<String>,
    /// Staff notes.
    pub admin_notes: Option<String>,
    /// Staff member who confirmed.
    pub confirmed_by: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the reservation entered `confirmed`.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Requester full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Everything the booking engine writes for a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    /// Day of the mass.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Requester given name.
    pub first_name: String,
    /// Requester family name.
    pub last_name: String,
    /// National identity number.
    pub national_id: String,
    /// Phone.
    pub phone: String,
    /// Email.
    pub email: String,
    /// Mass type code.
    pub mass_type_code: String,
    /// Intention text.
    pub intention: String,
    /// Names of the deceased.
    pub deceased_names: Option<String>,
    /// Requester notes.
    pub notes: Option<String>,
    /// Claimed payment method.
    pub payment_method: PaymentMethod,
    /// Proof-of-payment reference.
    pub proof_of_payment_url: Option<String>,
    /// Client address.
    pub client_ip: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

/// Staff-side partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    /// New lifecycle state.
    pub status: Option<ReservationStatus>,
    /// Payment verification flag.
    pub payment_verified: Option<bool>,
    /// Staff notes.
    pub admin_notes: Option<String>,
    /// Staff member confirming.
    pub confirmed_by: Option<String>,
}

impl ReservationUpdate {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.payment_verified.is_none()
            && self.admin_notes.is_none()
            && self.confirmed_by.is_none()
    }

    /// Reject a status change the transition table does not allow.
    pub fn check_transition(&self, current: ReservationStatus) -> AppResult<()> {
        match self.status {
            Some(next) if !current.can_transition_to(next) => Err(AppError::validation(format!(
                "Cannot change status from {current} to {next}"
            ))),
            _ => Ok(()),
        }
    }

    /// Apply the update to an in-memory row, stamping `confirmed_at` when
    /// the status moves into `confirmed`.
    pub fn apply_to(&self, reservation: &mut Reservation, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            if status == ReservationStatus::Confirmed
                && reservation.status != ReservationStatus::Confirmed
            {
                reservation.confirmed_at = Some(now);
            }
            reservation.status = status;
        }
        if let Some(verified) = self.payment_verified {
            reservation.payment_verified = verified;
        }
        if let Some(notes) = &self.admin_notes {
            reservation.admin_notes = Some(notes.clone());
        }
        if let Some(by) = &self.confirmed_by {
            reservation.confirmed_by = Some(by.clone());
        }
        reservation.updated_at = now;
    }
}

/// Staff listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Only this status.
    pub status: Option<ReservationStatus>,
    /// Only this date.
    pub date: Option<NaiveDate>,
}

impl ReservationFilter {
    /// Whether a reservation passes the filter.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.status.is_none_or(|s| reservation.status == s)
            && self.date.is_none_or(|d| reservation.date == d)
    }
}

/// Number of reservations in a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StatusCount {
    /// Status.
    pub status: ReservationStatus,
    /// Count.
    pub count: i64,
}
