//! Reservation status and payment method enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Cash or in-person payment expected.
    Pending,
    /// Bank transfer claimed, awaiting staff verification.
    PaymentPending,
    /// Accepted by staff.
    Confirmed,
    /// Withdrawn; no longer occupies a seat.
    Cancelled,
    /// The mass has been celebrated.
    Completed,
}

impl ReservationStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ReservationStatus; 5] = [
        Self::Pending,
        Self::PaymentPending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Initial status for a freshly booked reservation.
    pub fn initial_for(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Transfer => Self::PaymentPending,
            _ => Self::Pending,
        }
    }

    /// Whether the reservation counts against slot capacity.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Staff transition table. Re-applying the current status is allowed.
    ///
    /// Terminal states never reopen: moving a cancelled reservation back to
    /// a live state would take a seat without going through the booking
    /// transaction's capacity check.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;

        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, PaymentPending | Confirmed | Cancelled)
                | (PaymentPending, Pending | Confirmed | Cancelled)
                | (Confirmed, Cancelled | Completed)
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PaymentPending => "payment_pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("unknown reservation status '{s}'"))
    }
}

/// Payment method claimed by the requester. Nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the parish office.
    Cash,
    /// Bank transfer; needs staff verification.
    Transfer,
    /// Paid in person on the day.
    InPerson,
    /// Yape mobile wallet.
    Yape,
    /// Plin mobile wallet.
    Plin,
}

impl PaymentMethod {
    /// Return the method as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::InPerson => "in_person",
            Self::Yape => "yape",
            Self::Plin => "plin",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cash" => Ok(Self::Cash),
            "transfer" => Ok(Self::Transfer),
            "in_person" => Ok(Self::InPerson),
            "yape" => Ok(Self::Yape),
            "plin" => Ok(Self::Plin),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}
