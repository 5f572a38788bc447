//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use parish_core::types::ReservationId;
use parish_entity::{
    DayType, PaymentMethod, Price, Reservation, ReservationStatus, SlotAvailability, StatusCount,
    time_of_day,
};
use parish_service::DayAvailability;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success response that also carries a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MessageResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// One offered time on the requested date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTime {
    /// `HH:MM`.
    pub time: String,
    pub location: String,
    /// 0 means unlimited.
    pub capacity: i32,
    pub is_available: bool,
    pub reservations_count: i64,
    /// Seats left; `null` when unlimited.
    pub remaining: Option<i64>,
}

impl From<&SlotAvailability> for AvailableTime {
    fn from(entry: &SlotAvailability) -> Self {
        Self {
            time: time_of_day::format(&entry.slot.time_of_day),
            location: entry.slot.location.clone(),
            capacity: entry.slot.capacity,
            is_available: entry.is_available(),
            reservations_count: entry.reservations_count,
            remaining: entry.slot.remaining(entry.reservations_count),
        }
    }
}

/// Summary of an availability answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityMeta {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub total_times: usize,
    pub available_times: usize,
}

/// `GET /api/reservations/available-times` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub success: bool,
    pub data: Vec<AvailableTime>,
    pub meta: AvailabilityMeta,
}

impl From<DayAvailability> for AvailableTimesResponse {
    fn from(day: DayAvailability) -> Self {
        let meta = AvailabilityMeta {
            date: day.date,
            day_type: day.day_type,
            total_times: day.slots.len(),
            available_times: day.available_count(),
        };
        Self {
            success: true,
            data: day.slots.iter().map(AvailableTime::from).collect(),
            meta,
        }
    }
}

/// `POST /api/reservations` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedResponse {
    pub success: bool,
    pub message: String,
    pub reservation_id: ReservationId,
    pub confirmation_code: String,
    pub status: ReservationStatus,
    pub price: Price,
}

impl From<Reservation> for ReservationCreatedResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            success: true,
            message: "Reservation created successfully".to_string(),
            reservation_id: reservation.id,
            confirmation_code: reservation.confirmation_code,
            status: reservation.status,
            price: reservation.price,
        }
    }
}

/// What a requester may see when looking up their own confirmation code.
/// Contact details are left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusView {
    pub confirmation_code: String,
    pub date: NaiveDate,
    /// `HH:MM`.
    pub time: String,
    pub location: String,
    pub mass_type_code: String,
    pub status: ReservationStatus,
    pub payment_method: PaymentMethod,
    pub payment_verified: bool,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationStatusView {
    fn from(r: Reservation) -> Self {
        Self {
            confirmation_code: r.confirmation_code,
            date: r.date,
            time: time_of_day::format(&r.time),
            location: r.location,
            mass_type_code: r.mass_type_code,
            status: r.status,
            payment_method: r.payment_method,
            payment_verified: r.payment_verified,
            price: r.price,
            created_at: r.created_at,
        }
    }
}

/// Echo of a deleted reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedReservation {
    pub id: ReservationId,
    pub confirmation_code: String,
}

/// Reservation counts per status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStats {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
}

impl From<Vec<StatusCount>> for ReservationStats {
    fn from(by_status: Vec<StatusCount>) -> Self {
        Self {
            total: by_status.iter().map(|c| c.count).sum(),
            by_status,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// `connected` or `in-memory`.
    pub database: String,
    /// Database round-trip time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
}
