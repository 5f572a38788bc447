//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_entity::{
    CreateMassType, CreateSlot, DayType, Price, ReservationFilter, ReservationStatus,
    ReservationUpdate, UpdateMassType, UpdateSlot, time_of_day,
};
use parish_service::BookingRequest;
use parish_service::availability::parse_date;

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_status(raw: &str) -> AppResult<ReservationStatus> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Unknown status '{}'", raw.trim())))
}

fn parse_day_type(raw: &str) -> AppResult<DayType> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Unknown day type '{}'", raw.trim())))
}

/// Public booking form. Every rule, including field sizes, is applied by
/// the booking engine in its fixed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `HH:MM`.
    pub time: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub mass_type_code: Option<String>,
    pub intention: Option<String>,
    pub deceased_names: Option<String>,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub proof_of_payment_ref: Option<String>,
}

impl From<CreateReservationRequest> for BookingRequest {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            date: req.date,
            time: req.time,
            first_name: req.first_name,
            last_name: req.last_name,
            national_id: req.national_id,
            phone: req.phone,
            email: req.email,
            mass_type_code: req.mass_type_code,
            intention: req.intention,
            deceased_names: req.deceased_names,
            notes: req.notes,
            payment_method: req.payment_method,
            proof_of_payment_ref: req.proof_of_payment_ref,
        }
    }
}

/// `?date=` on the availability endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableTimesQuery {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl AvailableTimesQuery {
    /// The raw date, or a validation error when absent.
    pub fn required_date(&self) -> AppResult<&str> {
        self.date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::validation("Query parameter 'date' is required"))
    }
}

/// Staff listing filters. Pagination is read separately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationListQuery {
    /// Status name.
    pub status: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl ReservationListQuery {
    /// Parse into a store filter. Blank values are ignored.
    pub fn into_filter(self) -> AppResult<ReservationFilter> {
        Ok(ReservationFilter {
            status: blank_to_none(self.status)
                .map(|s| parse_status(&s))
                .transpose()?,
            date: blank_to_none(self.date)
                .map(|d| parse_date(&d))
                .transpose()?,
        })
    }
}

/// Staff update body. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    /// New status name.
    pub status: Option<String>,
    pub payment_verified: Option<bool>,
    #[validate(length(max = 2000, message = "adminNotes must be at most 2000 characters"))]
    pub admin_notes: Option<String>,
    #[validate(length(max = 100, message = "confirmedBy must be at most 100 characters"))]
    pub confirmed_by: Option<String>,
}

impl UpdateReservationRequest {
    /// Parse into a store update.
    pub fn into_update(self) -> AppResult<ReservationUpdate> {
        Ok(ReservationUpdate {
            status: self.status.as_deref().map(parse_status).transpose()?,
            payment_verified: self.payment_verified,
            admin_notes: self.admin_notes,
            confirmed_by: self.confirmed_by.map(|c| c.trim().to_string()),
        })
    }
}

/// `?dayType=` on the staff slot listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotListQuery {
    pub day_type: Option<String>,
}

impl SlotListQuery {
    /// Parsed day-type filter.
    pub fn day_type(&self) -> AppResult<Option<DayType>> {
        self.day_type
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(parse_day_type)
            .transpose()
    }
}

/// New slot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub day_type: String,
    /// `HH:MM`.
    pub time: String,
    #[validate(length(min = 1, max = 200, message = "location must be 1 to 200 characters"))]
    pub location: String,
    /// 0 means unlimited.
    #[validate(range(min = 0, message = "capacity must be zero (unlimited) or positive"))]
    pub capacity: i32,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateSlotRequest {
    /// Parse into a catalog insert.
    pub fn into_create(self) -> AppResult<CreateSlot> {
        let time_of_day = time_of_day::parse(&self.time)
            .ok_or_else(|| AppError::validation("Time must use the HH:MM format"))?;
        Ok(CreateSlot {
            day_type: parse_day_type(&self.day_type)?,
            time_of_day,
            location: self.location,
            capacity: self.capacity,
            display_order: self.display_order,
            active: self.active,
        })
    }
}

/// Slot changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    #[validate(length(min = 1, max = 200, message = "location must be 1 to 200 characters"))]
    pub location: Option<String>,
    #[validate(range(min = 0, message = "capacity must be zero (unlimited) or positive"))]
    pub capacity: Option<i32>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

impl From<UpdateSlotRequest> for UpdateSlot {
    fn from(req: UpdateSlotRequest) -> Self {
        Self {
            location: req.location,
            capacity: req.capacity,
            display_order: req.display_order,
            active: req.active,
        }
    }
}

/// New mass type. `price` accepts `"40.00"` or `40`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMassTypeRequest {
    #[validate(length(min = 2, max = 50, message = "code must be 2 to 50 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl From<CreateMassTypeRequest> for CreateMassType {
    fn from(req: CreateMassTypeRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: blank_to_none(req.description),
            price: req.price,
            active: req.active,
            display_order: req.display_order,
        }
    }
}

/// Mass type changes. A new price only affects later bookings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMassTypeRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub price: Option<Price>,
    pub active: Option<bool>,
    pub display_order: Option<i32>,
}

impl From<UpdateMassTypeRequest> for UpdateMassType {
    fn from(req: UpdateMassTypeRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            active: req.active,
            display_order: req.display_order,
        }
    }
}
