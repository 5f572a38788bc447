//! Slot entity model.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parish_core::types::SlotId;

use super::day_type::DayType;

/// A configured mass time offered on a given day-type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Unique slot identifier.
    pub id: SlotId,
    /// Day-type this slot is offered on.
    pub day_type: DayType,
    /// Time the mass starts.
    #[serde(with = "crate::time_of_day")]
    pub time_of_day: NaiveTime,
    /// Where the mass is celebrated.
    pub location: String,
    /// Maximum number of live reservations; 0 means unlimited.
    pub capacity: i32,
    /// Ordering in listings.
    pub display_order: i32,
    /// Whether the slot is currently offered.
    pub active: bool,
    /// When the slot was created.
    pub created_at: DateTime<Utc>,
    /// When the slot was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Slot {
    /// Whether the slot accepts any number of reservations.
    pub fn is_unlimited(&self) -> bool {
        self.capacity <= 0
    }

    /// Whether one more reservation fits given `booked` live ones.
    pub fn has_room(&self, booked: i64) -> bool {
        self.is_unlimited() || booked < i64::from(self.capacity)
    }

    /// Seats left, or `None` when unlimited.
    pub fn remaining(&self, booked: i64) -> Option<i64> {
        (!self.is_unlimited()).then(|| (i64::from(self.capacity) - booked).max(0))
    }
}

/// A slot together with its live reservation count on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// The slot.
    pub slot: Slot,
    /// Non-cancelled reservations on the date.
    pub reservations_count: i64,
}

impl SlotAvailability {
    /// Whether another reservation can be accepted.
    pub fn is_available(&self) -> bool {
        self.slot.has_room(self.reservations_count)
    }
}

/// Data required to create a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlot {
    /// Day-type.
    pub day_type: DayType,
    /// Start time.
    pub time_of_day: NaiveTime,
    /// Location.
    pub location: String,
    /// Capacity (0 = unlimited).
    pub capacity: i32,
    /// Display order.
    pub display_order: i32,
    /// Whether offered.
    pub active: bool,
}

/// Partial slot update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSlot {
    /// New location.
    pub location: Option<String>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New display order.
    pub display_order: Option<i32>,
    /// Activate or retire.
    pub active: Option<bool>,
}

impl UpdateSlot {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.capacity.is_none()
            && self.display_order.is_none()
            && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(capacity: i32) -> Slot {
        Slot {
            id: SlotId::new(),
            day_type: DayType::Sunday,
            time_of_day: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            location: "Main church".to_string(),
            capacity,
            display_order: 1,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unlimited_always_has_room() {
        let s = slot(0);
        assert!(s.has_room(0));
        assert!(s.has_room(10_000));
        assert_eq!(s.remaining(10_000), None);
    }

    #[test]
    fn test_capacity_bound() {
        let s = slot(2);
        assert!(s.has_room(1));
        assert!(!s.has_room(2));
        assert!(!s.has_room(3));
        assert_eq!(s.remaining(1), Some(1));
        assert_eq!(s.remaining(5), Some(0));
    }

    #[test]
    fn test_time_serializes_as_hh_mm() {
        let json = serde_json::to_value(slot(1)).expect("serialize");
        assert_eq!(json["timeOfDay"], "09:00");
        assert_eq!(json["dayType"], "sunday");
    }
}
