//! Date → day-type → slots → live counts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_database::{ReservationStore, SlotStore};
use parish_entity::{DayType, SlotAvailability};

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(AppError::validation("Date must use the YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Date must use the YYYY-MM-DD format"))
}

/// Availability of every offered slot on one date.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    /// The requested date.
    pub date: NaiveDate,
    /// Day-type derived from the date.
    pub day_type: DayType,
    /// Offered slots, in display order.
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    /// Number of slots that can take another reservation.
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_available()).count()
    }
}

/// Read-only availability queries.
#[derive(Clone)]
pub struct AvailabilityResolver {
    slots: Arc<dyn SlotStore>,
    reservations: Arc<dyn ReservationStore>,
}

impl AvailabilityResolver {
    /// Creates a new availability resolver.
    pub fn new(slots: Arc<dyn SlotStore>, reservations: Arc<dyn ReservationStore>) -> Self {
        Self {
            slots,
            reservations,
        }
    }

    /// Resolve availability for a raw `YYYY-MM-DD` string.
    pub async fn resolve_str(&self, raw: &str) -> AppResult<DayAvailability> {
        self.resolve(parse_date(raw)?).await
    }

    /// Resolve availability for `date`. A day with no configured slots
    /// yields an empty list.
    pub async fn resolve(&self, date: NaiveDate) -> AppResult<DayAvailability> {
        let day_type = DayType::for_date(date);
        let slots = self.slots.list_slots(Some(day_type), true).await?;
        let counts: HashMap<_, _> = self
            .reservations
            .live_counts(date)
            .await?
            .into_iter()
            .collect();

        // Duplicate active slots for one time: the lowest display order wins.
        let mut seen = HashSet::new();
        let slots: Vec<SlotAvailability> = slots
            .into_iter()
            .filter(|slot| seen.insert(slot.time_of_day))
            .map(|slot| SlotAvailability {
                reservations_count: counts.get(&slot.time_of_day).copied().unwrap_or(0),
                slot,
            })
            .collect();

        debug!(%date, %day_type, slots = slots.len(), "Resolved availability");
        Ok(DayAvailability {
            date,
            day_type,
            slots,
        })
    }
}
