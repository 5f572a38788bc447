//! Store traits the services are written against.
//!
//! [`crate::repositories`] implements them over PostgreSQL and
//! [`crate::memory::MemoryStore`] in process.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use parish_core::result::AppResult;
use parish_core::types::{PageRequest, PageResponse, ReservationId, SlotId};
use parish_entity::{
    CreateMassType, CreateSlot, DayType, MassType, NewReservation, Reservation, ReservationFilter,
    ReservationUpdate, Slot, StatusCount, UpdateMassType, UpdateSlot,
};

/// Name of the unique constraint on confirmation codes.
pub const CONFIRMATION_CODE_CONSTRAINT: &str = "reservations_confirmation_code_key";

/// Produces candidate confirmation codes.
pub trait CodeSource: Send + Sync {
    /// Return a fresh candidate code.
    fn next_code(&self) -> String;
}

/// A validated booking, ready for the transactional write.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    /// Requester data.
    pub reservation: NewReservation,
    /// Day-type derived from the reservation date.
    pub day_type: DayType,
    /// Creation timestamp.
    pub now: DateTime<Utc>,
    /// How many confirmation codes to try before giving up.
    pub code_attempts: u32,
}

/// Slot catalog persistence.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Slots, optionally restricted to one day-type and to active ones,
    /// ordered by display order then time.
    async fn list_slots(&self, day_type: Option<DayType>, active_only: bool)
        -> AppResult<Vec<Slot>>;

    /// Find a slot by id.
    async fn find_slot(&self, id: SlotId) -> AppResult<Option<Slot>>;

    /// Insert a slot.
    async fn create_slot(&self, input: CreateSlot) -> AppResult<Slot>;

    /// Apply a partial update. `None` when the slot does not exist.
    async fn update_slot(&self, id: SlotId, update: UpdateSlot) -> AppResult<Option<Slot>>;
}

/// Mass type catalog persistence.
#[async_trait]
pub trait MassTypeStore: Send + Sync {
    /// Mass types ordered by display order.
    async fn list_mass_types(&self, active_only: bool) -> AppResult<Vec<MassType>>;

    /// Find a mass type by code, active or not.
    async fn find_mass_type(&self, code: &str) -> AppResult<Option<MassType>>;

    /// Insert a mass type.
    async fn create_mass_type(&self, input: CreateMassType) -> AppResult<MassType>;

    /// Apply a partial update. `None` when the code does not exist.
    async fn update_mass_type(
        &self,
        code: &str,
        update: UpdateMassType,
    ) -> AppResult<Option<MassType>>;
}

/// Reservation persistence, including the atomic booking write.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Non-cancelled reservation counts per time on `date`.
    async fn live_counts(&self, date: NaiveDate) -> AppResult<Vec<(NaiveTime, i64)>>;

    /// Atomically re-check availability, snapshot the price, allocate a
    /// confirmation code and insert the reservation.
    ///
    /// Fails with `Availability` when the slot is not offered or full,
    /// `NotFound` when the mass type is unknown or inactive.
    async fn book(&self, draft: BookingDraft, codes: &dyn CodeSource) -> AppResult<Reservation>;

    /// Find by id.
    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Find by confirmation code.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Reservation>>;

    /// Newest first, filtered and paginated.
    async fn list(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>>;

    /// Apply a staff update under a row lock, enforcing the status
    /// transition table. `None` when the reservation does not exist.
    async fn update(
        &self,
        id: ReservationId,
        update: &ReservationUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Reservation>>;

    /// Hard delete, returning the removed row.
    async fn delete(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Reservation counts grouped by status.
    async fn count_by_status(&self) -> AppResult<Vec<StatusCount>>;
}
