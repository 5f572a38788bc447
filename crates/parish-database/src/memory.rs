//! In-process implementation of every store trait.
//!
//! All state sits behind one async mutex, so the availability check and
//! the insert in [`ReservationStore::book`] happen under the same lock and
//! the capacity bound holds for concurrent callers.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_core::types::{PageRequest, PageResponse, ReservationId, SlotId};
use parish_entity::{
    CreateMassType, CreateSlot, DayType, MassType, Reservation, ReservationFilter,
    ReservationStatus, ReservationUpdate, Slot, StatusCount, UpdateMassType, UpdateSlot,
};

use crate::store::{BookingDraft, CodeSource, MassTypeStore, ReservationStore, SlotStore};

#[derive(Debug, Default)]
struct MemoryState {
    slots: Vec<Slot>,
    mass_types: BTreeMap<String, MassType>,
    reservations: Vec<Reservation>,
}

impl MemoryState {
    fn live_count(&self, date: NaiveDate, time: NaiveTime) -> i64 {
        self.reservations
            .iter()
            .filter(|r| r.date == date && r.time == time && r.status.occupies_seat())
            .count() as i64
    }

    fn offered_slot(&self, day_type: DayType, time: NaiveTime) -> Option<&Slot> {
        self.slots
            .iter()
            .filter(|s| s.active && s.day_type == day_type && s.time_of_day == time)
            .min_by_key(|s| (s.display_order, s.created_at))
    }
}

/// Store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn list_slots(
        &self,
        day_type: Option<DayType>,
        active_only: bool,
    ) -> AppResult<Vec<Slot>> {
        let state = self.state.lock().await;
        let mut slots: Vec<Slot> = state
            .slots
            .iter()
            .filter(|s| day_type.is_none_or(|d| s.day_type == d))
            .filter(|s| !active_only || s.active)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.day_type as u8, s.display_order, s.time_of_day));
        Ok(slots)
    }

    async fn find_slot(&self, id: SlotId) -> AppResult<Option<Slot>> {
        let state = self.state.lock().await;
        Ok(state.slots.iter().find(|s| s.id == id).cloned())
    }

    async fn create_slot(&self, input: CreateSlot) -> AppResult<Slot> {
        let now = Utc::now();
        let slot = Slot {
            id: SlotId::new(),
            day_type: input.day_type,
            time_of_day: input.time_of_day,
            location: input.location,
            capacity: input.capacity,
            display_order: input.display_order,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.slots.push(slot.clone());
        Ok(slot)
    }

    async fn update_slot(&self, id: SlotId, update: UpdateSlot) -> AppResult<Option<Slot>> {
        let mut state = self.state.lock().await;
        let Some(slot) = state.slots.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(location) = update.location {
            slot.location = location;
        }
        if let Some(capacity) = update.capacity {
            slot.capacity = capacity;
        }
        if let Some(display_order) = update.display_order {
            slot.display_order = display_order;
        }
        if let Some(active) = update.active {
            slot.active = active;
        }
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }
}

#[async_trait]
impl MassTypeStore for MemoryStore {
    async fn list_mass_types(&self, active_only: bool) -> AppResult<Vec<MassType>> {
        let state = self.state.lock().await;
        let mut types: Vec<MassType> = state
            .mass_types
            .values()
            .filter(|t| !active_only || t.active)
            .cloned()
            .collect();
        types.sort_by(|a, b| (a.display_order, &a.name).cmp(&(b.display_order, &b.name)));
        Ok(types)
    }

    async fn find_mass_type(&self, code: &str) -> AppResult<Option<MassType>> {
        Ok(self.state.lock().await.mass_types.get(code).cloned())
    }

    async fn create_mass_type(&self, input: CreateMassType) -> AppResult<MassType> {
        let mut state = self.state.lock().await;
        if state.mass_types.contains_key(&input.code) {
            return Err(AppError::conflict(
                "A record with the same unique value already exists",
            ));
        }
        let now = Utc::now();
        let mass_type = MassType {
            code: input.code,
            name: input.name,
            description: input.description,
            price: input.price,
            active: input.active,
            display_order: input.display_order,
            created_at: now,
            updated_at: now,
        };
        state
            .mass_types
            .insert(mass_type.code.clone(), mass_type.clone());
        Ok(mass_type)
    }

    async fn update_mass_type(
        &self,
        code: &str,
        update: UpdateMassType,
    ) -> AppResult<Option<MassType>> {
        let mut state = self.state.lock().await;
        let Some(mass_type) = state.mass_types.get_mut(code) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            mass_type.name = name;
        }
        if let Some(description) = update.description {
            mass_type.description = Some(description);
        }
        if let Some(price) = update.price {
            mass_type.price = price;
        }
        if let Some(active) = update.active {
            mass_type.active = active;
        }
        if let Some(display_order) = update.display_order {
            mass_type.display_order = display_order;
        }
        mass_type.updated_at = Utc::now();
        Ok(Some(mass_type.clone()))
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn live_counts(&self, date: NaiveDate) -> AppResult<Vec<(NaiveTime, i64)>> {
        let state = self.state.lock().await;
        let mut counts: HashMap<NaiveTime, i64> = HashMap::new();
        for r in state
            .reservations
            .iter()
            .filter(|r| r.date == date && r.status.occupies_seat())
        {
            *counts.entry(r.time).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn book(&self, draft: BookingDraft, codes: &dyn CodeSource) -> AppResult<Reservation> {
        let mut state = self.state.lock().await;
        let input = draft.reservation;

        let slot = state
            .offered_slot(draft.day_type, input.time)
            .cloned()
            .ok_or_else(|| AppError::availability("The selected time is not offered on that date"))?;

        if !slot.has_room(state.live_count(input.date, input.time)) {
            return Err(AppError::availability("The selected time is fully booked"));
        }

        let price = state
            .mass_types
            .get(&input.mass_type_code)
            .filter(|t| t.active)
            .map(|t| t.price)
            .ok_or_else(|| AppError::not_found("Invalid mass type"))?;

        let mut code = None;
        for attempt in 1..=draft.code_attempts.max(1) {
            let candidate = codes.next_code();
            if state
                .reservations
                .iter()
                .any(|r| r.confirmation_code == candidate)
            {
                warn!(attempt, code = %candidate, "Confirmation code collision, retrying");
                continue;
            }
            code = Some(candidate);
            break;
        }
        let confirmation_code = code
            .ok_or_else(|| AppError::internal("Could not allocate a unique confirmation code"))?;

        let reservation = Reservation {
            id: ReservationId::new(),
            date: input.date,
            time: input.time,
            location: slot.location,
            first_name: input.first_name,
            last_name: input.last_name,
            national_id: input.national_id,
            phone: input.phone,
            email: input.email,
            mass_type_code: input.mass_type_code,
            intention: input.intention,
            deceased_names: input.deceased_names,
            notes: input.notes,
            price,
            payment_method: input.payment_method,
            proof_of_payment_url: input.proof_of_payment_url,
            payment_verified: false,
            status: ReservationStatus::initial_for(input.payment_method),
            confirmation_code,
            client_ip: input.client_ip,
            user_agent: input.user_agent,
            admin_notes: None,
            confirmed_by: None,
            created_at: draft.now,
            updated_at: draft.now,
            confirmed_at: None,
        };
        state.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().await;
        Ok(state.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().await;
        Ok(state
            .reservations
            .iter()
            .find(|r| r.confirmation_code == code)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Reservation> = state
            .reservations
            .iter()
            .filter(|r| filter.matches(r))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn update(
        &self,
        id: ReservationId,
        update: &ReservationUpdate,
        now: chrono::DateTime<Utc>,
    ) -> AppResult<Option<Reservation>> {
        let mut state = self.state.lock().await;
        let Some(reservation) = state.reservations.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        update.check_transition(reservation.status)?;
        update.apply_to(reservation, now);
        Ok(Some(reservation.clone()))
    }

    async fn delete(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let mut state = self.state.lock().await;
        let position = state.reservations.iter().position(|r| r.id == id);
        Ok(position.map(|i| state.reservations.remove(i)))
    }

    async fn count_by_status(&self) -> AppResult<Vec<StatusCount>> {
        let state = self.state.lock().await;
        Ok(ReservationStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let count = state
                    .reservations
                    .iter()
                    .filter(|r| r.status == status)
                    .count() as i64;
                (count > 0).then_some(StatusCount { status, count })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::Duration;
    use parish_entity::{NewReservation, PaymentMethod, Price};

    use super::*;

    struct SequentialCodes(AtomicU32);

    impl CodeSource for SequentialCodes {
        fn next_code(&self) -> String {
            format!("MISA-TEST-{:05}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    struct FixedCode;

    impl CodeSource for FixedCode {
        fn next_code(&self) -> String {
            "MISA-SAME-00000".to_string()
        }
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).expect("valid time")
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 2).expect("valid date")
    }

    async fn seeded(capacity: i32) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_slot(CreateSlot {
                day_type: DayType::Sunday,
                time_of_day: nine(),
                location: "Main church".to_string(),
                capacity,
                display_order: 1,
                active: true,
            })
            .await
            .expect("slot");
        store
            .create_mass_type(CreateMassType {
                code: "accion_gracias".to_string(),
                name: "Thanksgiving".to_string(),
                description: None,
                price: Price::from_cents(4000).expect("price"),
                active: true,
                display_order: 1,
            })
            .await
            .expect("mass type");
        store
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            reservation: NewReservation {
                date: sunday(),
                time: nine(),
                first_name: "Ana".to_string(),
                last_name: "Quispe".to_string(),
                national_id: "12345678".to_string(),
                phone: "999888777".to_string(),
                email: "ana@example.com".to_string(),
                mass_type_code: "accion_gracias".to_string(),
                intention: "For the health of the family".to_string(),
                deceased_names: None,
                notes: None,
                payment_method: PaymentMethod::Cash,
                proof_of_payment_url: None,
                client_ip: None,
                user_agent: None,
            },
            day_type: DayType::Sunday,
            now: Utc::now(),
            code_attempts: 3,
        }
    }

    #[tokio::test]
    async fn test_concurrent_bookings_respect_capacity() {
        let store = Arc::new(seeded(3).await);
        let codes = Arc::new(SequentialCodes(AtomicU32::new(0)));

        let attempts = (0..10).map(|_| {
            let store = store.clone();
            let codes = codes.clone();
            tokio::spawn(async move { store.book(draft(), codes.as_ref()).await })
        });
        let results = futures::future::join_all(attempts).await;

        let ok = results
            .iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();
        assert_eq!(ok, 3);
        assert_eq!(
            store.live_counts(sunday()).await.expect("counts"),
            vec![(nine(), 3)]
        );
    }

    #[tokio::test]
    async fn test_cancelled_reservations_free_a_seat() {
        let store = seeded(1).await;
        let codes = SequentialCodes(AtomicU32::new(0));
        let first = store.book(draft(), &codes).await.expect("first booking");

        let err = store.book(draft(), &codes).await.expect_err("slot full");
        assert_eq!(err.kind, parish_core::ErrorKind::Availability);

        let cancel = ReservationUpdate {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };
        store
            .update(first.id, &cancel, Utc::now())
            .await
            .expect("update")
            .expect("exists");
        store.book(draft(), &codes).await.expect("seat freed");
    }

    #[tokio::test]
    async fn test_code_collisions_exhaust_attempts() {
        let store = seeded(0).await;
        store.book(draft(), &FixedCode).await.expect("first code");
        let err = store
            .book(draft(), &FixedCode)
            .await
            .expect_err("same code every time");
        assert_eq!(err.kind, parish_core::ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_inactive_mass_type_is_not_found() {
        let store = seeded(0).await;
        store
            .update_mass_type(
                "accion_gracias",
                UpdateMassType {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        let codes = SequentialCodes(AtomicU32::new(0));
        let err = store.book(draft(), &codes).await.expect_err("inactive type");
        assert_eq!(err.kind, parish_core::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = seeded(0).await;
        let codes = SequentialCodes(AtomicU32::new(0));
        let mut older = draft();
        older.now -= Duration::hours(1);
        let first = store.book(older, &codes).await.expect("older");
        let second = store.book(draft(), &codes).await.expect("newer");

        let page = store
            .list(&ReservationFilter::default(), &PageRequest::new(1, 0))
            .await
            .expect("list");
        assert_eq!(page.total, 2);
        assert!(page.has_more);
        assert_eq!(page.items[0].id, second.id);

        let page = store
            .list(&ReservationFilter::default(), &PageRequest::new(10, 1))
            .await
            .expect("list");
        assert_eq!(page.items[0].id, first.id);
    }
}
