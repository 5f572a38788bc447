//! Staff-side reservation lifecycle.

use std::sync::Arc;

use tracing::info;

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_core::traits::Clock;
use parish_core::types::{PageRequest, PageResponse, ReservationId};
use parish_database::ReservationStore;
use parish_entity::{Reservation, ReservationFilter, ReservationStatus, ReservationUpdate, StatusCount};

use crate::context::RequestContext;

/// Reservation lookups, staff updates and deletion.
#[derive(Clone)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationStore>,
    clock: Arc<dyn Clock>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(reservations: Arc<dyn ReservationStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reservations,
            clock,
        }
    }

    /// Fetch a reservation by id.
    pub async fn get(&self, id: ReservationId) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    /// Fetch a reservation by confirmation code. Codes are matched
    /// case-insensitively by upper-casing the input.
    pub async fn get_by_code(&self, code: &str) -> AppResult<Reservation> {
        let code = code.trim().to_ascii_uppercase();
        self.reservations
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("No reservation with that confirmation code"))
    }

    /// Paginated staff listing, newest first.
    pub async fn list(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.reservations.list(filter, page).await
    }

    /// Apply a staff update. Only the supplied fields change.
    pub async fn update(
        &self,
        id: ReservationId,
        update: ReservationUpdate,
        ctx: &RequestContext,
    ) -> AppResult<Reservation> {
        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let updated = self
            .reservations
            .update(id, &update, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

        info!(
            target: "audit",
            action = "reservation.update",
            reservation_id = %id,
            status = %updated.status,
            payment_verified = updated.payment_verified,
            confirmed_by = updated.confirmed_by.as_deref().unwrap_or(""),
            client_ip = ctx.ip_or_unknown(),
            "Reservation updated"
        );
        Ok(updated)
    }

    /// Hard delete. Returns the removed reservation so callers can echo its
    /// confirmation code.
    pub async fn delete(&self, id: ReservationId, ctx: &RequestContext) -> AppResult<Reservation> {
        let removed = self
            .reservations
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

        info!(
            target: "audit",
            action = "reservation.delete",
            reservation_id = %id,
            confirmation_code = %removed.confirmation_code,
            client_ip = ctx.ip_or_unknown(),
            "Reservation deleted"
        );
        Ok(removed)
    }

    /// Counts for every status, zeros included, in lifecycle order.
    pub async fn stats(&self) -> AppResult<Vec<StatusCount>> {
        let counts = self.reservations.count_by_status().await?;
        Ok(ReservationStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: counts
                    .iter()
                    .find(|c| c.status == status)
                    .map_or(0, |c| c.count),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};
    use parish_core::ErrorKind;
    use parish_core::traits::FixedClock;
    use parish_database::{BookingDraft, CodeSource, MassTypeStore, MemoryStore, SlotStore};
    use parish_entity::{
        CreateMassType, CreateSlot, DayType, NewReservation, PaymentMethod, Price,
    };

    use super::*;

    struct OneCode(&'static str);

    impl CodeSource for OneCode {
        fn next_code(&self) -> String {
            self.0.to_string()
        }
    }

    async fn booked(store: &MemoryStore, code: &'static str) -> Reservation {
        let time = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
        if store.list_slots(None, false).await.expect("slots").is_empty() {
            store
                .create_slot(CreateSlot {
                    day_type: DayType::Sunday,
                    time_of_day: time,
                    location: "Main church".to_string(),
                    capacity: 0,
                    display_order: 1,
                    active: true,
                })
                .await
                .expect("slot");
            store
                .create_mass_type(CreateMassType {
                    code: "difuntos".to_string(),
                    name: "Memorial".to_string(),
                    description: None,
                    price: Price::from_cents(3500).expect("price"),
                    active: true,
                    display_order: 1,
                })
                .await
                .expect("mass type");
        }
        store
            .book(
                BookingDraft {
                    reservation: NewReservation {
                        date: NaiveDate::from_ymd_opt(2030, 6, 2).expect("valid date"),
                        time,
                        first_name: "José".to_string(),
                        last_name: "Huamán".to_string(),
                        national_id: "87654321".to_string(),
                        phone: "988776655".to_string(),
                        email: "jose@example.pe".to_string(),
                        mass_type_code: "difuntos".to_string(),
                        intention: "Eternal rest for our father".to_string(),
                        deceased_names: Some("Pedro Huamán".to_string()),
                        notes: None,
                        payment_method: PaymentMethod::Transfer,
                        proof_of_payment_url: Some("uploads/voucher-1.jpg".to_string()),
                        client_ip: None,
                        user_agent: None,
                    },
                    day_type: DayType::Sunday,
                    now: Utc::now(),
                    code_attempts: 1,
                },
                &OneCode(code),
            )
            .await
            .expect("booking")
    }

    fn service(store: Arc<MemoryStore>) -> (ReservationService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        (ReservationService::new(store, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_confirm_sets_confirmed_at_and_keeps_other_fields() {
        let store = Arc::new(MemoryStore::new());
        let original = booked(&store, "MISA-A-00001").await;
        let (service, clock) = service(store);
        clock.advance(Duration::minutes(5));

        let updated = service
            .update(
                original.id,
                ReservationUpdate {
                    status: Some(ReservationStatus::Confirmed),
                    ..Default::default()
                },
                &RequestContext::default(),
            )
            .await
            .expect("update");

        assert_eq!(updated.status, ReservationStatus::Confirmed);
        assert_eq!(updated.confirmed_at, Some(clock.now()));
        assert_eq!(updated.payment_verified, original.payment_verified);
        assert_eq!(updated.admin_notes, original.admin_notes);
        assert_eq!(updated.intention, original.intention);
        assert_eq!(updated.price, original.price);
    }

    #[tokio::test]
    async fn test_payment_verification_both_ways() {
        let store = Arc::new(MemoryStore::new());
        let original = booked(&store, "MISA-A-00002").await;
        let (service, _) = service(store);
        let ctx = RequestContext::default();

        for verified in [true, false] {
            let updated = service
                .update(
                    original.id,
                    ReservationUpdate {
                        payment_verified: Some(verified),
                        admin_notes: Some("voucher checked".to_string()),
                        ..Default::default()
                    },
                    &ctx,
                )
                .await
                .expect("update");
            assert_eq!(updated.payment_verified, verified);
            assert_eq!(updated.status, ReservationStatus::PaymentPending);
        }
    }

    #[tokio::test]
    async fn test_update_errors() {
        let store = Arc::new(MemoryStore::new());
        let original = booked(&store, "MISA-A-00003").await;
        let (service, _) = service(store);
        let ctx = RequestContext::default();

        let err = service
            .update(original.id, ReservationUpdate::default(), &ctx)
            .await
            .expect_err("empty update");
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .update(
                ReservationId::new(),
                ReservationUpdate {
                    status: Some(ReservationStatus::Cancelled),
                    ..Default::default()
                },
                &ctx,
            )
            .await
            .expect_err("unknown id");
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = service
            .update(
                original.id,
                ReservationUpdate {
                    status: Some(ReservationStatus::Completed),
                    ..Default::default()
                },
                &ctx,
            )
            .await
            .expect_err("payment_pending cannot complete");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.message,
            "Cannot change status from payment_pending to completed"
        );
    }

    #[tokio::test]
    async fn test_delete_and_lookup_by_code() {
        let store = Arc::new(MemoryStore::new());
        let original = booked(&store, "MISA-A-00004").await;
        let (service, _) = service(store);
        let ctx = RequestContext::default();

        let found = service.get_by_code("misa-a-00004").await.expect("lookup");
        assert_eq!(found.id, original.id);

        let removed = service.delete(original.id, &ctx).await.expect("delete");
        assert_eq!(removed.confirmation_code, "MISA-A-00004");

        let err = service.delete(original.id, &ctx).await.expect_err("gone");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(
            service.get(original.id).await.expect_err("gone").kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_stats_include_zero_counts() {
        let store = Arc::new(MemoryStore::new());
        booked(&store, "MISA-A-00005").await;
        booked(&store, "MISA-A-00006").await;
        let (service, _) = service(store);

        let stats = service.stats().await.expect("stats");
        assert_eq!(stats.len(), ReservationStatus::ALL.len());
        let pending = stats
            .iter()
            .find(|c| c.status == ReservationStatus::PaymentPending)
            .expect("present");
        assert_eq!(pending.count, 2);
        assert!(
            stats
                .iter()
                .filter(|c| c.status != ReservationStatus::PaymentPending)
                .all(|c| c.count == 0)
        );
    }
}
