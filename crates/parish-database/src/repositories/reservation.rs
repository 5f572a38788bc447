//! Reservation repository and the transactional booking write.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{Connection, PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{debug, warn};

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_core::types::{PageRequest, PageResponse, ReservationId};
use parish_entity::{
    MassType, NewReservation, Price, Reservation, ReservationFilter, ReservationStatus,
    ReservationUpdate, Slot, StatusCount,
};

use crate::error::{is_unique_violation_on, translate, translate_booking};
use crate::store::{BookingDraft, CONFIRMATION_CODE_CONSTRAINT, CodeSource, ReservationStore};

/// PostgreSQL-backed reservation store.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ReservationFilter) {
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some(date) = filter.date {
        query.push(" AND reservation_date = ").push_bind(date);
    }
}

async fn insert_reservation(
    conn: &mut PgConnection,
    input: &NewReservation,
    location: &str,
    price: Price,
    status: ReservationStatus,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Reservation, sqlx::Error> {
    sqlx::query_as::<_, Reservation>(
        "INSERT INTO reservations (\
            id, reservation_date, reservation_time, location, first_name, last_name, \
            national_id, phone, email, mass_type_code, intention, deceased_names, notes, \
            price_cents, payment_method, proof_of_payment_url, payment_verified, status, \
            confirmation_code, client_ip, user_agent, created_at, updated_at\
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                   FALSE, $17, $18, $19, $20, $21, $21) \
         RETURNING *",
    )
    .bind(ReservationId::new())
    .bind(input.date)
    .bind(input.time)
    .bind(location)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.national_id)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.mass_type_code)
    .bind(&input.intention)
    .bind(&input.deceased_names)
    .bind(&input.notes)
    .bind(price)
    .bind(input.payment_method)
    .bind(&input.proof_of_payment_url)
    .bind(status)
    .bind(code)
    .bind(&input.client_ip)
    .bind(&input.user_agent)
    .bind(now)
    .fetch_one(conn)
    .await
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn live_counts(&self, date: NaiveDate) -> AppResult<Vec<(NaiveTime, i64)>> {
        sqlx::query_as::<_, (NaiveTime, i64)>(
            "SELECT reservation_time, COUNT(*) FROM reservations \
             WHERE reservation_date = $1 AND status <> 'cancelled' \
             GROUP BY reservation_time",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| translate("Failed to count reservations", e))
    }

    async fn book(&self, draft: BookingDraft, codes: &dyn CodeSource) -> AppResult<Reservation> {
        let input = &draft.reservation;
        let booking_err = |e| translate_booking("Failed to create reservation", e);

        // Dropping `tx` on any early return rolls the whole booking back.
        // The slot row lock orders bookers of the same slot. Under READ
        // COMMITTED the count below sees rows the previous holder committed.
        let mut tx = self.pool.begin().await.map_err(booking_err)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
            .execute(&mut *tx)
            .await
            .map_err(booking_err)?;

        let slot = sqlx::query_as::<_, Slot>(
            "SELECT * FROM mass_slots \
             WHERE day_type = $1 AND time_of_day = $2 AND active \
             ORDER BY display_order, created_at LIMIT 1 FOR UPDATE",
        )
        .bind(draft.day_type)
        .bind(input.time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(booking_err)?
        .ok_or_else(|| AppError::availability("The selected time is not offered on that date"))?;

        let booked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE reservation_date = $1 AND reservation_time = $2 AND status <> 'cancelled'",
        )
        .bind(input.date)
        .bind(input.time)
        .fetch_one(&mut *tx)
        .await
        .map_err(booking_err)?;

        if !slot.has_room(booked) {
            return Err(AppError::availability("The selected time is fully booked"));
        }

        let mass_type = sqlx::query_as::<_, MassType>(
            "SELECT * FROM mass_types WHERE code = $1 AND active",
        )
        .bind(&input.mass_type_code)
        .fetch_optional(&mut *tx)
        .await
        .map_err(booking_err)?
        .ok_or_else(|| AppError::not_found("Invalid mass type"))?;

        let status = ReservationStatus::initial_for(input.payment_method);

        let mut created = None;
        for attempt in 1..=draft.code_attempts.max(1) {
            let code = codes.next_code();
            let mut savepoint = Connection::begin(&mut *tx).await.map_err(booking_err)?;
            let result = insert_reservation(
                &mut *savepoint,
                input,
                &slot.location,
                mass_type.price,
                status,
                &code,
                draft.now,
            )
            .await;

            match result {
                Ok(row) => {
                    savepoint.commit().await.map_err(booking_err)?;
                    created = Some(row);
                    break;
                }
                Err(e) if is_unique_violation_on(&e, CONFIRMATION_CODE_CONSTRAINT) => {
                    warn!(attempt, code = %code, "Confirmation code collision, retrying");
                    savepoint.rollback().await.map_err(booking_err)?;
                }
                Err(e) => return Err(booking_err(e)),
            }
        }

        let reservation = created.ok_or_else(|| {
            AppError::internal("Could not allocate a unique confirmation code")
        })?;

        tx.commit().await.map_err(booking_err)?;

        debug!(
            reservation_id = %reservation.id,
            booked = booked + 1,
            capacity = slot.capacity,
            "Reservation committed"
        );
        Ok(reservation)
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate("Failed to find reservation", e))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE confirmation_code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate("Failed to find reservation by code", e))
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reservations WHERE TRUE");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate("Failed to count reservations", e))?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM reservations WHERE TRUE");
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let items = query
            .build_query_as::<Reservation>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| translate("Failed to list reservations", e))?;

        Ok(PageResponse::new(items, page, total.max(0) as u64))
    }

    async fn update(
        &self,
        id: ReservationId,
        update: &ReservationUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Reservation>> {
        let update_err = |e| translate("Failed to update reservation", e);
        let mut tx = self.pool.begin().await.map_err(update_err)?;

        let current: Option<ReservationStatus> =
            sqlx::query_scalar("SELECT status FROM reservations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(update_err)?;
        let Some(current) = current else {
            return Ok(None);
        };
        update.check_transition(current)?;

        let row = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET \
                status = COALESCE($2, status), \
                payment_verified = COALESCE($3, payment_verified), \
                admin_notes = COALESCE($4, admin_notes), \
                confirmed_by = COALESCE($5, confirmed_by), \
                confirmed_at = CASE \
                    WHEN $2::reservation_status = 'confirmed' AND status <> 'confirmed' THEN $6 \
                    ELSE confirmed_at END, \
                updated_at = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.status)
        .bind(update.payment_verified)
        .bind(&update.admin_notes)
        .bind(&update.confirmed_by)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(update_err)?;

        tx.commit().await.map_err(update_err)?;
        Ok(Some(row))
    }

    async fn delete(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("DELETE FROM reservations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate("Failed to delete reservation", e))
    }

    async fn count_by_status(&self) -> AppResult<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM reservations GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| translate("Failed to count reservations by status", e))
    }
}
