//! Slot catalog repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use parish_core::result::AppResult;
use parish_core::types::SlotId;
use parish_entity::{CreateSlot, DayType, Slot, UpdateSlot};

use crate::error::translate;
use crate::store::SlotStore;

/// PostgreSQL-backed slot catalog.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: PgPool,
}

impl SlotRepository {
    /// Create a new slot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for SlotRepository {
    async fn list_slots(
        &self,
        day_type: Option<DayType>,
        active_only: bool,
    ) -> AppResult<Vec<Slot>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM mass_slots WHERE TRUE");
        if let Some(day_type) = day_type {
            query.push(" AND day_type = ").push_bind(day_type);
        }
        if active_only {
            query.push(" AND active");
        }
        query.push(" ORDER BY day_type, display_order, time_of_day");

        query
            .build_query_as::<Slot>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| translate("Failed to list slots", e))
    }

    async fn find_slot(&self, id: SlotId) -> AppResult<Option<Slot>> {
        sqlx::query_as::<_, Slot>("SELECT * FROM mass_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate("Failed to find slot", e))
    }

    async fn create_slot(&self, input: CreateSlot) -> AppResult<Slot> {
        sqlx::query_as::<_, Slot>(
            "INSERT INTO mass_slots (id, day_type, time_of_day, location, capacity, display_order, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(SlotId::new())
        .bind(input.day_type)
        .bind(input.time_of_day)
        .bind(&input.location)
        .bind(input.capacity)
        .bind(input.display_order)
        .bind(input.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate("Failed to create slot", e))
    }

    async fn update_slot(&self, id: SlotId, update: UpdateSlot) -> AppResult<Option<Slot>> {
        sqlx::query_as::<_, Slot>(
            "UPDATE mass_slots SET \
                location = COALESCE($2, location), \
                capacity = COALESCE($3, capacity), \
                display_order = COALESCE($4, display_order), \
                active = COALESCE($5, active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.location)
        .bind(update.capacity)
        .bind(update.display_order)
        .bind(update.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| translate("Failed to update slot", e))
    }
}
