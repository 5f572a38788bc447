//! Mass type catalog repository.

use async_trait::async_trait;
use sqlx::PgPool;

use parish_core::result::AppResult;
use parish_entity::{CreateMassType, MassType, UpdateMassType};

use crate::error::translate;
use crate::store::MassTypeStore;

/// PostgreSQL-backed mass type catalog.
#[derive(Debug, Clone)]
pub struct MassTypeRepository {
    pool: PgPool,
}

impl MassTypeRepository {
    /// Create a new mass type repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MassTypeStore for MassTypeRepository {
    async fn list_mass_types(&self, active_only: bool) -> AppResult<Vec<MassType>> {
        sqlx::query_as::<_, MassType>(
            "SELECT * FROM mass_types WHERE active OR NOT $1 ORDER BY display_order, name",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| translate("Failed to list mass types", e))
    }

    async fn find_mass_type(&self, code: &str) -> AppResult<Option<MassType>> {
        sqlx::query_as::<_, MassType>("SELECT * FROM mass_types WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate("Failed to find mass type", e))
    }

    async fn create_mass_type(&self, input: CreateMassType) -> AppResult<MassType> {
        sqlx::query_as::<_, MassType>(
            "INSERT INTO mass_types (code, name, description, price_cents, active, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.active)
        .bind(input.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate("Failed to create mass type", e))
    }

    async fn update_mass_type(
        &self,
        code: &str,
        update: UpdateMassType,
    ) -> AppResult<Option<MassType>> {
        sqlx::query_as::<_, MassType>(
            "UPDATE mass_types SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price_cents = COALESCE($4, price_cents), \
                active = COALESCE($5, active), \
                display_order = COALESCE($6, display_order), \
                updated_at = NOW() \
             WHERE code = $1 RETURNING *",
        )
        .bind(code)
        .bind(update.name)
        .bind(update.description)
        .bind(update.price)
        .bind(update.active)
        .bind(update.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| translate("Failed to update mass type", e))
    }
}
