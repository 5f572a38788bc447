//! Schema and catalog seed migrations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use parish_core::error::{AppError, ErrorKind};

/// Booking schema plus the initial slot and mass type catalog.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// One bundled migration and whether the database has it.
#[derive(Debug, Clone)]
pub struct MigrationState {
    /// Version prefix of the migration file.
    pub version: i64,
    /// Description derived from the file name.
    pub description: String,
    /// When it was applied, `None` while pending.
    pub installed_on: Option<DateTime<Utc>>,
}

/// Apply every pending migration. Already applied ones are skipped by sqlx.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(migrations = known, "Applying booking schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Booking schema migration failed: {e}"),
            e,
        )
    })?;

    info!(migrations = known, "Booking schema is up to date");
    Ok(())
}

/// Every bundled migration in version order, paired with its install time.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationState>, AppError> {
    let tracked: bool = sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Migration table check failed", e))?;

    let applied: Vec<(i64, DateTime<Utc>)> = if tracked {
        sqlx::query_as(
            "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read applied migrations", e)
        })?
    } else {
        Vec::new()
    };

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationState {
            version: m.version,
            description: m.description.to_string(),
            installed_on: applied
                .iter()
                .find(|(version, _)| *version == m.version)
                .map(|(_, at)| *at),
        })
        .collect())
}
