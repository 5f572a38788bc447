//! Parish booking server.
//!
//! Main entry point that loads configuration, opens the database pool and
//! serves the HTTP API until shutdown.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use parish_api::{AppState, Stores};
use parish_core::config::{AppConfig, LogFormat};
use parish_core::error::AppError;
use parish_core::traits::SystemClock;
use parish_database::DatabasePool;
use parish_database::migration::run_migrations;
use parish_service::LogNotifier;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, source = ?e.source, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `PARISH_ENV` overlay and `PARISH__*`
/// environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("PARISH_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("PARISH_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting parish booking server v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    if !config.admin.is_protected() {
        tracing::warn!("admin.api_token is empty: /api/admin routes are open to anyone");
    }

    let clock = Arc::new(SystemClock::with_offset_hours(config.booking.utc_offset_hours));
    let state = AppState::new(
        config,
        Some(db.clone()),
        Stores::postgres(&db),
        clock,
        Arc::new(LogNotifier),
    );

    let result = parish_api::serve(state).await;
    db.close().await;
    result
}
