//! CLI command definitions and dispatch.

pub mod availability;
pub mod catalog;
pub mod config;
pub mod migrate;
pub mod reservation;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use parish_api::{AppState, Stores};
use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_core::traits::SystemClock;
use parish_database::DatabasePool;
use parish_service::LogNotifier;

use crate::output::OutputFormat;

/// Parish mass booking administration
#[derive(Debug, Parser)]
#[command(name = "parish-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (defaults to $PARISH_ENV, then "development")
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Offered times and remaining seats for a date
    Availability(availability::AvailabilityArgs),
    /// Reservation lookup and maintenance
    Reservation(reservation::ReservationArgs),
    /// Slot and mass type catalogs
    Catalog(catalog::CatalogArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config_dir, self.env.as_deref())?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
            Commands::Availability(args) => {
                availability::execute(args, &config, self.format).await
            }
            Commands::Reservation(args) => reservation::execute(args, &config, self.format).await,
            Commands::Catalog(args) => catalog::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: load configuration the same way the server does
pub fn load_config(dir: &str, env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(String::from)
        .or_else(|| std::env::var("PARISH_ENV").ok())
        .unwrap_or_else(|| "development".to_string());
    AppConfig::load(dir, &env)
}

/// Helper: open the pool and wire the services over it
pub async fn connect(config: &AppConfig) -> Result<(DatabasePool, AppState), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let state = AppState::new(
        config.clone(),
        Some(db.clone()),
        Stores::postgres(&db),
        Arc::new(SystemClock::with_offset_hours(config.booking.utc_offset_hours)),
        Arc::new(LogNotifier),
    );
    Ok((db, state))
}
