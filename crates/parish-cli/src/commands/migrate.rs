//! Schema migration commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_database::DatabasePool;
use parish_database::migration::{MigrationState, migration_status, run_migrations};

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations (schema and catalog seed)
    Run,
    /// List bundled migrations and whether each one is applied
    Status,
}

#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    #[tabled(rename = "Version")]
    version: i64,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Applied")]
    applied: String,
}

impl From<MigrationState> for MigrationRow {
    fn from(state: MigrationState) -> Self {
        Self {
            version: state.version,
            description: state.description,
            applied: state
                .installed_on
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "pending".to_string()),
        }
    }
}

/// Execute migration commands
pub async fn execute(
    args: &MigrateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => run_migrations(db.pool()).await.map(|()| {
            output::print_success("Booking schema is up to date.");
        }),
        MigrateCommand::Status => migration_status(db.pool()).await.map(|states| {
            let pending = states.iter().filter(|s| s.installed_on.is_none()).count();
            let rows: Vec<MigrationRow> = states.into_iter().map(MigrationRow::from).collect();
            output::print_list(&rows, format);
            if pending > 0 && format == OutputFormat::Table {
                output::print_warning(&format!("{pending} migration(s) pending"));
            }
        }),
    };

    db.close().await;
    result
}
