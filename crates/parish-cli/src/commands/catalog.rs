//! Slot and mass type catalog listing commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_entity::{DayType, MassType, Slot, time_of_day};

use crate::output::{self, OutputFormat};

/// Arguments for catalog commands
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog subcommand
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Catalog subcommands
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List configured slots
    Slots {
        /// weekday, saturday, sunday or holiday
        #[arg(short, long)]
        day_type: Option<String>,
    },
    /// List mass types and prices
    MassTypes {
        /// Include retired mass types
        #[arg(long)]
        all: bool,
    },
}

/// Slot display row
#[derive(Debug, Serialize, Tabled)]
struct SlotRow {
    id: String,
    day_type: String,
    time: String,
    location: String,
    capacity: i32,
    active: bool,
}

impl From<Slot> for SlotRow {
    fn from(slot: Slot) -> Self {
        Self {
            id: slot.id.to_string(),
            day_type: slot.day_type.to_string(),
            time: time_of_day::format(&slot.time_of_day),
            location: slot.location,
            capacity: slot.capacity,
            active: slot.active,
        }
    }
}

/// Mass type display row
#[derive(Debug, Serialize, Tabled)]
struct MassTypeRow {
    code: String,
    name: String,
    price: String,
    active: bool,
}

impl From<MassType> for MassTypeRow {
    fn from(t: MassType) -> Self {
        Self {
            code: t.code,
            name: t.name,
            price: t.price.to_string(),
            active: t.active,
        }
    }
}

/// Execute catalog commands
pub async fn execute(
    args: &CatalogArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let day_type = match &args.command {
        CatalogCommand::Slots {
            day_type: Some(raw),
        } => Some(
            raw.parse::<DayType>()
                .map_err(AppError::validation)?,
        ),
        _ => None,
    };

    let (db, state) = super::connect(config).await?;
    let result = match &args.command {
        CatalogCommand::Slots { .. } => state.catalog.list_slots(day_type).await.map(|slots| {
            let rows: Vec<SlotRow> = slots.into_iter().map(SlotRow::from).collect();
            output::print_list(&rows, format);
        }),
        CatalogCommand::MassTypes { all } => {
            state.catalog.list_mass_types(!all).await.map(|types| {
                let rows: Vec<MassTypeRow> = types.into_iter().map(MassTypeRow::from).collect();
                output::print_list(&rows, format);
            })
        }
    };
    db.close().await;
    result
}
