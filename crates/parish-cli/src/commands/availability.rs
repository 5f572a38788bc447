//! Availability query command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_entity::{SlotAvailability, time_of_day};

use crate::output::{self, OutputFormat};

/// Arguments for the availability command
#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// Date as YYYY-MM-DD
    pub date: String,
}

/// One offered time
#[derive(Debug, Serialize, Tabled)]
pub struct AvailabilityRow {
    time: String,
    location: String,
    capacity: String,
    booked: i64,
    remaining: String,
    available: bool,
}

impl From<&SlotAvailability> for AvailabilityRow {
    fn from(entry: &SlotAvailability) -> Self {
        let unlimited = || "unlimited".to_string();
        Self {
            time: time_of_day::format(&entry.slot.time_of_day),
            location: entry.slot.location.clone(),
            capacity: if entry.slot.is_unlimited() {
                unlimited()
            } else {
                entry.slot.capacity.to_string()
            },
            booked: entry.reservations_count,
            remaining: entry
                .slot
                .remaining(entry.reservations_count)
                .map_or_else(unlimited, |r| r.to_string()),
            available: entry.is_available(),
        }
    }
}

/// Execute the availability command
pub async fn execute(
    args: &AvailabilityArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, state) = super::connect(config).await?;
    let result = state.availability.resolve_str(&args.date).await;
    db.close().await;
    let day = result?;

    if format == OutputFormat::Table {
        println!(
            "{} ({}): {} of {} times available",
            day.date,
            day.day_type,
            day.available_count(),
            day.slots.len()
        );
    }
    let rows: Vec<AvailabilityRow> = day.slots.iter().map(AvailabilityRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
