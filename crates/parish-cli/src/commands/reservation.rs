//! Reservation lookup and maintenance commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use parish_api::AppState;
use parish_core::config::AppConfig;
use parish_core::error::AppError;
use parish_core::types::{PageRequest, ReservationId};
use parish_entity::{Reservation, ReservationFilter, ReservationStatus, ReservationUpdate, time_of_day};
use parish_service::RequestContext;
use parish_service::availability::parse_date;

use crate::output::{self, OutputFormat};

/// Arguments for reservation commands
#[derive(Debug, Args)]
pub struct ReservationArgs {
    /// Reservation subcommand
    #[command(subcommand)]
    pub command: ReservationCommand,
}

/// Reservation subcommands. `REFERENCE` is an id or a confirmation code.
#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// List reservations, newest first
    List {
        /// Only this status
        #[arg(short, long)]
        status: Option<String>,
        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Page size
        #[arg(long, default_value_t = 25)]
        limit: u64,
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Show one reservation
    Show {
        /// Id or confirmation code
        reference: String,
    },
    /// Counts per status
    Stats,
    /// Move a reservation to another status
    SetStatus {
        /// Id or confirmation code
        reference: String,
        /// pending, payment_pending, confirmed, cancelled or completed
        status: String,
        /// Staff member making the change
        #[arg(long)]
        by: Option<String>,
        /// Staff notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark the claimed payment as checked (or unchecked)
    VerifyPayment {
        /// Id or confirmation code
        reference: String,
        /// Clear the flag instead of setting it
        #[arg(long)]
        revoke: bool,
    },
    /// Permanently delete a reservation
    Delete {
        /// Id or confirmation code
        reference: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Reservation display row
#[derive(Debug, Serialize, Tabled)]
struct ReservationRow {
    code: String,
    date: String,
    time: String,
    name: String,
    mass_type: String,
    status: String,
    paid: String,
    verified: bool,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            code: r.confirmation_code.clone(),
            date: r.date.to_string(),
            time: time_of_day::format(&r.time),
            name: r.full_name(),
            mass_type: r.mass_type_code.clone(),
            status: r.status.to_string(),
            paid: format!("{} ({})", r.price, r.payment_method),
            verified: r.payment_verified,
        }
    }
}

/// Status count row
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    status: String,
    count: i64,
}

fn cli_context() -> RequestContext {
    RequestContext::new(None, Some(format!("parish-cli/{}", env!("CARGO_PKG_VERSION"))))
}

async fn find(state: &AppState, reference: &str) -> Result<Reservation, AppError> {
    match reference.trim().parse::<ReservationId>() {
        Ok(id) => state.reservations.get(id).await,
        Err(_) => state.reservations.get_by_code(reference).await,
    }
}

fn parse_status(raw: &str) -> Result<ReservationStatus, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Unknown status '{raw}'")))
}

/// Execute reservation commands
pub async fn execute(
    args: &ReservationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, state) = super::connect(config).await?;
    let result = run(&args.command, &state, format).await;
    db.close().await;
    result
}

async fn run(
    command: &ReservationCommand,
    state: &AppState,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = cli_context();

    match command {
        ReservationCommand::List {
            status,
            date,
            limit,
            offset,
        } => {
            let filter = ReservationFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let page = state
                .reservations
                .list(&filter, &PageRequest::new(*limit, *offset))
                .await?;
            let rows: Vec<ReservationRow> = page.items.iter().map(ReservationRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table && page.has_more {
                println!(
                    "Showing {}-{} of {}; use --offset {} for more.",
                    page.offset + 1,
                    page.offset + rows.len() as u64,
                    page.total,
                    page.offset + rows.len() as u64
                );
            }
        }
        ReservationCommand::Show { reference } => {
            let reservation = find(state, reference).await?;
            output::print_item(&reservation, format);
        }
        ReservationCommand::Stats => {
            let rows: Vec<StatusRow> = state
                .reservations
                .stats()
                .await?
                .into_iter()
                .map(|c| StatusRow {
                    status: c.status.to_string(),
                    count: c.count,
                })
                .collect();
            output::print_list(&rows, format);
        }
        ReservationCommand::SetStatus {
            reference,
            status,
            by,
            notes,
        } => {
            let reservation = find(state, reference).await?;
            let update = ReservationUpdate {
                status: Some(parse_status(status)?),
                admin_notes: notes.clone(),
                confirmed_by: by.clone(),
                ..Default::default()
            };
            let updated = state.reservations.update(reservation.id, update, &ctx).await?;
            output::print_success(&format!(
                "{} is now {}",
                updated.confirmation_code, updated.status
            ));
        }
        ReservationCommand::VerifyPayment { reference, revoke } => {
            let reservation = find(state, reference).await?;
            let update = ReservationUpdate {
                payment_verified: Some(!revoke),
                ..Default::default()
            };
            let updated = state.reservations.update(reservation.id, update, &ctx).await?;
            output::print_success(&format!(
                "{} payment verified: {}",
                updated.confirmation_code, updated.payment_verified
            ));
        }
        ReservationCommand::Delete { reference, force } => {
            let reservation = find(state, reference).await?;
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete {} ({} on {} at {})? This cannot be undone",
                        reservation.confirmation_code,
                        reservation.full_name(),
                        reservation.date,
                        time_of_day::format(&reservation.time)
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let removed = state.reservations.delete(reservation.id, &ctx).await?;
            output::print_success(&format!("Deleted {}", removed.confirmation_code));
        }
    }

    Ok(())
}
