//! Mass intention categories and their prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::price::Price;

/// A kind of mass intention (thanksgiving, memorial, ...) with its price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MassType {
    /// Stable lookup code, e.g. `accion_gracias`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Current price. Reservations copy it at booking time.
    #[sqlx(rename = "price_cents")]
    pub price: Price,
    /// Whether new reservations may use this type.
    pub active: bool,
    /// Ordering in listings.
    pub display_order: i32,
    /// When the type was created.
    pub created_at: DateTime<Utc>,
    /// When the type was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a mass type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMassType {
    /// Lookup code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Price.
    pub price: Price,
    /// Whether offered.
    pub active: bool,
    /// Display order.
    pub display_order: i32,
}

/// Partial mass type update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMassType {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price; existing reservations keep their snapshot.
    pub price: Option<Price>,
    /// Activate or retire.
    pub active: Option<bool>,
    /// New display order.
    pub display_order: Option<i32>,
}

impl UpdateMassType {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.active.is_none()
            && self.display_order.is_none()
    }
}

/// Whether a mass type code is well formed: lowercase ASCII letters,
/// digits and underscores, 2 to 50 characters.
pub fn is_valid_code(code: &str) -> bool {
    (2..=50).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
