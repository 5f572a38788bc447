//! Booking engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for reservation intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Organization tag leading every confirmation code.
    #[serde(default = "default_prefix")]
    pub confirmation_prefix: String,
    /// Length of the random suffix of a confirmation code.
    #[serde(default = "default_suffix_length")]
    pub confirmation_suffix_length: usize,
    /// How many codes to try before giving up on a unique one.
    #[serde(default = "default_code_attempts")]
    pub confirmation_code_attempts: u32,
    /// Offset of the parish's local time from UTC, used to decide "today".
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    /// Minimum number of characters in the intention text.
    #[serde(default = "default_min_intention")]
    pub min_intention_length: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            confirmation_prefix: default_prefix(),
            confirmation_suffix_length: default_suffix_length(),
            confirmation_code_attempts: default_code_attempts(),
            utc_offset_hours: default_utc_offset(),
            min_intention_length: default_min_intention(),
        }
    }
}

fn default_prefix() -> String {
    "MISA".to_string()
}

fn default_suffix_length() -> usize {
    5
}

fn default_code_attempts() -> u32 {
    5
}

fn default_utc_offset() -> i32 {
    -5
}

fn default_min_intention() -> usize {
    10
}
