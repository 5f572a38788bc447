//! Day-type classification used to pick the slots offered on a date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Category of calendar day a slot is offered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "day_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Monday to Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// Feast days. Configurable in the catalog but never derived from a date.
    Holiday,
}

impl DayType {
    /// Derive the day-type of a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sun => Self::Sunday,
            Weekday::Sat => Self::Saturday,
            _ => Self::Weekday,
        }
    }

    /// Return the day-type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
            Self::Holiday => "holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Ok(Self::Weekday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            "holiday" => Ok(Self::Holiday),
            other => Err(format!("unknown day type '{other}'")),
        }
    }
}
