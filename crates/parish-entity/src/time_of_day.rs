//! `HH:MM` formatting for slot and reservation times.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Render as `HH:MM`.
pub fn format(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter: `#[serde(with = "crate::time_of_day")]`.
pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(time))
}

/// Serde adapter counterpart of [`serialize`].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
        assert_eq!(parse("09:00"), Some(nine));
        assert_eq!(parse("09:00:00"), Some(nine));
        assert_eq!(parse(" 09:00 "), Some(nine));
        assert_eq!(parse("25:00"), None);
        assert_eq!(parse("nine"), None);
    }

    #[test]
    fn test_format() {
        let t = NaiveTime::from_hms_opt(18, 30, 0).expect("valid time");
        assert_eq!(format(&t), "18:30");
    }
}
