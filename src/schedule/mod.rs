//! Shift scheduling domain types and calendar logic.
//!
//! A shift is a time interval on a specific calendar date. Shifts are
//! produced per request and returned to the caller; nothing is persisted.

mod dates;
mod extract;

pub use dates::resolve_day_reference;
pub use extract::ShiftExtractor;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scheduled shift: a start/end time on a concrete calendar date.
///
/// Serializes to the wire shape used by the API and the agent tool:
/// `{"date": "YYYY-MM-DD", "day": "Monday", "start_time": "HH:MM",
/// "end_time": "HH:MM"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub date: NaiveDate,
    pub day: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl Shift {
    /// Create a shift, deriving the weekday name from the date.
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            date,
            day: weekday_name(date),
            start_time,
            end_time,
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {} from {} to {}",
            self.day,
            self.date.format("%Y-%m-%d"),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Full weekday name for a date (e.g., "Monday").
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Parse a 24-hour "HH:MM" time string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Serde helpers for "HH:MM" time fields.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_derives_weekday() {
        let shift = Shift::new(
            date(2024, 6, 3),
            parse_hhmm("09:00").unwrap(),
            parse_hhmm("17:00").unwrap(),
        );
        assert_eq!(shift.day, "Monday");
    }

    #[test]
    fn test_shift_wire_format() {
        let shift = Shift::new(
            date(2024, 6, 3),
            parse_hhmm("09:00").unwrap(),
            parse_hhmm("17:00").unwrap(),
        );

        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["date"], "2024-06-03");
        assert_eq!(json["day"], "Monday");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "17:00");

        let back: Shift = serde_json::from_value(json).unwrap();
        assert_eq!(back, shift);
    }

    #[test]
    fn test_shift_display() {
        let shift = Shift::new(
            date(2024, 6, 3),
            parse_hhmm("21:00").unwrap(),
            parse_hhmm("23:00").unwrap(),
        );
        assert_eq!(shift.to_string(), "Monday, 2024-06-03 from 21:00 to 23:00");
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(
            parse_hhmm("09:30"),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert!(parse_hhmm("9am").is_none());
        assert!(parse_hhmm("25:00").is_none());
        assert!(parse_hhmm("").is_none());
    }
}
