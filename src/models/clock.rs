//! Clock-time helpers.
//!
//! Shift start and end times are wall-clock times without a date, stored and
//! exchanged as `"HH:MM"` strings.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

const CLOCK_FORMAT: &str = "%H:%M";

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses an `"HH:MM"` string into a [`NaiveTime`].
///
/// # Example
///
/// ```
/// use shift_pay::models::parse_clock;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock("06:30").unwrap(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
/// assert!(parse_clock("6.30").is_err());
/// ```
pub fn parse_clock(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Formats a time as `"HH:MM"`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Minutes since midnight, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Serde adapter for `NaiveTime` fields stored as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a time as `"HH:MM"`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    /// Deserializes a time from `"HH:MM"`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}
