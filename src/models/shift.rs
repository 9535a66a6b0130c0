//! Shift record models.
//!
//! This module defines the [`ShiftRecord`] for completed, paid shifts and the
//! [`PlannedShift`] for shifts scheduled ahead of time.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::hhmm;
use super::pay::{PayBreakdown, WorkingTime};

/// Whether a shift type is worked by day or overnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Daytime shift.
    Day,
    /// Evening or overnight shift.
    Night,
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Day => write!(f, "day"),
            ShiftKind::Night => write!(f, "night"),
        }
    }
}

/// A completed shift with its computed working time and pay.
///
/// Records are keyed by `id`; several records may share a `work_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// The date the shift started.
    pub work_date: NaiveDate,
    /// Shift type code (e.g. `"C341"`).
    pub shift_type: String,
    /// Clock-in time.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Clock-out time; earlier than `start_time` for shifts crossing midnight.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Computed working time.
    pub working_time: WorkingTime,
    /// Computed pay.
    pub pay_info: PayBreakdown,
}

impl ShiftRecord {
    /// Returns the net hours worked.
    pub fn net_hours(&self) -> Decimal {
        self.working_time.net_hours()
    }

    /// Returns the total pay for the shift.
    pub fn total_pay(&self) -> Decimal {
        self.pay_info.total_pay
    }

    /// Returns true when the shift ends on the following calendar day.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay::models::{PayBreakdown, ShiftRecord, WorkingTime};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use uuid::Uuid;
    ///
    /// let record = ShiftRecord {
    ///     id: Uuid::new_v4(),
    ///     work_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    ///     shift_type: "C342".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(16, 45, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(1, 25, 0).unwrap(),
    ///     working_time: WorkingTime::ZERO,
    ///     pay_info: PayBreakdown::zero(),
    /// };
    /// assert!(record.crosses_midnight());
    /// ```
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }
}

/// A shift scheduled on the calendar but not yet worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedShift {
    /// Stable identifier.
    pub id: Uuid,
    /// The planned date.
    pub date: NaiveDate,
    /// Shift type code.
    pub shift_type: String,
    /// Planned start time.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Planned end time.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Set once the shift has been logged as a [`ShiftRecord`].
    #[serde(default)]
    pub completed: bool,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
}
