//! Date range and public holiday models.
//!
//! This module contains the [`DateRange`] and [`Holiday`] types used to scope
//! calendar views, summaries and exports.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A public holiday.
///
/// # Example
///
/// ```
/// use shift_pay::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
///     name: "Culture Day".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The display name of the holiday.
    pub name: String,
}

/// An inclusive range of dates.
///
/// # Example
///
/// ```
/// use shift_pay::models::DateRange;
/// use chrono::NaiveDate;
///
/// let january = DateRange::month(2025, 1).unwrap();
/// assert_eq!(january.end_date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
/// assert!(!january.contains_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date (inclusive).
    pub start_date: NaiveDate,
    /// The last date (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range; returns `None` when `end_date` is before `start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }

    /// The whole calendar month. Returns `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let end_date = next_month.pred_opt()?;
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// The Sunday-to-Saturday week containing `date`.
    pub fn week_containing(date: NaiveDate) -> Option<Self> {
        let offset = u64::from(date.weekday().num_days_from_sunday());
        let start_date = date.checked_sub_days(Days::new(offset))?;
        let end_date = start_date.checked_add_days(Days::new(6))?;
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this range, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the range.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Iterates over every date in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }
}
