//! Month and week calendar views.
//!
//! Calendars are Sunday-first. A month view is always a 6x7 grid of 42
//! cells; cells before the first and after the last day of the month are
//! empty.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::DateRange;
use crate::store::{DayEntries, PayrollState};

/// Number of cells in a month grid.
pub const MONTH_GRID_CELLS: usize = 42;

/// One calendar day with its shifts and earnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    /// The date.
    pub date: NaiveDate,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Public holiday name, if any.
    pub holiday: Option<&'a str>,
    /// Actual records and uncompleted planned shifts.
    pub entries: DayEntries<'a>,
    /// Total pay of the actual records.
    pub earnings: Decimal,
    /// Total net hours of the actual records.
    pub hours: Decimal,
}

impl<'a> CalendarDay<'a> {
    /// Builds the day from the state.
    pub fn new(state: &'a PayrollState, date: NaiveDate) -> Self {
        let entries = state.entries_on(date);
        let earnings = entries.actual.iter().map(|r| r.total_pay()).sum();
        let hours = entries.actual.iter().map(|r| r.net_hours()).sum();

        Self {
            date,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            holiday: state.config().holiday_name(date),
            entries,
            earnings,
            hours,
        }
    }

    /// Returns true when the day has any actual or planned shift.
    pub fn has_shift(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// A Sunday-first month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView<'a> {
    /// First to last day of the month.
    pub range: DateRange,
    /// 42 cells; `None` for padding before and after the month.
    pub cells: Vec<Option<CalendarDay<'a>>>,
}

impl<'a> MonthView<'a> {
    /// Days of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay<'a>> {
        self.cells.iter().flatten()
    }

    /// The grid split into 6 weeks of 7 cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDay<'a>>]> {
        self.cells.chunks(7)
    }

    /// Title such as `"January 2025"`.
    pub fn title(&self) -> String {
        self.range.start_date.format("%B %Y").to_string()
    }
}

/// Builds the month view, or `None` for an invalid month.
///
/// # Example
///
/// ```no_run
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::store::PayrollState;
/// use shift_pay::summary::month_view;
///
/// let state = PayrollState::new(ConfigLoader::load("./config/jp").unwrap().into_config());
/// let view = month_view(&state, 2025, 2).unwrap();
/// // February 2025 starts on a Saturday
/// assert!(view.cells[..6].iter().all(Option::is_none));
/// assert_eq!(view.cells.len(), 42);
/// ```
pub fn month_view(state: &PayrollState, year: i32, month: u32) -> Option<MonthView<'_>> {
    let range = DateRange::month(year, month)?;
    let leading = range.start_date.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<CalendarDay<'_>>> = Vec::with_capacity(MONTH_GRID_CELLS);
    cells.extend((0..leading).map(|_| None));
    cells.extend(range.days().map(|date| Some(CalendarDay::new(state, date))));
    cells.resize_with(MONTH_GRID_CELLS, || None);

    Some(MonthView { range, cells })
}

/// A Sunday-first week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView<'a> {
    /// Sunday to Saturday.
    pub range: DateRange,
    /// The 7 days.
    pub days: Vec<CalendarDay<'a>>,
}

/// Builds the week containing `date`.
pub fn week_view(state: &PayrollState, date: NaiveDate) -> Option<WeekView<'_>> {
    let range = DateRange::week_containing(date)?;
    let days = range.days().map(|d| CalendarDay::new(state, d)).collect();
    Some(WeekView { range, days })
}

/// The start of the month `offset` months from the month containing `date`.
pub fn shift_month(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + offset;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// The date `offset` weeks from `date`.
pub fn shift_week(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::weeks(offset))
}
