//! Earnings aggregates over shift records.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{DateRange, IncomePeriod, ShiftRecord, TaxInput};

use super::calendar::shift_month;

/// Totals for a set of shift records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    /// Number of records.
    pub entries: usize,
    /// Sum of net hours.
    pub total_hours: Decimal,
    /// Sum of total pay.
    pub total_earnings: Decimal,
    /// Total pay divided by the number of records, zero when empty.
    pub average_per_entry: Decimal,
}

/// Summarizes `records`.
///
/// # Example
///
/// ```
/// use shift_pay::summary::summarize;
///
/// let summary = summarize(std::iter::empty());
/// assert_eq!(summary.entries, 0);
/// assert!(summary.average_per_entry.is_zero());
/// ```
pub fn summarize<'a, I>(records: I) -> PeriodSummary
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    let mut summary = PeriodSummary::default();
    for record in records {
        summary.entries += 1;
        summary.total_hours += record.net_hours();
        summary.total_earnings += record.total_pay();
    }
    if summary.entries > 0 {
        summary.average_per_entry = summary.total_earnings / Decimal::from(summary.entries);
    }
    summary
}

/// Summarizes the records with a work date inside `range`.
pub fn summarize_range(records: &[ShiftRecord], range: DateRange) -> PeriodSummary {
    summarize(records.iter().filter(|r| range.contains_date(r.work_date)))
}

/// Income earned over a date range, used to prefill the tax calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodIncome {
    /// The range that was summed.
    pub range: DateRange,
    /// Number of records in the range.
    pub entries: usize,
    /// Total pay in the range.
    pub total_income: Decimal,
}

impl PeriodIncome {
    /// Builds a tax input from the income rounded to whole yen.
    ///
    /// Returns `None` when nothing was earned in the range.
    pub fn to_tax_input(&self, period: IncomePeriod) -> Option<TaxInput> {
        if self.total_income <= Decimal::ZERO {
            return None;
        }
        let gross = self
            .total_income
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Some(TaxInput::new(gross, period))
    }
}

/// Sums the pay of the records inside `range`.
pub fn income_for_period(records: &[ShiftRecord], range: DateRange) -> PeriodIncome {
    let summary = summarize_range(records, range);
    PeriodIncome {
        range,
        entries: summary.entries,
        total_income: summary.total_earnings,
    }
}

/// Earnings on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEarnings {
    /// The date.
    pub date: NaiveDate,
    /// Total pay of records on that date.
    pub earnings: Decimal,
}

/// Earnings for each of the `days` days ending at `end` (inclusive), oldest
/// first. Days without records have zero earnings.
pub fn daily_earnings(records: &[ShiftRecord], end: NaiveDate, days: u32) -> Vec<DailyEarnings> {
    (0..i64::from(days))
        .rev()
        .filter_map(|back| end.checked_sub_signed(Duration::days(back)))
        .map(|date| DailyEarnings {
            date,
            earnings: records
                .iter()
                .filter(|r| r.work_date == date)
                .map(ShiftRecord::total_pay)
                .sum(),
        })
        .collect()
}

/// Totals for one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    /// ISO week-numbering year.
    pub iso_year: i32,
    /// ISO week number.
    pub week: u32,
    /// Sum of net hours.
    pub total_hours: Decimal,
    /// Sum of total pay.
    pub total_pay: Decimal,
    /// Number of records.
    pub entries: usize,
}

/// Per-ISO-week totals, oldest first, keeping the most recent `limit` weeks.
pub fn weekly_summaries(records: &[ShiftRecord], limit: usize) -> Vec<WeeklySummary> {
    let mut weeks: BTreeMap<(i32, u32), WeeklySummary> = BTreeMap::new();
    for record in records {
        let iso = record.work_date.iso_week();
        let entry = weeks
            .entry((iso.year(), iso.week()))
            .or_insert_with(|| WeeklySummary {
                iso_year: iso.year(),
                week: iso.week(),
                total_hours: Decimal::ZERO,
                total_pay: Decimal::ZERO,
                entries: 0,
            });
        entry.total_hours += record.net_hours();
        entry.total_pay += record.total_pay();
        entry.entries += 1;
    }

    let skip = weeks.len().saturating_sub(limit);
    weeks.into_values().skip(skip).collect()
}

/// Number of week-of-month buckets; days 29 to 31 fall in the fifth.
pub const WEEKS_PER_MONTH: usize = 5;

/// Earnings by week-of-month for a month and the month before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyComparison {
    /// First day of the compared month.
    pub month: NaiveDate,
    /// Earnings per week of the compared month.
    pub current: [Decimal; WEEKS_PER_MONTH],
    /// Earnings per week of the previous month.
    pub previous: [Decimal; WEEKS_PER_MONTH],
    /// Sum of `current`.
    pub current_total: Decimal,
    /// Sum of `previous`.
    pub previous_total: Decimal,
    /// Percentage change from the previous month; zero when it earned nothing.
    pub growth_rate: Decimal,
}

/// Compares the month containing `date` with the previous month.
///
/// A record's bucket is `(day - 1) / 7`.
///
/// # Example
///
/// ```
/// use shift_pay::summary::monthly_comparison;
/// use chrono::NaiveDate;
///
/// let comparison = monthly_comparison(&[], NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
/// assert_eq!(comparison.month, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert!(comparison.growth_rate.is_zero());
/// ```
pub fn monthly_comparison(records: &[ShiftRecord], date: NaiveDate) -> MonthlyComparison {
    let month = date.with_day(1).unwrap_or(date);
    let previous_month = shift_month(date, -1);

    let mut current = [Decimal::ZERO; WEEKS_PER_MONTH];
    let mut previous = [Decimal::ZERO; WEEKS_PER_MONTH];

    for record in records {
        let bucket = (record.work_date.day0() / 7) as usize;
        if bucket >= WEEKS_PER_MONTH {
            continue;
        }
        let record_month = record.work_date.with_day(1);
        if record_month == Some(month) {
            current[bucket] += record.total_pay();
        } else if record_month.is_some() && record_month == previous_month {
            previous[bucket] += record.total_pay();
        }
    }

    let current_total: Decimal = current.iter().sum();
    let previous_total: Decimal = previous.iter().sum();
    let growth_rate = if previous_total > Decimal::ZERO {
        (current_total - previous_total) / previous_total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    MonthlyComparison {
        month,
        current,
        previous,
        current_total,
        previous_total,
        growth_rate,
    }
}
