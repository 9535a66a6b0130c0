//! Hour-of-week shift heatmap.

use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;

use crate::models::ShiftRecord;

const HOURS: usize = 24;
const DAYS: usize = 7;

/// Counts of shifts covering each hour of each weekday.
///
/// Weekdays are indexed from Sunday (0) to Saturday (6). Every hour from the
/// start hour to the end hour, inclusive, is counted. A shift whose end hour
/// is before its start hour counts the hours after midnight on the next
/// weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftHeatmap {
    counts: [[u32; DAYS]; HOURS],
    shifts_per_day: [u32; DAYS],
    total_shifts: usize,
}

impl ShiftHeatmap {
    /// Number of shifts covering `hour` on weekday `day` (Sunday = 0).
    pub fn count(&self, hour: usize, day: usize) -> u32 {
        self.counts
            .get(hour)
            .and_then(|row| row.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Number of records counted.
    pub fn total_shifts(&self) -> usize {
        self.total_shifts
    }

    /// The hour with the highest count across all weekdays; the earliest hour
    /// wins ties. `None` when no shift was counted.
    pub fn peak_hour(&self) -> Option<u32> {
        let mut best: Option<(usize, u32)> = None;
        for (hour, row) in self.counts.iter().enumerate() {
            let total: u32 = row.iter().sum();
            if total > best.map_or(0, |(_, t)| t) {
                best = Some((hour, total));
            }
        }
        best.map(|(hour, _)| hour as u32)
    }

    /// Peak hour formatted as `"H:00-H+1:00"`.
    pub fn peak_hour_label(&self) -> Option<String> {
        self.peak_hour()
            .map(|hour| format!("{}:00-{}:00", hour, hour + 1))
    }

    /// The weekday on which the most shifts started; the earliest weekday
    /// from Sunday wins ties.
    pub fn most_active_day(&self) -> Option<Weekday> {
        let mut best: Option<(usize, u32)> = None;
        for (day, &count) in self.shifts_per_day.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((day, count));
            }
        }
        best.map(|(day, _)| weekday_from_sunday(day))
    }

    /// Cells as `(day, hour, count)` triples, hour-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(hour, row)| row.iter().enumerate().map(move |(day, &v)| (day, hour, v)))
    }
}

/// Builds the heatmap for `records`.
///
/// # Example
///
/// ```
/// use shift_pay::summary::shift_heatmap;
///
/// let heatmap = shift_heatmap(&[]);
/// assert_eq!(heatmap.total_shifts(), 0);
/// assert_eq!(heatmap.peak_hour(), None);
/// ```
pub fn shift_heatmap(records: &[ShiftRecord]) -> ShiftHeatmap {
    let mut counts = [[0u32; DAYS]; HOURS];
    let mut shifts_per_day = [0u32; DAYS];

    for record in records {
        let day = record.work_date.weekday().num_days_from_sunday() as usize;
        let start = record.start_time.hour() as usize;
        let end = record.end_time.hour() as usize;

        if record.crosses_midnight() {
            for row in &mut counts[start..] {
                row[day] += 1;
            }
            let next = (day + 1) % DAYS;
            for row in &mut counts[..=end] {
                row[next] += 1;
            }
        } else {
            for row in &mut counts[start..=end] {
                row[day] += 1;
            }
        }
        shifts_per_day[day] += 1;
    }

    ShiftHeatmap {
        counts,
        shifts_per_day,
        total_shifts: records.len(),
    }
}

fn weekday_from_sunday(day: usize) -> Weekday {
    match day {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PayBreakdown, WorkingTime};
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn record(date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> ShiftRecord {
        ShiftRecord {
            id: Uuid::new_v4(),
            work_date: date,
            shift_type: "C341".to_string(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            working_time: WorkingTime::ZERO,
            pay_info: PayBreakdown::zero(),
        }
    }

    #[test]
    fn test_day_shift_counts_inclusive_hours() {
        // Wednesday 2025-01-15, 06:30-17:30 covers hours 6..=17
        let heatmap = shift_heatmap(&[record(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), (6, 30), (17, 30))]);

        assert_eq!(heatmap.count(5, 3), 0);
        assert_eq!(heatmap.count(6, 3), 1);
        assert_eq!(heatmap.count(17, 3), 1);
        assert_eq!(heatmap.count(18, 3), 0);
        assert_eq!(heatmap.total_shifts(), 1);
        assert_eq!(heatmap.most_active_day(), Some(Weekday::Wed));
    }

    #[test]
    fn test_overnight_shift_spills_into_next_day() {
        // Saturday 2025-01-18, 16:45-01:25 wraps to Sunday
        let heatmap = shift_heatmap(&[record(NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(), (16, 45), (1, 25))]);

        assert_eq!(heatmap.count(16, 6), 1);
        assert_eq!(heatmap.count(23, 6), 1);
        assert_eq!(heatmap.count(0, 0), 1);
        assert_eq!(heatmap.count(1, 0), 1);
        assert_eq!(heatmap.count(2, 0), 0);
        assert_eq!(heatmap.count(0, 6), 0);
        assert_eq!(heatmap.most_active_day(), Some(Weekday::Sat));
    }

    #[test]
    fn test_peak_hour() {
        let records = vec![
            record(NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(), (9, 0), (12, 0)),
            record(NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(), (11, 0), (15, 0)),
        ];
        let heatmap = shift_heatmap(&records);

        // Hours 11 and 12 are covered twice; 11 comes first
        assert_eq!(heatmap.peak_hour(), Some(11));
        assert_eq!(heatmap.peak_hour_label().unwrap(), "11:00-12:00");
        assert_eq!(heatmap.cells().count(), 24 * 7);
    }

    #[test]
    fn test_out_of_range_count_is_zero() {
        let heatmap = shift_heatmap(&[]);
        assert_eq!(heatmap.count(24, 0), 0);
        assert_eq!(heatmap.count(0, 7), 0);
        assert_eq!(heatmap.most_active_day(), None);
    }
}
