//! Working time calculation.
//!
//! Converts a pair of clock times into elapsed, break, net and night minutes.
//! A shift whose end is earlier than its start crosses midnight; a shift whose
//! end equals its start has zero length.

use chrono::NaiveTime;

use crate::config::PayRates;
use crate::models::{MINUTES_PER_DAY, WorkingTime, minute_of_day};

/// Minutes from `start` to `end`, adding a day when `end` is before `start`.
///
/// # Examples
///
/// ```
/// use shift_pay::calculation::elapsed_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(elapsed_minutes(t(6, 30), t(17, 30)), 660);
/// // (24:00 - 16:45) + 01:25 = 8h40m
/// assert_eq!(elapsed_minutes(t(16, 45), t(1, 25)), 520);
/// assert_eq!(elapsed_minutes(t(9, 0), t(9, 0)), 0);
/// ```
pub fn elapsed_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = minute_of_day(start);
    let mut end = minute_of_day(end);
    if end < start {
        end += MINUTES_PER_DAY;
    }
    end - start
}

/// Minutes of `[start, start + elapsed)` that fall inside the night window.
///
/// The window runs from `window_start` to `window_end`, wrapping midnight when
/// `window_start` is later than `window_end`. Windows anchored on the previous,
/// same and following day are all checked, so an early-morning start picks up
/// the tail of the previous night.
pub fn night_overlap_minutes(
    start: NaiveTime,
    elapsed: i64,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> i64 {
    let shift_start = minute_of_day(start);
    let shift_end = shift_start + elapsed;
    let ws = minute_of_day(window_start);
    let we = minute_of_day(window_end);

    (-1..=1)
        .map(|day| {
            let base = day * MINUTES_PER_DAY;
            let (from, to) = if ws < we {
                (base + ws, base + we)
            } else {
                (base + ws, base + MINUTES_PER_DAY + we)
            };
            (shift_end.min(to) - shift_start.max(from)).max(0)
        })
        .sum()
}

/// Computes the minute-level breakdown of a shift.
///
/// The fixed break allowance is capped at the elapsed time, so
/// `net + break == elapsed` for every input. Night minutes are capped at the
/// net minutes. Overtime is left at zero here and filled in by
/// [`detect_overtime`](super::detect_overtime).
pub fn calculate_working_time(start: NaiveTime, end: NaiveTime, rates: &PayRates) -> WorkingTime {
    let elapsed = elapsed_minutes(start, end);
    let break_minutes = rates.break_minutes.clamp(0, elapsed);
    let net_minutes = elapsed - break_minutes;
    let night = night_overlap_minutes(
        start,
        elapsed,
        rates.night_window_start,
        rates.night_window_end,
    );

    WorkingTime {
        elapsed_minutes: elapsed,
        break_minutes,
        net_minutes,
        night_minutes: night.min(net_minutes),
        overtime_minutes: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn rates() -> PayRates {
        PayRates {
            regular_rate: Decimal::from_str("1500").unwrap(),
            night_multiplier: Decimal::from_str("1.25").unwrap(),
            overtime_multiplier: Decimal::from_str("1.25").unwrap(),
            overtime_threshold_hours: 8,
            night_window_start: t("22:00"),
            night_window_end: t("05:00"),
            break_minutes: 60,
        }
    }

    #[test]
    fn test_day_shift_net_ten_hours() {
        let time = calculate_working_time(t("06:30"), t("17:30"), &rates());
        assert_eq!(time.elapsed_minutes, 660);
        assert_eq!(time.break_minutes, 60);
        assert_eq!(time.net_minutes, 600);
        assert_eq!(time.net_hours(), Decimal::from(10));
        assert_eq!(time.night_minutes, 0);
    }

    #[test]
    fn test_night_shift_crosses_midnight() {
        let time = calculate_working_time(t("16:45"), t("01:25"), &rates());
        assert_eq!(time.elapsed_minutes, 520);
        assert_eq!(time.net_minutes, 460);
        // 22:00 to 01:25
        assert_eq!(time.night_minutes, 205);
    }

    #[test]
    fn test_zero_length_shift() {
        let time = calculate_working_time(t("09:00"), t("09:00"), &rates());
        assert_eq!(time, WorkingTime::ZERO);
    }

    #[test]
    fn test_short_shift_break_capped_at_elapsed() {
        let time = calculate_working_time(t("09:00"), t("09:40"), &rates());
        assert_eq!(time.elapsed_minutes, 40);
        assert_eq!(time.break_minutes, 40);
        assert_eq!(time.net_minutes, 0);
    }

    #[test]
    fn test_fully_night_shift_capped_at_net() {
        let time = calculate_working_time(t("22:00"), t("05:00"), &rates());
        assert_eq!(time.elapsed_minutes, 420);
        assert_eq!(time.net_minutes, 360);
        assert_eq!(time.night_minutes, 360);
    }

    #[test]
    fn test_early_morning_start_counts_previous_night_window() {
        // 03:00 to 12:00: 03:00-05:00 is night
        assert_eq!(night_overlap_minutes(t("03:00"), 540, t("22:00"), t("05:00")), 120);
    }

    #[test]
    fn test_shift_spanning_both_window_edges() {
        // 20:00 to 07:00 covers the whole 22:00-05:00 window
        let elapsed = elapsed_minutes(t("20:00"), t("07:00"));
        assert_eq!(elapsed, 660);
        assert_eq!(night_overlap_minutes(t("20:00"), elapsed, t("22:00"), t("05:00")), 420);
    }

    #[test]
    fn test_non_wrapping_window() {
        // Window 00:00-05:00, shift 23:00-02:00
        assert_eq!(night_overlap_minutes(t("23:00"), 180, t("00:00"), t("05:00")), 120);
    }

    #[test]
    fn test_afternoon_into_late_evening_window() {
        // 13:00 to 23:30 catches 90 minutes of night
        let elapsed = elapsed_minutes(t("13:00"), t("23:30"));
        assert_eq!(night_overlap_minutes(t("13:00"), elapsed, t("22:00"), t("05:00")), 90);
    }

    #[test]
    fn test_one_minute_before_start_is_almost_a_day() {
        assert_eq!(elapsed_minutes(t("09:00"), t("08:59")), 1439);
    }
}
