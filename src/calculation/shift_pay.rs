//! Shift pay orchestration.
//!
//! Runs the working time, overtime, base pay and night premium rules in order
//! and assembles the [`ShiftCalculation`] with its audit trace.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayRates;
use crate::models::{
    AuditStep, AuditTrace, PayBreakdown, ShiftCalculation, format_clock, minutes_to_hours,
};

use super::{calculate_base_pay, calculate_night_premium, calculate_working_time, detect_overtime, round_money};

/// Calculates working time and pay for one shift.
///
/// `shift_type` is only recorded in the audit trace; every shift type is paid
/// by the same rules. Each pay component is rounded to 2 decimal places and
/// `total_pay` is their exact sum. The calculation is pure and never fails: a
/// shift whose end equals its start yields an all-zero result.
///
/// # Examples
///
/// ```no_run
/// use shift_pay::calculation::calculate_shift_pay;
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::models::parse_clock;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let result = calculate_shift_pay(
///     "C341",
///     parse_clock("06:30").unwrap(),
///     parse_clock("17:30").unwrap(),
///     loader.config().pay(),
/// );
///
/// assert_eq!(result.working_time.net_minutes, 600);
/// assert_eq!(result.pay.regular_pay, Decimal::from(12000));
/// assert_eq!(result.pay.overtime_pay, Decimal::from(3750));
/// assert_eq!(result.pay.total_pay, Decimal::from(15750));
/// ```
pub fn calculate_shift_pay(
    shift_type: &str,
    start: NaiveTime,
    end: NaiveTime,
    rates: &PayRates,
) -> ShiftCalculation {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: elapsed, break, net and night minutes
    let mut working_time = calculate_working_time(start, end, rates);
    steps.push(AuditStep {
        step_number,
        rule_id: "working_time".to_string(),
        rule_name: "Working Time".to_string(),
        input: serde_json::json!({
            "shift_type": shift_type,
            "start_time": format_clock(start),
            "end_time": format_clock(end),
            "break_minutes": rates.break_minutes
        }),
        output: serde_json::json!({
            "elapsed_minutes": working_time.elapsed_minutes,
            "break_minutes": working_time.break_minutes,
            "net_minutes": working_time.net_minutes,
            "night_minutes": working_time.night_minutes
        }),
        reasoning: if end < start {
            format!(
                "Shift crosses midnight: {} elapsed minutes less {} break minutes",
                working_time.elapsed_minutes, working_time.break_minutes
            )
        } else {
            format!(
                "{} elapsed minutes less {} break minutes",
                working_time.elapsed_minutes, working_time.break_minutes
            )
        },
    });
    step_number += 1;

    // Step 2: split at the overtime threshold
    let overtime = detect_overtime(
        working_time.net_minutes,
        rates.overtime_threshold_minutes(),
        step_number,
    );
    working_time.overtime_minutes = overtime.overtime_minutes;
    steps.push(overtime.audit_step);
    step_number += 1;

    // Step 3: regular and overtime pay
    let base = calculate_base_pay(
        overtime.regular_minutes,
        overtime.overtime_minutes,
        rates,
        step_number,
    );
    steps.push(base.audit_step);
    step_number += 1;

    // Step 4: night premium
    let night = calculate_night_premium(working_time.night_minutes, rates, step_number);
    steps.push(night.audit_step);
    step_number += 1;

    let total_pay = base.regular_pay + base.overtime_pay + night.night_pay;
    steps.push(AuditStep {
        step_number,
        rule_id: "total_pay".to_string(),
        rule_name: "Total Pay".to_string(),
        input: serde_json::json!({
            "regular_pay": base.regular_pay.normalize().to_string(),
            "overtime_pay": base.overtime_pay.normalize().to_string(),
            "night_pay": night.night_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_pay": total_pay.normalize().to_string()
        }),
        reasoning: format!(
            "¥{} regular + ¥{} overtime + ¥{} night premium = ¥{}",
            base.regular_pay.normalize(),
            base.overtime_pay.normalize(),
            night.night_pay.normalize(),
            total_pay.normalize()
        ),
    });

    debug!(
        shift_type,
        net_minutes = working_time.net_minutes,
        overtime_minutes = working_time.overtime_minutes,
        night_minutes = working_time.night_minutes,
        total_pay = %total_pay,
        "Calculated shift pay"
    );

    let pay = PayBreakdown {
        regular_hours: hours(overtime.regular_minutes),
        overtime_hours: hours(overtime.overtime_minutes),
        night_hours: hours(working_time.night_minutes),
        regular_pay: base.regular_pay,
        overtime_pay: base.overtime_pay,
        night_pay: night.night_pay,
        total_pay,
        has_night_hours: working_time.night_minutes > 0,
        has_overtime: overtime.overtime_minutes > 0,
    };

    ShiftCalculation {
        working_time,
        pay,
        audit_trace: AuditTrace { steps },
    }
}

fn hours(minutes: i64) -> Decimal {
    round_money(minutes_to_hours(minutes))
}
