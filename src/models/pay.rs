//! Pay calculation result models.
//!
//! This module contains the [`ShiftCalculation`] type and its associated
//! structures that capture the outputs of the pay engine for one shift:
//! the working-time breakdown, the pay breakdown, and an audit trace of the
//! rules that produced them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minute-level breakdown of a shift.
///
/// `net_minutes + break_minutes == elapsed_minutes` always holds for values
/// produced by the engine. Night and overtime minutes are subsets of the net
/// working minutes and may overlap each other.
///
/// # Example
///
/// ```
/// use shift_pay::models::WorkingTime;
/// use rust_decimal::Decimal;
///
/// let time = WorkingTime {
///     elapsed_minutes: 660,
///     break_minutes: 60,
///     net_minutes: 600,
///     night_minutes: 0,
///     overtime_minutes: 120,
/// };
/// assert_eq!(time.net_hours(), Decimal::new(10, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingTime {
    /// Minutes from start to end, crossing midnight when end is before start.
    pub elapsed_minutes: i64,
    /// Unpaid break minutes deducted from the elapsed time.
    pub break_minutes: i64,
    /// Paid working minutes.
    pub net_minutes: i64,
    /// Working minutes inside the night window.
    pub night_minutes: i64,
    /// Working minutes beyond the daily overtime threshold.
    pub overtime_minutes: i64,
}

impl WorkingTime {
    /// A zero-length shift.
    pub const ZERO: WorkingTime = WorkingTime {
        elapsed_minutes: 0,
        break_minutes: 0,
        net_minutes: 0,
        night_minutes: 0,
        overtime_minutes: 0,
    };

    /// Net working time in hours.
    pub fn net_hours(&self) -> Decimal {
        minutes_to_hours(self.net_minutes)
    }

    /// Net minutes not classified as overtime.
    pub fn regular_minutes(&self) -> i64 {
        self.net_minutes - self.overtime_minutes
    }
}

/// Converts whole minutes to hours.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Pay components for a single shift.
///
/// `total_pay` is always the sum of `regular_pay`, `overtime_pay` and
/// `night_pay`. Night pay is the premium portion only; the base pay for night
/// hours is already inside the regular or overtime component.
///
/// # Example
///
/// ```
/// use shift_pay::models::PayBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pay = PayBreakdown {
///     regular_hours: Decimal::from_str("8").unwrap(),
///     overtime_hours: Decimal::from_str("2").unwrap(),
///     night_hours: Decimal::ZERO,
///     regular_pay: Decimal::from_str("12000").unwrap(),
///     overtime_pay: Decimal::from_str("3750").unwrap(),
///     night_pay: Decimal::ZERO,
///     total_pay: Decimal::from_str("15750").unwrap(),
///     has_night_hours: false,
///     has_overtime: true,
/// };
/// assert!(pay.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBreakdown {
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours earning the night premium.
    pub night_hours: Decimal,
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Night premium on top of the base pay.
    pub night_pay: Decimal,
    /// Sum of the three pay components.
    pub total_pay: Decimal,
    /// Whether any working minute fell in the night window.
    pub has_night_hours: bool,
    /// Whether the shift exceeded the daily overtime threshold.
    pub has_overtime: bool,
}

impl PayBreakdown {
    /// An all-zero breakdown.
    pub fn zero() -> Self {
        Self {
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            regular_pay: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            night_pay: Decimal::ZERO,
            total_pay: Decimal::ZERO,
            has_night_hours: false,
            has_overtime: false,
        }
    }

    /// Returns true when the total equals the sum of its components.
    pub fn is_consistent(&self) -> bool {
        self.total_pay == self.regular_pay + self.overtime_pay + self.night_pay
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Returns the step with the given rule identifier, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of a shift pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCalculation {
    /// Minute-level working time.
    pub working_time: WorkingTime,
    /// Pay components.
    pub pay: PayBreakdown,
    /// Rules applied, in order.
    pub audit_trace: AuditTrace,
}
