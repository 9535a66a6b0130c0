//! Daily overtime functionality.
//!
//! Splits the net working minutes of a shift into regular and overtime
//! portions and prices both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayRates;
use crate::models::{AuditStep, minutes_to_hours};

use super::round_money;

/// The result of splitting a shift's net minutes at the overtime threshold.
///
/// # Example
///
/// ```
/// use shift_pay::calculation::detect_overtime;
///
/// let detection = detect_overtime(600, 480, 2);
/// assert_eq!(detection.regular_minutes, 480);
/// assert_eq!(detection.overtime_minutes, 120);
/// assert_eq!(detection.audit_step.rule_id, "daily_overtime_detection");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeDetection {
    /// Minutes up to the threshold.
    pub regular_minutes: i64,
    /// Minutes beyond the threshold.
    pub overtime_minutes: i64,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Splits `net_minutes` at `threshold_minutes`.
///
/// Overtime is `max(0, net - threshold)`; regular minutes are the remainder,
/// so `regular + overtime == net` always holds.
pub fn detect_overtime(net_minutes: i64, threshold_minutes: i64, step_number: u32) -> OvertimeDetection {
    let overtime_minutes = (net_minutes - threshold_minutes).max(0);
    let regular_minutes = net_minutes - overtime_minutes;

    let worked = minutes_to_hours(net_minutes).normalize();
    let threshold = minutes_to_hours(threshold_minutes).normalize();

    let reasoning = if overtime_minutes > 0 {
        format!(
            "{} hours worked exceeds {} hour threshold by {} minutes, triggering overtime",
            worked, threshold, overtime_minutes
        )
    } else if net_minutes == threshold_minutes {
        format!(
            "{} hours worked equals {} hour threshold, no overtime triggered",
            worked, threshold
        )
    } else {
        format!(
            "{} hours worked is under {} hour threshold, no overtime triggered",
            worked, threshold
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_overtime_detection".to_string(),
        rule_name: "Daily Overtime Detection".to_string(),
        input: serde_json::json!({
            "net_minutes": net_minutes,
            "threshold_minutes": threshold_minutes
        }),
        output: serde_json::json!({
            "regular_minutes": regular_minutes,
            "overtime_minutes": overtime_minutes
        }),
        reasoning,
    };

    OvertimeDetection {
        regular_minutes,
        overtime_minutes,
        audit_step,
    }
}

/// Regular and overtime pay for a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePayResult {
    /// Regular minutes at the base rate, rounded to 2 decimal places.
    pub regular_pay: Decimal,
    /// Overtime minutes at base rate times the overtime multiplier, rounded.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices the regular and overtime minutes.
///
/// Both components multiply before dividing by 60 so that minute counts
/// which are not whole hours do not accumulate rounding error.
///
/// # Example
///
/// ```no_run
/// use shift_pay::calculation::calculate_base_pay;
/// use shift_pay::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let result = calculate_base_pay(480, 120, loader.config().pay(), 3);
/// // 8h x 1500 and 2h x 1500 x 1.25
/// assert_eq!(result.regular_pay, Decimal::from(12000));
/// assert_eq!(result.overtime_pay, Decimal::from(3750));
/// ```
pub fn calculate_base_pay(
    regular_minutes: i64,
    overtime_minutes: i64,
    rates: &PayRates,
    step_number: u32,
) -> BasePayResult {
    let sixty = Decimal::from(60);
    let regular_pay = round_money(rates.regular_rate * Decimal::from(regular_minutes) / sixty);
    let overtime_rate = rates.regular_rate * rates.overtime_multiplier;
    let overtime_pay = round_money(overtime_rate * Decimal::from(overtime_minutes) / sixty);

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay".to_string(),
        rule_name: "Regular and Overtime Pay".to_string(),
        input: serde_json::json!({
            "regular_minutes": regular_minutes,
            "overtime_minutes": overtime_minutes,
            "regular_rate": rates.regular_rate.normalize().to_string(),
            "overtime_multiplier": rates.overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} regular minutes x ¥{}/h = ¥{}; {} overtime minutes x ¥{}/h = ¥{}",
            regular_minutes,
            rates.regular_rate.normalize(),
            regular_pay.normalize(),
            overtime_minutes,
            overtime_rate.normalize(),
            overtime_pay.normalize()
        ),
    };

    BasePayResult {
        regular_pay,
        overtime_pay,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> PayRates {
        PayRates {
            regular_rate: dec("1500"),
            night_multiplier: dec("1.25"),
            overtime_multiplier: dec("1.25"),
            overtime_threshold_hours: 8,
            night_window_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            night_window_end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
            break_minutes: 60,
        }
    }

    #[test]
    fn test_exactly_threshold_no_overtime() {
        let result = detect_overtime(480, 480, 1);

        assert_eq!(result.regular_minutes, 480);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.input["threshold_minutes"], 480);
        assert!(result.audit_step.reasoning.contains("equals"));
    }

    #[test]
    fn test_ten_hours_two_hours_overtime() {
        let result = detect_overtime(600, 480, 1);

        assert_eq!(result.regular_minutes, 480);
        assert_eq!(result.overtime_minutes, 120);
        assert_eq!(result.audit_step.output["overtime_minutes"], 120);
        assert!(result.audit_step.reasoning.contains("exceeds"));
    }

    #[test]
    fn test_under_threshold() {
        let result = detect_overtime(460, 480, 1);

        assert_eq!(result.regular_minutes, 460);
        assert_eq!(result.overtime_minutes, 0);
        assert!(result.audit_step.reasoning.contains("under"));
    }

    #[test]
    fn test_one_minute_over() {
        let result = detect_overtime(481, 480, 1);
        assert_eq!(result.regular_minutes, 480);
        assert_eq!(result.overtime_minutes, 1);
    }

    #[test]
    fn test_zero_minutes() {
        let result = detect_overtime(0, 480, 1);
        assert_eq!(result.regular_minutes, 0);
        assert_eq!(result.overtime_minutes, 0);
    }

    #[test]
    fn test_step_number_passed_through() {
        assert_eq!(detect_overtime(600, 480, 5).audit_step.step_number, 5);
    }

    #[test]
    fn test_base_pay_with_overtime() {
        let result = calculate_base_pay(480, 120, &rates(), 3);
        assert_eq!(result.regular_pay, dec("12000"));
        assert_eq!(result.overtime_pay, dec("3750"));
        assert_eq!(result.audit_step.rule_id, "base_pay");
    }

    #[test]
    fn test_base_pay_partial_hours() {
        // 460 minutes = 7h40m at 1500/h
        let result = calculate_base_pay(460, 0, &rates(), 3);
        assert_eq!(result.regular_pay, dec("11500"));
        assert_eq!(result.overtime_pay, Decimal::ZERO);
    }

    #[test]
    fn test_base_pay_rounds_to_sen() {
        let mut rates = rates();
        rates.regular_rate = dec("1001");
        // 1001 * 7 / 60 = 116.78333...
        let result = calculate_base_pay(7, 0, &rates, 3);
        assert_eq!(result.regular_pay, dec("116.78"));
    }
}
