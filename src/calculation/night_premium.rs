//! Night premium calculation.

use rust_decimal::Decimal;

use crate::config::PayRates;
use crate::models::AuditStep;

use super::round_money;

/// The result of a night premium calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightPremiumResult {
    /// Premium paid on top of base pay for night minutes.
    pub night_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the night premium for `night_minutes`.
///
/// Base pay for those minutes is already part of the regular or overtime
/// component, so only the `night_multiplier - 1` portion is paid here.
/// Night minutes that are also overtime minutes still earn the premium.
///
/// # Examples
///
/// ```no_run
/// use shift_pay::calculation::calculate_night_premium;
/// use shift_pay::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// // 205 minutes x 1500 x 0.25 / 60
/// let result = calculate_night_premium(205, loader.config().pay(), 4);
/// assert_eq!(result.night_pay, Decimal::from_str("1281.25").unwrap());
/// ```
pub fn calculate_night_premium(night_minutes: i64, rates: &PayRates, step_number: u32) -> NightPremiumResult {
    let premium_rate = rates.regular_rate * (rates.night_multiplier - Decimal::ONE);
    let night_pay = round_money(premium_rate * Decimal::from(night_minutes) / Decimal::from(60));

    let reasoning = if night_minutes > 0 {
        format!(
            "{} minutes between {} and {} earn a ¥{}/h premium = ¥{}",
            night_minutes,
            rates.night_window_start.format("%H:%M"),
            rates.night_window_end.format("%H:%M"),
            premium_rate.normalize(),
            night_pay.normalize()
        )
    } else {
        "No working minutes in the night window".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "night_premium".to_string(),
        rule_name: "Night Premium".to_string(),
        input: serde_json::json!({
            "night_minutes": night_minutes,
            "regular_rate": rates.regular_rate.normalize().to_string(),
            "night_multiplier": rates.night_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "premium_rate": premium_rate.normalize().to_string(),
            "night_pay": night_pay.normalize().to_string()
        }),
        reasoning,
    };

    NightPremiumResult {
        night_pay,
        audit_step,
    }
}
