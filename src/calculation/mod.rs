//! Calculation logic for shift pay and tax estimation.
//!
//! The pay side turns a shift's clock times into working time and pay:
//! working time, daily overtime detection, regular and overtime pay, and the
//! night premium. The tax side estimates yearly deductions with either the
//! flat-rate or the progressive model.

mod flat_tax;
mod night_premium;
mod overtime;
mod progressive_tax;
mod shift_pay;
mod tax;
mod working_time;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EngineError;

pub use flat_tax::calculate_flat_tax;
pub use night_premium::{NightPremiumResult, calculate_night_premium};
pub use overtime::{BasePayResult, OvertimeDetection, calculate_base_pay, detect_overtime};
pub use progressive_tax::{bracket_income_tax, calculate_progressive_tax, taxable_income};
pub use shift_pay::calculate_shift_pay;
pub use tax::calculate_tax;
pub use working_time::{calculate_working_time, elapsed_minutes, night_overlap_minutes};

/// Rounds a pay amount to 2 decimal places, half away from zero.
pub(crate) fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Error for a gross income whose deductions do not fit in a [`Decimal`].
pub(crate) fn income_too_large(gross: Decimal) -> EngineError {
    EngineError::InvalidIncome {
        message: format!("{} is too large to calculate", gross),
    }
}
