//! Tax calculation entry point.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBreakdown, TaxInput, TaxMethod};

use super::{calculate_flat_tax, calculate_progressive_tax, income_too_large};

/// Estimates yearly deductions and take-home pay for `input`.
///
/// The gross income is annualized first; every figure in the result is
/// yearly, and [`TaxBreakdown::view`] derives the monthly presentation.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIncome`] when the gross income is zero or
/// negative, or too large for the annualized figures to fit in a [`Decimal`].
///
/// # Example
///
/// ```no_run
/// use shift_pay::calculation::calculate_tax;
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::models::{IncomePeriod, TaxInput, TaxMethod};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let input = TaxInput::new(Decimal::from(300_000), IncomePeriod::Monthly);
/// let result = calculate_tax(&input, TaxMethod::Flat, loader.config().tax()).unwrap();
///
/// assert_eq!(result.yearly_gross, Decimal::from(3_600_000));
/// assert_eq!(result.view(IncomePeriod::Monthly).take_home, Decimal::from(233_100));
/// ```
pub fn calculate_tax(
    input: &TaxInput,
    method: TaxMethod,
    config: &TaxConfig,
) -> EngineResult<TaxBreakdown> {
    if input.gross_income <= Decimal::ZERO {
        warn!(gross_income = %input.gross_income, "Rejected tax calculation");
        return Err(EngineError::InvalidIncome {
            message: format!("{} must be greater than zero", input.gross_income),
        });
    }

    let breakdown = input
        .yearly_gross()
        .ok_or_else(|| income_too_large(input.gross_income))
        .and_then(|yearly_gross| match method {
            TaxMethod::Flat => calculate_flat_tax(yearly_gross, input.period, &config.flat),
            TaxMethod::Progressive => {
                calculate_progressive_tax(yearly_gross, input, &config.progressive)
            }
        })
        .inspect_err(|e| warn!(gross_income = %input.gross_income, error = %e, "Rejected tax calculation"))?;

    info!(
        method = ?method,
        period = %input.period,
        yearly_gross = %breakdown.yearly_gross,
        total_deductions = %breakdown.total_deductions,
        take_home = %breakdown.take_home,
        "Tax calculation completed"
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::IncomePeriod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tax_config() -> TaxConfig {
        ConfigLoader::load("./config/jp")
            .unwrap()
            .config()
            .tax()
            .clone()
    }

    #[test]
    fn test_monthly_and_yearly_inputs_agree() {
        let config = tax_config();
        let monthly = TaxInput::new(dec("300000"), IncomePeriod::Monthly);
        let yearly = TaxInput::new(dec("3600000"), IncomePeriod::Yearly);

        for method in [TaxMethod::Flat, TaxMethod::Progressive] {
            let a = calculate_tax(&monthly, method, &config).unwrap();
            let b = calculate_tax(&yearly, method, &config).unwrap();
            assert_eq!(a.deductions, b.deductions);
            assert_eq!(a.take_home, b.take_home);
            assert_eq!(
                a.view(IncomePeriod::Monthly).take_home,
                b.view(IncomePeriod::Monthly).take_home
            );
        }
    }

    #[test]
    fn test_zero_income_rejected() {
        let input = TaxInput::new(Decimal::ZERO, IncomePeriod::Monthly);
        let result = calculate_tax(&input, TaxMethod::Flat, &tax_config());
        assert!(matches!(result, Err(EngineError::InvalidIncome { .. })));
    }

    #[test]
    fn test_negative_income_rejected() {
        let input = TaxInput::new(dec("-1"), IncomePeriod::Yearly);
        let result = calculate_tax(&input, TaxMethod::Progressive, &tax_config());
        assert!(matches!(result, Err(EngineError::InvalidIncome { .. })));
    }

    #[test]
    fn test_income_too_large_to_annualize_rejected() {
        let input = TaxInput::new(dec("7000000000000000000000000000"), IncomePeriod::Monthly);
        let config = tax_config();

        for method in [TaxMethod::Flat, TaxMethod::Progressive] {
            match calculate_tax(&input, method, &config) {
                Err(EngineError::InvalidIncome { message }) => {
                    assert!(message.contains("too large"));
                }
                other => panic!("Expected InvalidIncome, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_method_recorded_on_result() {
        let input = TaxInput::new(dec("250000"), IncomePeriod::Monthly);
        let config = tax_config();
        assert_eq!(
            calculate_tax(&input, TaxMethod::Progressive, &config).unwrap().method,
            TaxMethod::Progressive
        );
        assert_eq!(
            calculate_tax(&input, TaxMethod::default(), &config).unwrap().method,
            TaxMethod::Flat
        );
    }

    #[test]
    fn test_take_home_plus_deductions_equals_gross() {
        let input = TaxInput::new(dec("412345"), IncomePeriod::Monthly);
        let result = calculate_tax(&input, TaxMethod::Progressive, &tax_config()).unwrap();
        assert_eq!(result.take_home + result.total_deductions, result.yearly_gross);
    }
}
