//! Flat-rate deduction model.
//!
//! Every deduction is a fixed share of gross income, regardless of income
//! level, age, region or household.

use rust_decimal::Decimal;

use crate::config::FlatTaxRates;
use crate::error::EngineResult;
use crate::models::{Deductions, IncomePeriod, TaxBreakdown, TaxMethod};

use super::income_too_large;

/// Applies the flat rates to a yearly gross income.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIncome`](crate::error::EngineError::InvalidIncome)
/// when a deduction or the total overflows.
///
/// # Example
///
/// ```no_run
/// use shift_pay::calculation::calculate_flat_tax;
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::models::IncomePeriod;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let result = calculate_flat_tax(
///     Decimal::from(3_600_000),
///     IncomePeriod::Monthly,
///     &loader.config().tax().flat,
/// )
/// .unwrap();
///
/// assert_eq!(result.total_deductions, Decimal::from(802_800));
/// assert_eq!(result.take_home, Decimal::from(2_797_200));
/// ```
pub fn calculate_flat_tax(
    yearly_gross: Decimal,
    input_period: IncomePeriod,
    rates: &FlatTaxRates,
) -> EngineResult<TaxBreakdown> {
    let share = |rate: Decimal| {
        yearly_gross
            .checked_mul(rate)
            .ok_or_else(|| income_too_large(yearly_gross))
    };

    let deductions = Deductions {
        income_tax: share(rates.income_tax)?,
        resident_tax: share(rates.resident_tax)?,
        health_insurance: share(rates.health_insurance)?,
        pension: share(rates.pension)?,
        employment_insurance: share(rates.employment_insurance)?,
    };
    let total_deductions = deductions
        .checked_total()
        .ok_or_else(|| income_too_large(yearly_gross))?;
    let take_home = yearly_gross
        .checked_sub(total_deductions)
        .ok_or_else(|| income_too_large(yearly_gross))?;

    Ok(TaxBreakdown {
        method: TaxMethod::Flat,
        input_period,
        yearly_gross,
        taxable_income: None,
        deductions,
        total_deductions,
        take_home,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> FlatTaxRates {
        FlatTaxRates {
            income_tax: dec("0.0177"),
            resident_tax: dec("0.0389"),
            health_insurance: dec("0.0626"),
            pension: dec("0.0945"),
            employment_insurance: dec("0.0093"),
        }
    }

    #[test]
    fn test_monthly_300k_yearly_figures() {
        let result = calculate_flat_tax(dec("3600000"), IncomePeriod::Monthly, &rates()).unwrap();

        assert_eq!(result.deductions.income_tax, dec("63720"));
        assert_eq!(result.deductions.resident_tax, dec("140040"));
        assert_eq!(result.deductions.health_insurance, dec("225360"));
        assert_eq!(result.deductions.pension, dec("340200"));
        assert_eq!(result.deductions.employment_insurance, dec("33480"));
        assert_eq!(result.total_deductions, dec("802800"));
        assert_eq!(result.take_home, dec("2797200"));
        assert_eq!(result.taxable_income, None);
        assert_eq!(result.method, TaxMethod::Flat);
    }

    #[test]
    fn test_monthly_view_divides_by_twelve() {
        let result = calculate_flat_tax(dec("3600000"), IncomePeriod::Monthly, &rates()).unwrap();
        let view = result.view(IncomePeriod::Monthly);

        assert_eq!(view.gross, dec("300000"));
        assert_eq!(view.total_deductions, dec("66900"));
        assert_eq!(view.take_home, dec("233100"));
    }

    #[test]
    fn test_take_home_percentage() {
        let result = calculate_flat_tax(dec("3600000"), IncomePeriod::Yearly, &rates()).unwrap();
        assert_eq!(result.take_home_percentage(), dec("77.7"));
        assert_eq!(result.deduction_percentage(), dec("22.3"));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let rates = FlatTaxRates {
            income_tax: Decimal::ONE,
            resident_tax: Decimal::ONE,
            health_insurance: Decimal::ZERO,
            pension: Decimal::ZERO,
            employment_insurance: Decimal::ZERO,
        };
        match calculate_flat_tax(Decimal::MAX, IncomePeriod::Yearly, &rates) {
            Err(EngineError::InvalidIncome { message }) => {
                assert!(message.contains("too large"));
            }
            other => panic!("Expected InvalidIncome, got {:?}", other),
        }
    }
}
