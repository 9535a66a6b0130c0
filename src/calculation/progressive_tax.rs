//! Progressive deduction model.
//!
//! Income tax is charged per bracket on taxable income after the basic and
//! dependent deductions. Social insurance is charged on gross income, with
//! the health insurance rate depending on the region and pension and
//! employment insurance depending on age and employment status.

use rust_decimal::Decimal;

use crate::config::{ProgressiveTaxConfig, TaxBracket};
use crate::error::EngineResult;
use crate::models::{Deductions, EmploymentStatus, TaxBreakdown, TaxInput, TaxMethod};

use super::income_too_large;

/// Sums the tax owed on `taxable` across the brackets.
///
/// Each bracket covers the half-open interval `[min, max)` and taxes only the
/// slice of income inside it; the last bracket is unbounded. The result is
/// continuous at every bracket boundary.
///
/// # Example
///
/// ```
/// use shift_pay::calculation::bracket_income_tax;
/// use shift_pay::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     TaxBracket { min: d("0"), max: Some(d("1950000")), rate: d("0.05") },
///     TaxBracket { min: d("1950000"), max: None, rate: d("0.10") },
/// ];
/// // 1,950,000 x 5% + 50,000 x 10%
/// assert_eq!(bracket_income_tax(d("2000000"), &brackets), d("102500"));
/// ```
pub fn bracket_income_tax(taxable: Decimal, brackets: &[TaxBracket]) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    brackets
        .iter()
        .take_while(|b| taxable > b.min)
        .map(|b| {
            let upper = match b.max {
                Some(max) => taxable.min(max),
                None => taxable,
            };
            (upper - b.min) * b.rate
        })
        .sum()
}

/// Income left after the basic and per-dependent deductions, floored at zero.
pub fn taxable_income(yearly_gross: Decimal, dependents: u32, config: &ProgressiveTaxConfig) -> Decimal {
    let personal = config.basic_deduction + config.dependent_deduction * Decimal::from(dependents);
    (yearly_gross - personal).max(Decimal::ZERO)
}

/// Applies the progressive model to `input`.
///
/// `yearly_gross` must already be annualized; `input` supplies the age,
/// dependents, region and employment status.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIncome`](crate::error::EngineError::InvalidIncome)
/// when a deduction, the total or the take-home amount overflows.
pub fn calculate_progressive_tax(
    yearly_gross: Decimal,
    input: &TaxInput,
    config: &ProgressiveTaxConfig,
) -> EngineResult<TaxBreakdown> {
    let taxable = taxable_income(yearly_gross, input.dependents, config);
    let share = |base: Decimal, rate: Decimal| {
        base.checked_mul(rate)
            .ok_or_else(|| income_too_large(yearly_gross))
    };

    let pension = if input.age >= config.pension_age_limit {
        Decimal::ZERO
    } else {
        share(yearly_gross, config.pension_rate)?
    };
    let employment_insurance = match input.employment_status {
        EmploymentStatus::Employee => share(yearly_gross, config.employment_insurance_rate)?,
        EmploymentStatus::Freelance => Decimal::ZERO,
    };

    let deductions = Deductions {
        income_tax: bracket_income_tax(taxable, &config.brackets),
        resident_tax: share(taxable, config.resident_tax_rate)?,
        health_insurance: share(yearly_gross, config.health_insurance.rate_for(&input.region))?,
        pension,
        employment_insurance,
    };
    let total_deductions = deductions
        .checked_total()
        .ok_or_else(|| income_too_large(yearly_gross))?;
    let take_home = yearly_gross
        .checked_sub(total_deductions)
        .ok_or_else(|| income_too_large(yearly_gross))?;

    Ok(TaxBreakdown {
        method: TaxMethod::Progressive,
        input_period: input.period,
        yearly_gross,
        taxable_income: Some(taxable),
        deductions,
        total_deductions,
        take_home,
    })
}
