//! Tax estimation models.
//!
//! Inputs and results of the tax engine. Results are always stored as yearly
//! figures; [`TaxBreakdown::view`] derives the monthly or yearly presentation
//! from those stored values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The period a gross income figure refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomePeriod {
    /// Income per month.
    #[default]
    Monthly,
    /// Income per year.
    Yearly,
}

impl IncomePeriod {
    /// Number of periods in a year: 12 for monthly, 1 for yearly.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay::models::IncomePeriod;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(IncomePeriod::Monthly.divisor(), Decimal::from(12));
    /// assert_eq!(IncomePeriod::Yearly.divisor(), Decimal::ONE);
    /// ```
    pub fn divisor(&self) -> Decimal {
        match self {
            IncomePeriod::Monthly => Decimal::from(12),
            IncomePeriod::Yearly => Decimal::ONE,
        }
    }

    /// Converts an amount for this period into a yearly amount.
    ///
    /// Returns `None` when the yearly amount does not fit in a [`Decimal`].
    pub fn annualize(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.divisor())
    }

    /// Lowercase name, as used in export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomePeriod::Monthly => "monthly",
            IncomePeriod::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for IncomePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncomePeriod::Monthly => write!(f, "Monthly"),
            IncomePeriod::Yearly => write!(f, "Yearly"),
        }
    }
}

/// How the income is earned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Salaried or hourly employee enrolled in employment insurance.
    #[default]
    Employee,
    /// Self-employed; no employment insurance.
    Freelance,
}

/// Which deduction model to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMethod {
    /// Fixed percentage of gross for every deduction.
    #[default]
    Flat,
    /// Progressive income-tax brackets after personal deductions.
    Progressive,
}

/// User-supplied tax calculation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross income for `period`.
    pub gross_income: Decimal,
    /// Whether `gross_income` is monthly or yearly.
    #[serde(default)]
    pub period: IncomePeriod,
    /// Age in years.
    pub age: u32,
    /// Number of dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Region code for the health-insurance rate lookup.
    pub region: String,
    /// Employment status.
    #[serde(default)]
    pub employment_status: EmploymentStatus,
}

impl TaxInput {
    /// Creates an input with the defaults used by the calculator form:
    /// age 25, no dependents, region `oita`, employee.
    pub fn new(gross_income: Decimal, period: IncomePeriod) -> Self {
        Self {
            gross_income,
            period,
            age: 25,
            dependents: 0,
            region: "oita".to_string(),
            employment_status: EmploymentStatus::Employee,
        }
    }

    /// The gross income annualized, or `None` on overflow.
    pub fn yearly_gross(&self) -> Option<Decimal> {
        self.period.annualize(self.gross_income)
    }
}

/// The five deduction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// National income tax.
    IncomeTax,
    /// Municipal and prefectural resident tax.
    ResidentTax,
    /// Health insurance premium.
    HealthInsurance,
    /// Employees' pension premium.
    Pension,
    /// Employment insurance premium.
    EmploymentInsurance,
}

impl DeductionKind {
    /// All kinds in display order.
    pub const ALL: [DeductionKind; 5] = [
        DeductionKind::IncomeTax,
        DeductionKind::ResidentTax,
        DeductionKind::HealthInsurance,
        DeductionKind::Pension,
        DeductionKind::EmploymentInsurance,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            DeductionKind::IncomeTax => "Income Tax",
            DeductionKind::ResidentTax => "Resident Tax",
            DeductionKind::HealthInsurance => "Health Insurance",
            DeductionKind::Pension => "Pension",
            DeductionKind::EmploymentInsurance => "Employment Insurance",
        }
    }
}

/// Amounts for each deduction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Income tax.
    pub income_tax: Decimal,
    /// Resident tax.
    pub resident_tax: Decimal,
    /// Health insurance.
    pub health_insurance: Decimal,
    /// Pension.
    pub pension: Decimal,
    /// Employment insurance.
    pub employment_insurance: Decimal,
}

impl Deductions {
    /// Sum of all five deductions.
    pub fn total(&self) -> Decimal {
        self.income_tax
            + self.resident_tax
            + self.health_insurance
            + self.pension
            + self.employment_insurance
    }

    /// Sum of all five deductions, or `None` on overflow.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.income_tax
            .checked_add(self.resident_tax)?
            .checked_add(self.health_insurance)?
            .checked_add(self.pension)?
            .checked_add(self.employment_insurance)
    }

    /// Amount for one category.
    pub fn get(&self, kind: DeductionKind) -> Decimal {
        match kind {
            DeductionKind::IncomeTax => self.income_tax,
            DeductionKind::ResidentTax => self.resident_tax,
            DeductionKind::HealthInsurance => self.health_insurance,
            DeductionKind::Pension => self.pension,
            DeductionKind::EmploymentInsurance => self.employment_insurance,
        }
    }

    /// Every amount divided by `divisor`.
    pub fn divided_by(&self, divisor: Decimal) -> Self {
        Self {
            income_tax: self.income_tax / divisor,
            resident_tax: self.resident_tax / divisor,
            health_insurance: self.health_insurance / divisor,
            pension: self.pension / divisor,
            employment_insurance: self.employment_insurance / divisor,
        }
    }
}

/// The result of a tax calculation, stored as yearly figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Model that produced the figures.
    pub method: TaxMethod,
    /// Period of the original gross input.
    pub input_period: IncomePeriod,
    /// Annualized gross income.
    pub yearly_gross: Decimal,
    /// Taxable income after personal deductions (progressive model only).
    pub taxable_income: Option<Decimal>,
    /// Yearly deductions.
    pub deductions: Deductions,
    /// Sum of yearly deductions.
    pub total_deductions: Decimal,
    /// Yearly gross minus total deductions.
    pub take_home: Decimal,
}

/// Amounts of a [`TaxBreakdown`] expressed for one display period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodView {
    /// The display period.
    pub period: IncomePeriod,
    /// Gross income for the period.
    pub gross: Decimal,
    /// Deductions for the period.
    pub deductions: Deductions,
    /// Total deductions for the period.
    pub total_deductions: Decimal,
    /// Take-home pay for the period.
    pub take_home: Decimal,
}

impl TaxBreakdown {
    /// Presents the stored yearly figures for `period`.
    ///
    /// Every amount is the yearly value divided by the period divisor, so the
    /// monthly view of a yearly calculation and the monthly view of a monthly
    /// calculation come from the same arithmetic.
    pub fn view(&self, period: IncomePeriod) -> PeriodView {
        let divisor = period.divisor();
        PeriodView {
            period,
            gross: self.yearly_gross / divisor,
            deductions: self.deductions.divided_by(divisor),
            total_deductions: self.total_deductions / divisor,
            take_home: self.take_home / divisor,
        }
    }

    /// Take-home pay as a percentage of gross.
    pub fn take_home_percentage(&self) -> Decimal {
        self.percentage_of_gross(self.take_home)
    }

    /// Total deductions as a percentage of gross.
    pub fn deduction_percentage(&self) -> Decimal {
        self.percentage_of_gross(self.total_deductions)
    }

    /// One deduction as a percentage of gross.
    pub fn effective_rate(&self, kind: DeductionKind) -> Decimal {
        self.percentage_of_gross(self.deductions.get(kind))
    }

    fn percentage_of_gross(&self, amount: Decimal) -> Decimal {
        if self.yearly_gross.is_zero() {
            return Decimal::ZERO;
        }
        amount / self.yearly_gross * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_breakdown() -> TaxBreakdown {
        let deductions = Deductions {
            income_tax: dec("63720"),
            resident_tax: dec("140040"),
            health_insurance: dec("225360"),
            pension: dec("340200"),
            employment_insurance: dec("33480"),
        };
        TaxBreakdown {
            method: TaxMethod::Flat,
            input_period: IncomePeriod::Monthly,
            yearly_gross: dec("3600000"),
            taxable_income: None,
            deductions,
            total_deductions: deductions.total(),
            take_home: dec("3600000") - deductions.total(),
        }
    }

    #[test]
    fn test_annualize_monthly() {
        assert_eq!(IncomePeriod::Monthly.annualize(dec("300000")), Some(dec("3600000")));
        assert_eq!(IncomePeriod::Yearly.annualize(dec("300000")), Some(dec("300000")));
    }

    #[test]
    fn test_annualize_overflow_is_none() {
        assert_eq!(IncomePeriod::Monthly.annualize(Decimal::MAX), None);
        assert_eq!(IncomePeriod::Yearly.annualize(Decimal::MAX), Some(Decimal::MAX));
    }

    #[test]
    fn test_checked_total_overflow_is_none() {
        let deductions = Deductions {
            income_tax: Decimal::MAX,
            resident_tax: Decimal::ONE,
            health_insurance: Decimal::ZERO,
            pension: Decimal::ZERO,
            employment_insurance: Decimal::ZERO,
        };
        assert_eq!(deductions.checked_total(), None);
        assert_eq!(sample_breakdown().deductions.checked_total(), Some(dec("802800")));
    }

    #[test]
    fn test_deductions_total() {
        let breakdown = sample_breakdown();
        assert_eq!(breakdown.total_deductions, dec("802800"));
        assert_eq!(breakdown.take_home, dec("2797200"));
    }

    #[test]
    fn test_monthly_view_divides_stored_yearly_figures() {
        let view = sample_breakdown().view(IncomePeriod::Monthly);
        assert_eq!(view.gross, dec("300000"));
        assert_eq!(view.take_home, dec("233100"));
        assert_eq!(view.deductions.income_tax, dec("5310"));
        assert_eq!(view.total_deductions, dec("66900"));
    }

    #[test]
    fn test_yearly_view_is_identity() {
        let breakdown = sample_breakdown();
        let view = breakdown.view(IncomePeriod::Yearly);
        assert_eq!(view.gross, breakdown.yearly_gross);
        assert_eq!(view.deductions, breakdown.deductions);
    }

    #[test]
    fn test_percentages() {
        let breakdown = sample_breakdown();
        assert_eq!(breakdown.take_home_percentage(), dec("77.7"));
        assert_eq!(breakdown.deduction_percentage(), dec("22.3"));
        assert_eq!(breakdown.effective_rate(DeductionKind::Pension), dec("9.45"));
    }

    #[test]
    fn test_percentage_of_zero_gross_is_zero() {
        let mut breakdown = sample_breakdown();
        breakdown.yearly_gross = Decimal::ZERO;
        assert_eq!(breakdown.take_home_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_tax_input_defaults_from_json() {
        let json = r#"{"gross_income": "250000", "age": 31, "region": "tokyo"}"#;
        let input: TaxInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.period, IncomePeriod::Monthly);
        assert_eq!(input.dependents, 0);
        assert_eq!(input.employment_status, EmploymentStatus::Employee);
        assert_eq!(input.yearly_gross(), Some(dec("3000000")));
    }

    #[test]
    fn test_period_display_and_str() {
        assert_eq!(IncomePeriod::Monthly.to_string(), "Monthly");
        assert_eq!(IncomePeriod::Yearly.as_str(), "yearly");
    }

    #[test]
    fn test_deduction_kind_labels_in_order() {
        let labels: Vec<_> = DeductionKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Income Tax",
                "Resident Tax",
                "Health Insurance",
                "Pension",
                "Employment Insurance"
            ]
        );
    }
}
