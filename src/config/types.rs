//! Configuration types for pay and tax calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, MINUTES_PER_DAY, ShiftKind, hhmm};

/// Hourly rate and the multipliers applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayRates {
    /// Base hourly rate in yen.
    pub regular_rate: Decimal,
    /// Multiplier for hours in the night window (e.g. 1.25).
    pub night_multiplier: Decimal,
    /// Multiplier for hours beyond the daily threshold (e.g. 1.25).
    pub overtime_multiplier: Decimal,
    /// Net hours per shift before overtime applies.
    pub overtime_threshold_hours: u32,
    /// Start of the night window.
    #[serde(with = "hhmm")]
    pub night_window_start: NaiveTime,
    /// End of the night window; before the start when the window wraps midnight.
    #[serde(with = "hhmm")]
    pub night_window_end: NaiveTime,
    /// Unpaid break deducted from every shift.
    pub break_minutes: i64,
}

impl PayRates {
    /// Checks that the rates describe a usable pay policy.
    pub fn validate(&self) -> EngineResult<()> {
        if self.regular_rate < Decimal::ZERO {
            return Err(invalid("regular_rate must not be negative"));
        }
        if self.night_multiplier < Decimal::ONE || self.overtime_multiplier < Decimal::ONE {
            return Err(invalid("multipliers must be at least 1"));
        }
        if !(0..MINUTES_PER_DAY).contains(&self.break_minutes) {
            return Err(invalid("break_minutes must be within one day"));
        }
        if self.night_window_start == self.night_window_end {
            return Err(invalid("night window must not be empty"));
        }
        Ok(())
    }

    /// The daily overtime threshold in minutes.
    pub fn overtime_threshold_minutes(&self) -> i64 {
        i64::from(self.overtime_threshold_hours) * 60
    }
}

/// A shift type code and its default times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShiftTypeConfig {
    /// The code recorded on shifts (e.g. `"C341"`).
    pub code: String,
    /// Display label.
    pub label: String,
    /// Day or night shift.
    pub kind: ShiftKind,
    /// Default start time used by quick-add.
    #[serde(with = "hhmm")]
    pub default_start: NaiveTime,
    /// Default end time used by quick-add.
    #[serde(with = "hhmm")]
    pub default_end: NaiveTime,
}

/// Shift types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypesConfig {
    /// The fixed set of shift types.
    pub shift_types: Vec<ShiftTypeConfig>,
}

/// Flat deduction percentages, each applied to gross income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FlatTaxRates {
    /// Income tax rate.
    pub income_tax: Decimal,
    /// Resident tax rate.
    pub resident_tax: Decimal,
    /// Health insurance rate.
    pub health_insurance: Decimal,
    /// Pension rate.
    pub pension: Decimal,
    /// Employment insurance rate.
    pub employment_insurance: Decimal,
}

impl FlatTaxRates {
    /// Sum of all five rates.
    pub fn total_rate(&self) -> Decimal {
        self.income_tax
            + self.resident_tax
            + self.health_insurance
            + self.pension
            + self.employment_insurance
    }

    fn validate(&self) -> EngineResult<()> {
        for rate in [
            self.income_tax,
            self.resident_tax,
            self.health_insurance,
            self.pension,
            self.employment_insurance,
        ] {
            check_rate(rate, "flat rate")?;
        }
        if self.total_rate() > Decimal::ONE {
            return Err(invalid("flat rates must not exceed 100% in total"));
        }
        Ok(())
    }
}

/// One bracket of the progressive income tax, the half-open range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of taxable income.
    pub min: Decimal,
    /// Upper bound; `None` for the top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate for income inside the bracket.
    pub rate: Decimal,
}

/// Health-insurance rates by region with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthInsuranceRates {
    /// Rate used when the region is not listed.
    pub default_rate: Decimal,
    /// Lowercase region code to rate. Keys are lowercased on load.
    #[serde(default, deserialize_with = "lowercase_keys")]
    pub regions: HashMap<String, Decimal>,
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<HashMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Decimal>::deserialize(deserializer)?;
    let mut regions = HashMap::with_capacity(raw.len());
    for (region, rate) in raw {
        let key = region.trim().to_lowercase();
        if regions.insert(key.clone(), rate).is_some() {
            return Err(serde::de::Error::custom(format!(
                "region {} is listed more than once",
                key
            )));
        }
    }
    Ok(regions)
}

impl HealthInsuranceRates {
    /// Rate for a region code, case-insensitive, falling back to the default.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay::config::HealthInsuranceRates;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    /// use std::str::FromStr;
    ///
    /// let rates = HealthInsuranceRates {
    ///     default_rate: Decimal::from_str("0.05").unwrap(),
    ///     regions: HashMap::from([("tokyo".to_string(), Decimal::from_str("0.04955").unwrap())]),
    /// };
    /// assert_eq!(rates.rate_for("Tokyo"), Decimal::from_str("0.04955").unwrap());
    /// assert_eq!(rates.rate_for("atlantis"), Decimal::from_str("0.05").unwrap());
    /// ```
    pub fn rate_for(&self, region: &str) -> Decimal {
        self.regions
            .get(&region.trim().to_lowercase())
            .copied()
            .unwrap_or(self.default_rate)
    }
}

/// Progressive-bracket deduction model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressiveTaxConfig {
    /// Basic deduction subtracted from gross before tax.
    pub basic_deduction: Decimal,
    /// Deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Flat resident-tax rate on taxable income.
    pub resident_tax_rate: Decimal,
    /// Pension rate on gross.
    pub pension_rate: Decimal,
    /// Age from which pension premiums stop.
    pub pension_age_limit: u32,
    /// Employment-insurance rate on gross.
    pub employment_insurance_rate: Decimal,
    /// Regional health-insurance rates.
    pub health_insurance: HealthInsuranceRates,
    /// Income tax brackets, ascending and contiguous.
    pub brackets: Vec<TaxBracket>,
}

impl ProgressiveTaxConfig {
    /// Checks brackets and rates.
    ///
    /// Brackets must start at zero, each `min` must equal the previous `max`,
    /// and only the last bracket may be unbounded.
    pub fn validate(&self) -> EngineResult<()> {
        check_rate(self.resident_tax_rate, "resident_tax_rate")?;
        check_rate(self.pension_rate, "pension_rate")?;
        check_rate(self.employment_insurance_rate, "employment_insurance_rate")?;
        check_rate(self.health_insurance.default_rate, "health_insurance.default_rate")?;
        for (region, rate) in &self.health_insurance.regions {
            if *region != region.trim().to_lowercase() {
                return Err(invalid(&format!("region {} must be lowercase", region)));
            }
            check_rate(*rate, &format!("health_insurance.regions.{}", region))?;
        }
        if self.basic_deduction < Decimal::ZERO || self.dependent_deduction < Decimal::ZERO {
            return Err(invalid("deductions must not be negative"));
        }

        let first = self
            .brackets
            .first()
            .ok_or_else(|| invalid("at least one tax bracket is required"))?;
        if !first.min.is_zero() {
            return Err(invalid("the first tax bracket must start at 0"));
        }

        let last_index = self.brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            check_rate(bracket.rate, "bracket rate")?;
            if bracket.min != expected_min {
                return Err(invalid(&format!(
                    "tax bracket {} starts at {} but the previous bracket ends at {}",
                    i, bracket.min, expected_min
                )));
            }
            match bracket.max {
                Some(max) if max <= bracket.min => {
                    return Err(invalid(&format!("tax bracket {} is empty", i)));
                }
                Some(max) => expected_min = max,
                None if i != last_index => {
                    return Err(invalid("only the last tax bracket may be unbounded"));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Tax configuration file structure holding both deduction models.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxConfig {
    /// Flat-rate model.
    pub flat: FlatTaxRates,
    /// Progressive-bracket model.
    pub progressive: ProgressiveTaxConfig,
}

impl TaxConfig {
    /// Validates both models.
    pub fn validate(&self) -> EngineResult<()> {
        self.flat.validate()?;
        self.progressive.validate()
    }
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Public holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    pay: PayRates,
    shift_types: Vec<ShiftTypeConfig>,
    tax: TaxConfig,
    /// Holidays sorted by date.
    holidays: Vec<Holiday>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        pay: PayRates,
        shift_types: Vec<ShiftTypeConfig>,
        tax: TaxConfig,
        holidays: Vec<Holiday>,
    ) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            pay,
            shift_types,
            tax,
            holidays: sorted_holidays,
        }
    }

    /// Returns the pay rates.
    pub fn pay(&self) -> &PayRates {
        &self.pay
    }

    /// Returns all shift types.
    pub fn shift_types(&self) -> &[ShiftTypeConfig] {
        &self.shift_types
    }

    /// Returns the tax configuration.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// Returns all holidays, oldest first.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Gets a shift type by its code.
    pub fn shift_type(&self, code: &str) -> EngineResult<&ShiftTypeConfig> {
        self.shift_types
            .iter()
            .find(|t| t.code == code)
            .ok_or_else(|| EngineError::ShiftTypeNotFound {
                code: code.to_string(),
            })
    }

    /// Returns the holiday name for a date, if it is a holiday.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays
            .binary_search_by(|h| h.date.cmp(&date))
            .ok()
            .map(|i| self.holidays[i].name.as_str())
    }
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidConfig {
        message: message.to_string(),
    }
}

fn check_rate(rate: Decimal, name: &str) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(&format!("{} must be between 0 and 1, got {}", name, rate)));
    }
    Ok(())
}
