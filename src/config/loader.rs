//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pay and tax
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidaysConfig, PayRates, PayrollConfig, ShiftTypesConfig, TaxConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/jp/
/// ├── pay.yaml          # Hourly rate, multipliers, night window, break policy
/// ├── shift_types.yaml  # Shift type codes and default times
/// ├── tax.yaml          # Flat and progressive deduction tables
/// └── holidays.yaml     # Public holidays (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let day = loader.config().shift_type("C341").unwrap();
/// println!("{} starts at {}", day.label, day.default_start);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value fails validation (see [`PayRates::validate`] and
    ///   [`TaxConfig::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pay = Self::load_yaml::<PayRates>(&path.join("pay.yaml"))?;
        pay.validate()?;

        let shift_types = Self::load_yaml::<ShiftTypesConfig>(&path.join("shift_types.yaml"))?;
        if shift_types.shift_types.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "at least one shift type is required".to_string(),
            });
        }

        let tax = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;
        tax.validate()?;

        // Holidays only decorate the calendar, so the file is optional.
        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidaysConfig>(&holidays_path)?.holidays
        } else {
            Vec::new()
        };

        debug!(
            path = %path.display(),
            shift_types = shift_types.shift_types.len(),
            brackets = tax.progressive.brackets.len(),
            holidays = holidays.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(pay, shift_types.shift_types, tax, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
