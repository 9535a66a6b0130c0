//! Configuration loading and management for the shift pay engine.
//!
//! This module provides functionality to load the pay policy, shift types,
//! deduction tables and holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_pay::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/jp").unwrap();
//! println!("Hourly rate: ¥{}", config.config().pay().regular_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    FlatTaxRates, HealthInsuranceRates, HolidaysConfig, PayRates, PayrollConfig,
    ProgressiveTaxConfig, ShiftTypeConfig, ShiftTypesConfig, TaxBracket, TaxConfig,
};
