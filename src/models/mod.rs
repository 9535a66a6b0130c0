//! Core data models for the shift pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock;
mod pay;
mod period;
mod shift;
mod tax;

pub use clock::{MINUTES_PER_DAY, format_clock, hhmm, minute_of_day, parse_clock};
pub use pay::{AuditStep, AuditTrace, PayBreakdown, ShiftCalculation, WorkingTime};
pub(crate) use pay::minutes_to_hours;
pub use period::{DateRange, Holiday};
pub use shift::{PlannedShift, ShiftKind, ShiftRecord};
pub use tax::{
    DeductionKind, Deductions, EmploymentStatus, IncomePeriod, PeriodView, TaxBreakdown,
    TaxInput, TaxMethod,
};
