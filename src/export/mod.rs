//! Text exports: iCalendar shifts and the tax report.
//!
//! Exports return the file name and content; writing them anywhere is left to
//! the caller.

mod currency;
mod ical;
mod tax_report;

use serde::Serialize;

pub use currency::{format_fixed, format_hours, format_yen};
pub use ical::{PRODID, calendar_export};
pub use tax_report::tax_report;

/// A generated export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    /// Suggested file name.
    pub filename: String,
    /// File content.
    pub content: String,
}
