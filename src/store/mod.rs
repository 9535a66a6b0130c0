//! Owned payroll state and its persistence.

mod state;
mod storage;

pub use state::{DayEntries, PayrollState};
pub use storage::{JsonFileStorage, MemoryStorage, SCHEMA_VERSION, ShiftStorage, Snapshot};
