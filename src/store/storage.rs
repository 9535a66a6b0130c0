//! Persistence of shift data.
//!
//! A [`Snapshot`] is the persisted form of the payroll state: the actual
//! shift records and the planned shifts, tagged with a schema version.
//! [`ShiftStorage`] implementations load and save snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PlannedShift, ShiftRecord};

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted payroll data.
///
/// # Example
///
/// ```
/// use shift_pay::store::{Snapshot, SCHEMA_VERSION};
///
/// let snapshot = Snapshot::default();
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
/// assert!(json["weeklyData"].as_array().unwrap().is_empty());
/// assert!(json["plannedShifts"].as_array().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Schema version of this snapshot.
    pub schema_version: u32,
    /// Logged shift records.
    #[serde(default)]
    pub weekly_data: Vec<ShiftRecord>,
    /// Planned shifts.
    #[serde(default)]
    pub planned_shifts: Vec<PlannedShift>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            weekly_data: Vec::new(),
            planned_shifts: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Rejects snapshots written with a different schema version.
    pub fn check_version(&self) -> EngineResult<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(EngineError::UnsupportedSchemaVersion {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

/// Loads and saves [`Snapshot`]s.
pub trait ShiftStorage {
    /// Loads the stored snapshot, or an empty one when nothing has been saved.
    fn load(&self) -> EngineResult<Snapshot>;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> EngineResult<()>;
}

/// Storage that keeps the snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Snapshot,
}

impl MemoryStorage {
    /// Creates a storage pre-populated with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl ShiftStorage for MemoryStorage {
    fn load(&self) -> EngineResult<Snapshot> {
        self.snapshot.check_version()?;
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        self.snapshot = snapshot.clone();
        Ok(())
    }
}

/// Storage backed by a single JSON file.
///
/// A missing file loads as an empty snapshot. Saves go through a temporary
/// file in the same directory followed by a rename.
///
/// # Example
///
/// ```no_run
/// use shift_pay::store::{JsonFileStorage, ShiftStorage};
///
/// let storage = JsonFileStorage::new("./data/shifts.json");
/// let snapshot = storage.load().unwrap();
/// println!("{} records", snapshot.weekly_data.len());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage for the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl ToString) -> EngineError {
        EngineError::StorageError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl ShiftStorage for JsonFileStorage {
    fn load(&self) -> EngineResult<Snapshot> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No snapshot file, starting empty");
            return Ok(Snapshot::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| self.storage_error(e))?;
        snapshot.check_version()?;

        debug!(
            path = %self.path.display(),
            records = snapshot.weekly_data.len(),
            planned = snapshot.planned_shifts.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| self.storage_error(e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.storage_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_error(e))?;

        debug!(
            path = %self.path.display(),
            records = snapshot.weekly_data.len(),
            planned = snapshot.planned_shifts.len(),
            "Saved snapshot"
        );
        Ok(())
    }
}
