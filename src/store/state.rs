//! Payroll state.
//!
//! [`PayrollState`] owns the logged shift records and planned shifts, keys
//! both by a stable [`Uuid`], and recomputes pay whenever a record is logged
//! or edited.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::calculation::calculate_shift_pay;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, PlannedShift, ShiftRecord};

use super::storage::{SCHEMA_VERSION, ShiftStorage, Snapshot};

/// The actual and still-planned shifts on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEntries<'a> {
    /// Logged shift records.
    pub actual: Vec<&'a ShiftRecord>,
    /// Planned shifts not yet completed.
    pub planned: Vec<&'a PlannedShift>,
}

impl DayEntries<'_> {
    /// Returns true when the date has neither actual nor planned shifts.
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty() && self.planned.is_empty()
    }
}

/// Owned payroll state: configuration, shift records and planned shifts.
///
/// # Example
///
/// ```no_run
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::models::parse_clock;
/// use shift_pay::store::PayrollState;
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/jp").unwrap().into_config();
/// let mut state = PayrollState::new(config);
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let record = state
///     .log_shift(date, "C341", parse_clock("06:30").unwrap(), parse_clock("17:30").unwrap())
///     .unwrap();
/// println!("Earned ¥{}", record.total_pay());
/// ```
#[derive(Debug, Clone)]
pub struct PayrollState {
    config: Arc<PayrollConfig>,
    records: Vec<ShiftRecord>,
    planned: Vec<PlannedShift>,
}

impl PayrollState {
    /// Creates an empty state.
    pub fn new(config: PayrollConfig) -> Self {
        Self {
            config: Arc::new(config),
            records: Vec::new(),
            planned: Vec::new(),
        }
    }

    /// Restores state from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedSchemaVersion`] when the snapshot was
    /// written with a different schema version.
    pub fn from_snapshot(config: PayrollConfig, snapshot: Snapshot) -> EngineResult<Self> {
        snapshot.check_version()?;
        Ok(Self {
            config: Arc::new(config),
            records: snapshot.weekly_data,
            planned: snapshot.planned_shifts,
        })
    }

    /// Loads state from `storage`.
    pub fn load<S: ShiftStorage + ?Sized>(config: PayrollConfig, storage: &S) -> EngineResult<Self> {
        let state = Self::from_snapshot(config, storage.load()?)?;
        info!(
            records = state.records.len(),
            planned = state.planned.len(),
            "Loaded payroll state"
        );
        Ok(state)
    }

    /// Writes the current state to `storage`.
    pub fn save<S: ShiftStorage + ?Sized>(&self, storage: &mut S) -> EngineResult<()> {
        storage.save(&self.snapshot())
    }

    /// Returns the persisted form of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: SCHEMA_VERSION,
            weekly_data: self.records.clone(),
            planned_shifts: self.planned.clone(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns every logged shift record.
    pub fn records(&self) -> &[ShiftRecord] {
        &self.records
    }

    /// Returns every planned shift, including completed ones.
    pub fn planned_shifts(&self) -> &[PlannedShift] {
        &self.planned
    }

    /// Looks up a shift record by id.
    pub fn record(&self, id: Uuid) -> Option<&ShiftRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Looks up a planned shift by id.
    pub fn planned(&self, id: Uuid) -> Option<&PlannedShift> {
        self.planned.iter().find(|p| p.id == id)
    }

    /// Shift records whose work date falls within `range`.
    pub fn records_in(&self, range: DateRange) -> impl Iterator<Item = &ShiftRecord> + '_ {
        self.records
            .iter()
            .filter(move |r| range.contains_date(r.work_date))
    }

    /// Actual records and uncompleted planned shifts on `date`.
    pub fn entries_on(&self, date: NaiveDate) -> DayEntries<'_> {
        DayEntries {
            actual: self.records.iter().filter(|r| r.work_date == date).collect(),
            planned: self
                .planned
                .iter()
                .filter(|p| p.date == date && !p.completed)
                .collect(),
        }
    }

    /// Logs a completed shift and computes its pay.
    ///
    /// Any uncompleted planned shift on the same date is marked completed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShiftTypeNotFound`] for an unknown shift type.
    pub fn log_shift(
        &mut self,
        work_date: NaiveDate,
        shift_type: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> EngineResult<&ShiftRecord> {
        let record = self.build_record(Uuid::new_v4(), work_date, shift_type, start_time, end_time)?;

        for planned in self
            .planned
            .iter_mut()
            .filter(|p| p.date == work_date && !p.completed)
        {
            planned.completed = true;
        }

        info!(
            id = %record.id,
            work_date = %record.work_date,
            shift_type = %record.shift_type,
            total_pay = %record.pay_info.total_pay,
            "Logged shift"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Replaces the date, type and times of a record and recomputes its pay.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordNotFound`] for an unknown id and
    /// [`EngineError::ShiftTypeNotFound`] for an unknown shift type.
    pub fn edit_shift(
        &mut self,
        id: Uuid,
        work_date: NaiveDate,
        shift_type: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> EngineResult<&ShiftRecord> {
        let index = self.record_index(id)?;
        let record = self.build_record(id, work_date, shift_type, start_time, end_time)?;

        info!(
            id = %id,
            work_date = %record.work_date,
            total_pay = %record.pay_info.total_pay,
            "Edited shift"
        );
        self.records[index] = record;
        Ok(&self.records[index])
    }

    /// Removes a record, returning it.
    pub fn delete_shift(&mut self, id: Uuid) -> EngineResult<ShiftRecord> {
        let index = self.record_index(id)?;
        let record = self.records.remove(index);
        info!(id = %id, work_date = %record.work_date, "Deleted shift");
        Ok(record)
    }

    /// Plans a shift on `date` using the shift type's default times.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateShift`] when an actual record already
    /// exists on `date`, and [`EngineError::ShiftTypeNotFound`] for an unknown
    /// shift type.
    pub fn quick_add(&mut self, date: NaiveDate, shift_type: &str) -> EngineResult<&PlannedShift> {
        if self.records.iter().any(|r| r.work_date == date) {
            return Err(EngineError::DuplicateShift { date });
        }
        let config = self.config.shift_type(shift_type)?;

        let planned = PlannedShift {
            id: Uuid::new_v4(),
            date,
            shift_type: config.code.clone(),
            start_time: config.default_start,
            end_time: config.default_end,
            completed: false,
            created_at: Utc::now(),
        };

        info!(id = %planned.id, date = %date, shift_type, "Planned shift");
        self.planned.push(planned);
        Ok(&self.planned[self.planned.len() - 1])
    }

    /// Logs a planned shift with its planned times and marks it completed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordNotFound`] for an unknown id and
    /// [`EngineError::InvalidShift`] when the shift was already completed.
    pub fn complete_planned(&mut self, id: Uuid) -> EngineResult<&ShiftRecord> {
        let index = self
            .planned
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;

        let planned = &self.planned[index];
        if planned.completed {
            return Err(EngineError::InvalidShift {
                shift_id: id.to_string(),
                message: "planned shift is already completed".to_string(),
            });
        }

        let record = self.build_record(
            Uuid::new_v4(),
            planned.date,
            &planned.shift_type,
            planned.start_time,
            planned.end_time,
        )?;
        self.planned[index].completed = true;

        info!(
            planned_id = %id,
            id = %record.id,
            work_date = %record.work_date,
            total_pay = %record.pay_info.total_pay,
            "Completed planned shift"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Removes a planned shift, returning it.
    pub fn remove_planned(&mut self, id: Uuid) -> EngineResult<PlannedShift> {
        let index = self
            .planned
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        let planned = self.planned.remove(index);
        info!(id = %id, date = %planned.date, "Removed planned shift");
        Ok(planned)
    }

    fn record_index(&self, id: Uuid) -> EngineResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })
    }

    fn build_record(
        &self,
        id: Uuid,
        work_date: NaiveDate,
        shift_type: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> EngineResult<ShiftRecord> {
        let shift_config = self.config.shift_type(shift_type)?;
        let calculation =
            calculate_shift_pay(&shift_config.code, start_time, end_time, self.config.pay());

        Ok(ShiftRecord {
            id,
            work_date,
            shift_type: shift_config.code.clone(),
            start_time,
            end_time,
            working_time: calculation.working_time,
            pay_info: calculation.pay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::parse_clock;
    use crate::store::MemoryStorage;
    use rust_decimal::Decimal;

    fn state() -> PayrollState {
        PayrollState::new(ConfigLoader::load("./config/jp").unwrap().into_config())
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        parse_clock(s).unwrap()
    }

    #[test]
    fn test_log_shift_computes_pay() {
        let mut state = state();
        let record = state.log_shift(date(15), "C341", t("06:30"), t("17:30")).unwrap();

        assert_eq!(record.working_time.net_minutes, 600);
        assert_eq!(record.pay_info.total_pay, Decimal::from(15750));
        assert_eq!(state.records().len(), 1);
    }

    #[test]
    fn test_log_shift_unknown_type() {
        let mut state = state();
        let result = state.log_shift(date(15), "X999", t("06:30"), t("17:30"));
        assert!(matches!(result, Err(EngineError::ShiftTypeNotFound { .. })));
        assert!(state.records().is_empty());
    }

    #[test]
    fn test_two_records_on_same_date_are_distinct() {
        let mut state = state();
        let first = state.log_shift(date(15), "C341", t("06:30"), t("10:30")).unwrap().id;
        let second = state.log_shift(date(15), "C342", t("16:45"), t("01:25")).unwrap().id;
        assert_ne!(first, second);

        state.delete_shift(first).unwrap();
        assert!(state.record(first).is_none());
        assert!(state.record(second).is_some());
    }

    #[test]
    fn test_edit_shift_recomputes() {
        let mut state = state();
        let id = state.log_shift(date(15), "C341", t("06:30"), t("17:30")).unwrap().id;

        let edited = state.edit_shift(id, date(16), "C342", t("16:45"), t("01:25")).unwrap();

        assert_eq!(edited.id, id);
        assert_eq!(edited.work_date, date(16));
        assert_eq!(edited.working_time.night_minutes, 205);
        assert_eq!(edited.pay_info.total_pay, Decimal::new(1278125, 2));
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut state = state();
        let result = state.edit_shift(Uuid::new_v4(), date(15), "C341", t("06:30"), t("17:30"));
        assert!(matches!(result, Err(EngineError::RecordNotFound { .. })));
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut state = state();
        assert!(matches!(
            state.delete_shift(Uuid::new_v4()),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_quick_add_uses_default_times() {
        let mut state = state();
        let planned = state.quick_add(date(20), "C342").unwrap();

        assert_eq!(planned.start_time, t("16:45"));
        assert_eq!(planned.end_time, t("01:25"));
        assert!(!planned.completed);
    }

    #[test]
    fn test_quick_add_rejects_date_with_actual_shift() {
        let mut state = state();
        state.log_shift(date(15), "C341", t("06:30"), t("17:30")).unwrap();

        assert!(matches!(
            state.quick_add(date(15), "C341"),
            Err(EngineError::DuplicateShift { .. })
        ));
    }

    #[test]
    fn test_complete_planned_creates_record() {
        let mut state = state();
        let planned_id = state.quick_add(date(20), "C341").unwrap().id;

        let record = state.complete_planned(planned_id).unwrap();
        assert_eq!(record.work_date, date(20));
        assert_eq!(record.pay_info.total_pay, Decimal::from(15750));

        assert!(state.planned(planned_id).unwrap().completed);
        assert!(matches!(
            state.complete_planned(planned_id),
            Err(EngineError::InvalidShift { .. })
        ));
    }

    #[test]
    fn test_log_shift_completes_planned_on_same_date() {
        let mut state = state();
        let planned_id = state.quick_add(date(20), "C341").unwrap().id;
        state.log_shift(date(20), "C341", t("07:00"), t("16:00")).unwrap();

        assert!(state.planned(planned_id).unwrap().completed);
        let entries = state.entries_on(date(20));
        assert_eq!(entries.actual.len(), 1);
        assert!(entries.planned.is_empty());
    }

    #[test]
    fn test_remove_planned() {
        let mut state = state();
        let id = state.quick_add(date(21), "C341").unwrap().id;
        state.remove_planned(id).unwrap();
        assert!(state.entries_on(date(21)).is_empty());
        assert!(matches!(
            state.remove_planned(id),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_records_in_range() {
        let mut state = state();
        state.log_shift(date(1), "C341", t("06:30"), t("17:30")).unwrap();
        state.log_shift(date(31), "C341", t("06:30"), t("17:30")).unwrap();
        state
            .log_shift(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), "C341", t("06:30"), t("17:30"))
            .unwrap();

        let january = DateRange::month(2025, 1).unwrap();
        assert_eq!(state.records_in(january).count(), 2);
    }

    #[test]
    fn test_save_and_load_through_storage() {
        let mut state = state();
        state.log_shift(date(15), "C341", t("06:30"), t("17:30")).unwrap();
        state.quick_add(date(16), "C342").unwrap();

        let mut storage = MemoryStorage::default();
        state.save(&mut storage).unwrap();

        let config = ConfigLoader::load("./config/jp").unwrap().into_config();
        let restored = PayrollState::load(config, &storage).unwrap();
        assert_eq!(restored.records(), state.records());
        assert_eq!(restored.planned_shifts(), state.planned_shifts());
    }
}
