use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use crate::{
    analysis::{day_status::DayStatus, hours::compute_worked_hours},
    utils::time::date_to_record_name,
};

use super::{
    entities::{AttendanceRecord, TimeKind},
    key_value::KeyValueStore,
    profile::{load_user_name, save_user_name},
};

pub const RECORDS_KEY: &str = "timetracker-data";

/// Owns the attendance collection. The whole collection is stored as a single JSON array under
/// [RECORDS_KEY] and rewritten on every change, which assumes a single writer.
pub struct AttendanceRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AttendanceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every stored record, in storage order. Unreadable or malformed storage reads as an empty
    /// collection; a single malformed entry is dropped on its own.
    pub fn list_all(&self) -> Vec<AttendanceRecord> {
        let data = match self.store.get(RECORDS_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => return vec![],
            Err(e) => {
                warn!("Couldn't read attendance records, treating as empty: {e:?}");
                return vec![];
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored attendance records are corrupted, treating as empty: {e}");
                return vec![];
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<AttendanceRecord>(entry.clone()) {
                Ok(record) if record.has_consistent_id() => records.push(record),
                Ok(record) => {
                    warn!(
                        "Skipping record {} whose id doesn't match its date {}",
                        record.id, record.date
                    )
                }
                Err(e) => {
                    // ignore illegal values, the rest of the collection is still usable
                    warn!("Found illegal attendance record {entry}: {e}")
                }
            }
        }
        debug!("Loaded {} attendance records", records.len());
        records
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Option<AttendanceRecord> {
        let id = date_to_record_name(date);
        self.list_all().into_iter().find(|v| v.id == id)
    }

    /// Replaces the record with the same id, or appends it.
    pub fn upsert(&mut self, record: AttendanceRecord) -> Result<()> {
        self.upsert_many([record])
    }

    /// Same as [Self::upsert] for many records, with a single write.
    pub fn upsert_many(&mut self, incoming: impl IntoIterator<Item = AttendanceRecord>) -> Result<()> {
        let incoming = incoming.into_iter().collect::<Vec<_>>();
        if let Some(record) = incoming.iter().find(|v| !v.has_consistent_id()) {
            bail!(
                "Record id {:?} doesn't match its date {}",
                record.id,
                record.date
            );
        }

        let mut records = self.list_all();
        for record in incoming {
            match records.iter_mut().find(|v| v.id == record.id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        self.persist(&records)
    }

    /// Stamps `kind` at `time` on the record for `date`, creating the record when it's the
    /// first stamp of the day. Worked hours are refreshed once both ends of the day are known.
    pub fn record_time(
        &mut self,
        kind: TimeKind,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord> {
        let mut record = self
            .find_by_date(date)
            .unwrap_or_else(|| AttendanceRecord::new(date));

        if let Some(previous) = record.get(kind) {
            info!("Overwriting {kind} {previous} on {date} with {time}");
        }
        record.set(kind, time);

        if record.clock_in.is_some() && record.clock_out.is_some() {
            record.worked_hours = Some(compute_worked_hours(&record));
        }

        info!("Recorded {kind} at {time} on {date}");
        self.upsert(record.clone())?;
        Ok(record)
    }

    /// Deletes every record. There is no way back.
    pub fn clear_all(&mut self) -> Result<()> {
        info!("Clearing all attendance records");
        self.store
            .remove(RECORDS_KEY)
            .context("Failed to clear attendance records")
    }

    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        DayStatus::from_record(self.find_by_date(date).as_ref())
    }

    /// Records newest first. `filter` keeps only days whose `YYYY-MM-DD` contains it, so `2025-03`
    /// selects a month.
    pub fn history(&self, filter: Option<&str>) -> Vec<AttendanceRecord> {
        let mut records = self.list_all();
        if let Some(filter) = filter.filter(|v| !v.is_empty()) {
            records.retain(|v| v.id.contains(filter));
        }
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn user_name(&self) -> String {
        load_user_name(&self.store)
    }

    pub fn set_user_name(&mut self, name: &str) -> Result<()> {
        save_user_name(&mut self.store, name)
    }

    fn persist(&mut self, records: &[AttendanceRecord]) -> Result<()> {
        let data = serde_json::to_string(records)?;
        debug!("Persisting {} attendance records", records.len());
        self.store
            .set(RECORDS_KEY, &data)
            .context("Failed to save attendance records")
    }
}
