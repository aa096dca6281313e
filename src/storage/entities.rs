use std::fmt::Display;

use chrono::{NaiveDate, NaiveTime};
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::utils::time::{date_to_record_name, truncate_to_minute};

/// One day of attendance. The record is keyed by its date, so `id` always mirrors `date`.
/// `worked_hours` is derived from the four stamps and is rewritten every time both ends of the
/// day are known.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, with = "wall_clock_ser", skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    #[serde(default, with = "wall_clock_ser", skip_serializing_if = "Option::is_none")]
    pub lunch_start: Option<NaiveTime>,
    #[serde(default, with = "wall_clock_ser", skip_serializing_if = "Option::is_none")]
    pub lunch_end: Option<NaiveTime>,
    #[serde(default, with = "wall_clock_ser", skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worked_hours: Option<f64>,
}

impl AttendanceRecord {
    /// Creates an empty record for a day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: date_to_record_name(date),
            date,
            clock_in: None,
            lunch_start: None,
            lunch_end: None,
            clock_out: None,
            worked_hours: None,
        }
    }

    pub fn get(&self, kind: TimeKind) -> Option<NaiveTime> {
        match kind {
            TimeKind::ClockIn => self.clock_in,
            TimeKind::LunchStart => self.lunch_start,
            TimeKind::LunchEnd => self.lunch_end,
            TimeKind::ClockOut => self.clock_out,
        }
    }

    /// Stamps are kept at minute precision, the same precision they are stored with.
    pub fn set(&mut self, kind: TimeKind, time: NaiveTime) {
        let slot = match kind {
            TimeKind::ClockIn => &mut self.clock_in,
            TimeKind::LunchStart => &mut self.lunch_start,
            TimeKind::LunchEnd => &mut self.lunch_end,
            TimeKind::ClockOut => &mut self.clock_out,
        };
        *slot = Some(truncate_to_minute(time));
    }

    pub fn with(mut self, kind: TimeKind, time: NaiveTime) -> Self {
        self.set(kind, time);
        self
    }

    /// A record read from storage is only trusted when its key matches its date.
    pub fn has_consistent_id(&self) -> bool {
        self.id == date_to_record_name(self.date)
    }
}

/// The four stamps a day is made of, in the order they normally happen.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeKind {
    ClockIn,
    LunchStart,
    LunchEnd,
    ClockOut,
}

impl TimeKind {
    pub const ALL: [TimeKind; 4] = [
        TimeKind::ClockIn,
        TimeKind::LunchStart,
        TimeKind::LunchEnd,
        TimeKind::ClockOut,
    ];
}

impl Display for TimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeKind::ClockIn => f.pad("clock-in"),
            TimeKind::LunchStart => f.pad("lunch-start"),
            TimeKind::LunchEnd => f.pad("lunch-end"),
            TimeKind::ClockOut => f.pad("clock-out"),
        }
    }
}

pub const WALL_CLOCK_FORMAT: &str = "%H:%M";

/// Stamps are stored as `HH:MM`, matching what the user sees on the clock.
mod wall_clock_ser {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::WALL_CLOCK_FORMAT;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_str(&time.format(WALL_CLOCK_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(s) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        NaiveTime::parse_from_str(&s, WALL_CLOCK_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
