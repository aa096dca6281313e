use std::fmt::Display;

use crate::storage::entities::{AttendanceRecord, TimeKind};

/// Where in the work day the user currently is, derived from which stamps exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    NotStarted,
    Working,
    AtLunch,
    BackAtWork,
    Finished,
}

impl DayPhase {
    pub fn message(&self) -> &'static str {
        match self {
            DayPhase::NotStarted => "Ready to start the day",
            DayPhase::Working => "Working - remember to take lunch",
            DayPhase::AtLunch => "At lunch - enjoy the break",
            DayPhase::BackAtWork => "Back at work",
            DayPhase::Finished => "Work day finished",
        }
    }

    /// The stamp that would move the day forward.
    pub fn next_kind(&self) -> Option<TimeKind> {
        match self {
            DayPhase::NotStarted => Some(TimeKind::ClockIn),
            DayPhase::Working => Some(TimeKind::LunchStart),
            DayPhase::AtLunch => Some(TimeKind::LunchEnd),
            DayPhase::BackAtWork => Some(TimeKind::ClockOut),
            DayPhase::Finished => None,
        }
    }
}

impl Display for DayPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Which stamps a day already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStatus {
    pub clock_in: bool,
    pub lunch_start: bool,
    pub lunch_end: bool,
    pub clock_out: bool,
}

impl DayStatus {
    pub fn from_record(record: Option<&AttendanceRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };
        Self {
            clock_in: record.clock_in.is_some(),
            lunch_start: record.lunch_start.is_some(),
            lunch_end: record.lunch_end.is_some(),
            clock_out: record.clock_out.is_some(),
        }
    }

    pub fn is_set(&self, kind: TimeKind) -> bool {
        match kind {
            TimeKind::ClockIn => self.clock_in,
            TimeKind::LunchStart => self.lunch_start,
            TimeKind::LunchEnd => self.lunch_end,
            TimeKind::ClockOut => self.clock_out,
        }
    }

    /// The first missing stamp decides the phase, so a day with a clock-out but no lunch still
    /// reads as working.
    pub fn phase(&self) -> DayPhase {
        if !self.clock_in {
            DayPhase::NotStarted
        } else if !self.lunch_start {
            DayPhase::Working
        } else if !self.lunch_end {
            DayPhase::AtLunch
        } else if !self.clock_out {
            DayPhase::BackAtWork
        } else {
            DayPhase::Finished
        }
    }
}
