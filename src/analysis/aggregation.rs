use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::trace;

use crate::{
    storage::entities::AttendanceRecord,
    utils::time::{month_key, week_start},
};

use super::hours::round_hours;

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTotal {
    /// Sunday the week starts on.
    pub week_start: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub total_hours: f64,
    pub average_daily: f64,
    pub days_recorded: usize,
}

/// Sums worked hours per bucket. Records without worked hours don't belong to any bucket.
fn group_hours<K: Ord>(
    records: &[AttendanceRecord],
    key: impl Fn(&AttendanceRecord) -> K,
) -> BTreeMap<K, f64> {
    let mut map = BTreeMap::<K, f64>::new();
    for record in records {
        let Some(hours) = record.worked_hours else {
            trace!("Skipping {} without worked hours", record.id);
            continue;
        };
        *map.entry(key(record)).or_insert(0.) += hours;
    }
    map
}

/// Worked hours per Sunday-aligned week, oldest week first.
pub fn weekly_totals(records: &[AttendanceRecord]) -> Vec<WeeklyTotal> {
    group_hours(records, |v| week_start(v.date))
        .into_iter()
        .map(|(week_start, hours)| WeeklyTotal {
            week_start,
            hours: round_hours(hours),
        })
        .collect()
}

/// Worked hours per calendar month, oldest month first.
pub fn monthly_totals(records: &[AttendanceRecord]) -> Vec<MonthlyTotal> {
    group_hours(records, |v| month_key(v.date))
        .into_iter()
        .map(|(month, hours)| MonthlyTotal {
            month,
            hours: round_hours(hours),
        })
        .collect()
}

/// Totals over every recorded day. Days still missing their hours count towards the average as
/// zero, since they were recorded.
pub fn overall_stats(records: &[AttendanceRecord]) -> OverallStats {
    let total: f64 = records.iter().filter_map(|v| v.worked_hours).sum();
    let days_recorded = records.len();
    let average_daily = if days_recorded == 0 {
        0.
    } else {
        total / days_recorded as f64
    };
    OverallStats {
        total_hours: round_hours(total),
        average_daily: round_hours(average_daily),
        days_recorded,
    }
}
