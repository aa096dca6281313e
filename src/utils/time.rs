use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// This is the standard way of converting a date to a string in timeclock. Records are keyed by
/// it and it is what ends up in exports.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sunday on or before `date`. Weeks are bucketed by it.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// `YYYY-MM` for the month `date` falls in.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Drops seconds, which is the precision stamps are kept at.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(time)
}
