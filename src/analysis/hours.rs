use chrono::Duration;
use tracing::warn;

use crate::storage::entities::AttendanceRecord;

const SECONDS_IN_HOUR: i64 = 60 * 60;

/// Time spent working on a day, in hours with two decimals. Days without both a clock-in and a
/// clock-out count as zero. Lunch is only subtracted when both of its ends were recorded.
///
/// A day that ends before it starts yields zero.
pub fn compute_worked_hours(record: &AttendanceRecord) -> f64 {
    let (Some(clock_in), Some(clock_out)) = (record.clock_in, record.clock_out) else {
        return 0.;
    };

    let mut worked = clock_out - clock_in;

    if let (Some(lunch_start), Some(lunch_end)) = (record.lunch_start, record.lunch_end) {
        worked -= lunch_end - lunch_start;
    }

    if worked < Duration::zero() {
        warn!(
            "Worked time for {} is negative ({}s), counting it as zero",
            record.date,
            worked.num_seconds()
        );
        return 0.;
    }

    duration_to_hours(worked)
}

/// Converts a non negative duration into hours, rounding half up on the hundredths.
fn duration_to_hours(duration: Duration) -> f64 {
    let seconds = duration.num_seconds();
    // hundredths = round(seconds * 100 / 3600), done in integers
    let hundredths = (seconds * 100 * 2 + SECONDS_IN_HOUR) / (SECONDS_IN_HOUR * 2);
    hundredths as f64 / 100.
}

/// Rounds a sum of hours back to two decimals.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.).round() / 100.
}

/// Presents hours the way people read them, `7.5` becomes `7h 30m`.
/// Negative values, which older data may hold, get a single leading sign.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.abs();
    format!("{sign}{}h {}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveTime};

    use crate::storage::entities::{AttendanceRecord, TimeKind};

    use super::{compute_worked_hours, duration_to_hours, format_hours, round_hours};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(stamps: &[(TimeKind, NaiveTime)]) -> AttendanceRecord {
        stamps
            .iter()
            .fold(AttendanceRecord::new(TEST_DATE), |record, (kind, time)| {
                record.with(*kind, *time)
            })
    }

    #[test]
    fn test_full_day_without_lunch() {
        let record = day(&[(TimeKind::ClockIn, hm(9, 0)), (TimeKind::ClockOut, hm(17, 0))]);
        assert_eq!(compute_worked_hours(&record), 8.);
    }

    #[test]
    fn test_lunch_is_subtracted() {
        let record = day(&[
            (TimeKind::ClockIn, hm(9, 0)),
            (TimeKind::LunchStart, hm(12, 0)),
            (TimeKind::LunchEnd, hm(13, 0)),
            (TimeKind::ClockOut, hm(17, 30)),
        ]);
        assert_eq!(compute_worked_hours(&record), 7.5);
    }

    #[test]
    fn test_missing_clock_out() {
        let record = day(&[(TimeKind::ClockIn, hm(9, 0))]);
        assert_eq!(compute_worked_hours(&record), 0.);

        let record = day(&[(TimeKind::ClockOut, hm(17, 0))]);
        assert_eq!(compute_worked_hours(&record), 0.);
    }

    #[test]
    fn test_partial_lunch_is_ignored() {
        let only_start = day(&[
            (TimeKind::ClockIn, hm(9, 0)),
            (TimeKind::LunchStart, hm(12, 0)),
            (TimeKind::ClockOut, hm(17, 0)),
        ]);
        let only_end = day(&[
            (TimeKind::ClockIn, hm(9, 0)),
            (TimeKind::LunchEnd, hm(13, 0)),
            (TimeKind::ClockOut, hm(17, 0)),
        ]);
        assert_eq!(compute_worked_hours(&only_start), 8.);
        assert_eq!(compute_worked_hours(&only_end), 8.);
    }

    #[test]
    fn test_rounding_to_hundredths() {
        // 8h 20m = 8.3333..
        let record = day(&[(TimeKind::ClockIn, hm(9, 0)), (TimeKind::ClockOut, hm(17, 20))]);
        assert_eq!(compute_worked_hours(&record), 8.33);

        // 1m = 0.01666..
        let record = day(&[(TimeKind::ClockIn, hm(9, 0)), (TimeKind::ClockOut, hm(9, 1))]);
        assert_eq!(compute_worked_hours(&record), 0.02);
    }

    #[test]
    fn test_rounding_half_up() {
        // 18 seconds is exactly 0.005 hours
        assert_eq!(duration_to_hours(Duration::seconds(18)), 0.01);
        assert_eq!(duration_to_hours(Duration::seconds(17)), 0.);
    }

    #[test]
    fn test_negative_day_is_zero() {
        let record = day(&[(TimeKind::ClockIn, hm(17, 0)), (TimeKind::ClockOut, hm(9, 0))]);
        assert_eq!(compute_worked_hours(&record), 0.);

        let long_lunch = day(&[
            (TimeKind::ClockIn, hm(9, 0)),
            (TimeKind::LunchStart, hm(8, 0)),
            (TimeKind::LunchEnd, hm(18, 0)),
            (TimeKind::ClockOut, hm(10, 0)),
        ]);
        assert_eq!(compute_worked_hours(&long_lunch), 0.);
    }

    #[test]
    fn test_round_and_format() {
        assert_eq!(round_hours(8.33 + 7.5 + 0.02), 15.85);
        assert_eq!(format_hours(7.5), "7h 30m");
        assert_eq!(format_hours(0.), "0h 0m");
        assert_eq!(format_hours(8.33), "8h 20m");
    }

    #[test]
    fn test_format_negative_hours() {
        assert_eq!(format_hours(-1.5), "-1h 30m");
        assert_eq!(format_hours(-0.25), "-0h 15m");
        assert_eq!(format_hours(-0.001), "0h 0m");
    }
}
