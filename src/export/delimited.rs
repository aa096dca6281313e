use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};

use crate::{
    analysis::hours::compute_worked_hours,
    storage::entities::{AttendanceRecord, TimeKind, WALL_CLOCK_FORMAT},
    utils::time::date_to_record_name,
};

pub const DELIMITER: char = ',';
pub const HEADER: [&str; 6] = [
    "Date",
    "ClockIn",
    "LunchStart",
    "LunchEnd",
    "ClockOut",
    "WorkedHours",
];

/// Renders records as comma separated text, one row per record in the given order. Fields are
/// never quoted: dates, `HH:MM` stamps and numbers can't contain the delimiter.
pub fn to_delimited_text(records: &[AttendanceRecord]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(HEADER.join(&DELIMITER.to_string()));

    for record in records {
        let mut fields = Vec::with_capacity(HEADER.len());
        fields.push(date_to_record_name(record.date));
        for kind in TimeKind::ALL {
            fields.push(
                record
                    .get(kind)
                    .map(|v| v.format(WALL_CLOCK_FORMAT).to_string())
                    .unwrap_or_default(),
            );
        }
        fields.push(
            record
                .worked_hours
                .map(|v| v.to_string())
                .unwrap_or_default(),
        );
        rows.push(fields.join(&DELIMITER.to_string()));
    }

    rows.join("\n")
}

/// Reads text produced by [to_delimited_text]. The hours column is not trusted, hours are
/// derived again from the stamps.
pub fn parse_delimited_text(text: &str) -> Result<Vec<AttendanceRecord>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(vec![]);
    };
    let header = header.split(DELIMITER).map(str::trim).collect::<Vec<_>>();
    if header != HEADER {
        bail!("Unexpected header {header:?}, expected {HEADER:?}");
    }

    lines
        .map(|(number, line)| parse_row(line).with_context(|| format!("Invalid row on line {number}")))
        .collect()
}

fn parse_row(line: &str) -> Result<AttendanceRecord> {
    let fields = line.split(DELIMITER).map(str::trim).collect::<Vec<_>>();
    if fields.len() != HEADER.len() {
        bail!("Expected {} fields, found {}", HEADER.len(), fields.len());
    }

    let date = fields[0]
        .parse::<NaiveDate>()
        .map_err(|e| anyhow!("Invalid date {:?}: {e}", fields[0]))?;
    let mut record = AttendanceRecord::new(date);

    for (kind, field) in TimeKind::ALL.into_iter().zip(&fields[1..5]) {
        if field.is_empty() {
            continue;
        }
        let time = NaiveTime::parse_from_str(field, WALL_CLOCK_FORMAT)
            .map_err(|e| anyhow!("Invalid {kind} {field:?}: {e}"))?;
        record.set(kind, time);
    }

    if record.clock_in.is_some() && record.clock_out.is_some() {
        record.worked_hours = Some(compute_worked_hours(&record));
    }
    Ok(record)
}
