use std::io::Write;

use ansi_term::{Colour, Style};
use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::hours::format_hours,
    storage::{
        entities::{TimeKind, WALL_CLOCK_FORMAT},
        key_value::KeyValueStore,
        repository::AttendanceRepository,
    },
    utils::clock::Clock,
};

use super::dates::{parse_day, parse_wall_clock, DateStyle};

#[derive(Debug, Parser)]
pub struct RecordCommand {
    #[arg(help = "Which stamp to record")]
    kind: TimeKind,
    #[arg(
        long,
        short,
        help = "Day to record on. Defaults to today. Examples are \"yesterday\", \"2025-03-15\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(long, short, help = "Time to record as HH:MM. Defaults to now")]
    time: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Debug, Parser)]
pub struct StatusCommand {
    #[arg(long, short, help = "Day to show. Defaults to today")]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Stamps a time and reports what the day looks like afterwards.
pub fn process_record_command<S: KeyValueStore>(
    RecordCommand {
        kind,
        date,
        time,
        date_style,
    }: RecordCommand,
    repository: &mut AttendanceRepository<S>,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<()> {
    let now = clock.time();
    let date = parse_day(date.as_deref(), now, date_style)?;
    let time = parse_wall_clock(time.as_deref(), now)?;

    let record = repository.record_time(kind, date, time)?;

    writeln!(
        out,
        "Recorded {kind} at {} on {}",
        time.format(WALL_CLOCK_FORMAT),
        record.id
    )?;
    if let Some(hours) = record.worked_hours {
        writeln!(out, "{} worked", format_hours(hours))?;
    }
    Ok(())
}

/// Greets the user and shows which stamps the day already has.
pub fn process_status_command<S: KeyValueStore>(
    StatusCommand { date, date_style }: StatusCommand,
    repository: &AttendanceRepository<S>,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<()> {
    let now = clock.time();
    let date = parse_day(date.as_deref(), now, date_style)?;
    let record = repository.find_by_date(date);
    let status = repository.day_status(date);

    writeln!(out, "Hello, {}!", repository.user_name())?;
    writeln!(out, "{}  {}", date.format("%a %d %b %Y"), now.format(WALL_CLOCK_FORMAT))?;
    writeln!(out, "{}", status.phase())?;
    writeln!(out)?;

    for kind in TimeKind::ALL {
        let (marker, value) = match record.as_ref().and_then(|v| v.get(kind)) {
            Some(time) if status.is_set(kind) => (
                Colour::Green.paint("x"),
                time.format(WALL_CLOCK_FORMAT).to_string(),
            ),
            _ => (Style::new().dimmed().paint(" "), "--:--".to_owned()),
        };
        writeln!(out, "[{marker}] {kind:<12}{value}")?;
    }

    writeln!(out)?;
    if let Some(next) = status.phase().next_kind() {
        writeln!(out, "Next: timeclock record {next}")?;
    }
    if let Some(hours) = record.and_then(|v| v.worked_hours) {
        writeln!(out, "{} worked", format_hours(hours))?;
    }
    Ok(())
}
