use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::{
    analysis::{
        aggregation::{monthly_totals, overall_stats, weekly_totals},
        hours::format_hours,
    },
    storage::{
        entities::{TimeKind, WALL_CLOCK_FORMAT},
        key_value::KeyValueStore,
        repository::AttendanceRepository,
    },
};

#[derive(Debug, Parser)]
pub struct HistoryCommand {
    #[arg(
        long,
        short,
        help = "Only show days whose YYYY-MM-DD date contains this text. For example \"2025-03\" shows March 2025"
    )]
    filter: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SummaryView {
    Weekly,
    Monthly,
}

impl Display for SummaryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryView::Weekly => write!(f, "weekly"),
            SummaryView::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct SummaryCommand {
    #[arg(long, short, default_value_t = SummaryView::Weekly, help = "Group hours by week or by month")]
    view: SummaryView,
}

/// Lists recorded days, newest first.
pub fn process_history_command<S: KeyValueStore>(
    HistoryCommand { filter }: HistoryCommand,
    repository: &AttendanceRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let records = repository.history(filter.as_deref());
    if records.is_empty() {
        writeln!(out, "No records found")?;
        return Ok(());
    }

    for record in records {
        let stamps = TimeKind::ALL
            .into_iter()
            .map(|kind| {
                record
                    .get(kind)
                    .map(|v| v.format(WALL_CLOCK_FORMAT).to_string())
                    .unwrap_or_else(|| "--:--".to_owned())
            })
            .collect::<Vec<_>>()
            .join("\t");
        let hours = record
            .worked_hours
            .map(format_hours)
            .unwrap_or_else(|| "-".to_owned());
        writeln!(out, "{}\t{stamps}\t{hours}", record.date.format("%a %d %b %Y"))?;
    }
    Ok(())
}

/// Shows overall statistics followed by totals per week or month.
pub fn process_summary_command<S: KeyValueStore>(
    SummaryCommand { view }: SummaryCommand,
    repository: &AttendanceRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let records = repository.list_all();
    let stats = overall_stats(&records);

    writeln!(out, "Total hours:\t{}", format_hours(stats.total_hours))?;
    writeln!(out, "Daily average:\t{}", format_hours(stats.average_daily))?;
    writeln!(out, "Days recorded:\t{}", stats.days_recorded)?;
    writeln!(out)?;

    let rows = match view {
        SummaryView::Weekly => weekly_totals(&records)
            .into_iter()
            .map(|v| (format!("Week of {}", v.week_start.format("%d/%m/%Y")), v.hours))
            .collect::<Vec<_>>(),
        SummaryView::Monthly => monthly_totals(&records)
            .into_iter()
            .map(|v| (month_label(&v.month), v.hours))
            .collect::<Vec<_>>(),
    };

    if rows.is_empty() {
        writeln!(out, "Not enough data yet, record some hours first")?;
        return Ok(());
    }
    for (label, hours) in rows {
        writeln!(out, "{label}\t{}", format_hours(hours))?;
    }
    Ok(())
}

/// `2025-03` becomes `March 2025`. Keys that aren't months are shown as they are.
fn month_label(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map(|v| v.format("%B %Y").to_string())
        .unwrap_or_else(|_| month.to_owned())
}
