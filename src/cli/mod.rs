pub mod dates;
pub mod record;
pub mod report;
pub mod transfer;

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use record::{process_record_command, process_status_command, RecordCommand, StatusCommand};
use report::{process_history_command, process_summary_command, HistoryCommand, SummaryCommand};
use tracing::{debug, level_filters::LevelFilter};
use transfer::{process_export_command, process_import_command, ExportCommand, ImportCommand};

use crate::{
    storage::{file_store::FileStore, key_value::KeyValueStore, repository::AttendanceRepository},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Timeclock", version, long_about = None)]
#[command(about = "Personal attendance tracker", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Record clock-in, lunch-start, lunch-end or clock-out")]
    Record {
        #[command(flatten)]
        command: RecordCommand,
    },
    #[command(about = "Show the stamps recorded for a day")]
    Status {
        #[command(flatten)]
        command: StatusCommand,
    },
    #[command(about = "List recorded days, newest first")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
    #[command(about = "Show total hours per week or month")]
    Summary {
        #[command(flatten)]
        command: SummaryCommand,
    },
    #[command(about = "Export every recorded day as CSV")]
    Export {
        #[command(flatten)]
        command: ExportCommand,
    },
    #[command(about = "Import days from a CSV export")]
    Import {
        #[command(flatten)]
        command: ImportCommand,
    },
    #[command(about = "Show or change the name used in greetings")]
    Name {
        #[arg(help = "New name. Leave out to show the current one")]
        name: Option<String>,
    },
    #[command(about = "Delete every recorded day. This can't be undone")]
    Clear {
        #[arg(long, help = "Confirm that all records should be deleted")]
        yes: bool,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let store = FileStore::new(app_dir.join("data"))?;
    debug!("Storing attendance data in {:?}", store.dir());
    let mut repository = AttendanceRepository::new(store);
    let mut stdout = std::io::stdout().lock();
    execute(args.commands, &mut repository, &DefaultClock, &mut stdout)
}

fn execute<S: KeyValueStore>(
    commands: Commands,
    repository: &mut AttendanceRepository<S>,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<()> {
    match commands {
        Commands::Record { command } => process_record_command(command, repository, clock, out),
        Commands::Status { command } => process_status_command(command, repository, clock, out),
        Commands::History { command } => process_history_command(command, repository, out),
        Commands::Summary { command } => process_summary_command(command, repository, out),
        Commands::Export { command } => process_export_command(command, repository, clock, out),
        Commands::Import { command } => process_import_command(command, repository, out),
        Commands::Name { name: Some(name) } => {
            repository.set_user_name(&name)?;
            writeln!(out, "Name set to {}", repository.user_name())?;
            Ok(())
        }
        Commands::Name { name: None } => {
            writeln!(out, "{}", repository.user_name())?;
            Ok(())
        }
        Commands::Clear { yes: false } => Err(Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                format!(
                    "Refusing to delete {} records without --yes",
                    repository.list_all().len()
                ),
            )
            .into()),
        Commands::Clear { yes: true } => {
            let count = repository.list_all().len();
            repository.clear_all()?;
            writeln!(out, "Deleted {count} records")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
    use clap::Parser;
    use tempfile::tempdir;

    use crate::{
        storage::{key_value::MemoryStore, repository::AttendanceRepository},
        utils::{clock::FixedClock, logging::TEST_LOGGING},
    };

    use super::{execute, Args};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2025, 3, 14, 17, 30, 12).unwrap())
    }

    /// Parses `line` the way the binary would and runs it against `repository`.
    fn run(repository: &mut AttendanceRepository<MemoryStore>, line: &[&str]) -> Result<String> {
        *TEST_LOGGING;
        let args = Args::try_parse_from(["timeclock"].iter().chain(line))?;
        let mut out = Vec::new();
        execute(args.commands, repository, &clock(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_record_day_through_cli() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        run(&mut repository, &["record", "clock-in", "--time", "09:00"])?;
        run(&mut repository, &["record", "lunch-start", "--time", "12:00"])?;
        run(&mut repository, &["record", "lunch-end", "-t", "13:00"])?;
        let out = run(&mut repository, &["record", "clock-out"])?;

        assert!(out.contains("Recorded clock-out at 17:30 on 2025-03-14"));
        assert!(out.contains("7h 30m worked"));

        let record = repository.find_by_date(TEST_DATE).unwrap();
        assert_eq!(record.clock_out, NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(record.worked_hours, Some(7.5));
        Ok(())
    }

    #[test]
    fn test_record_on_other_day() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        run(
            &mut repository,
            &["record", "clock-in", "--date", "2025-03-10", "--time", "08:00"],
        )?;
        assert!(repository
            .find_by_date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .is_some());
        assert!(repository.find_by_date(TEST_DATE).is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        assert!(run(&mut repository, &["record", "clock-in", "--time", "9am"]).is_err());
        assert!(repository.list_all().is_empty());
    }

    #[test]
    fn test_status() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        run(&mut repository, &["name", "Ana"])?;

        let out = run(&mut repository, &["status"])?;
        assert!(out.contains("Hello, Ana!"));
        assert!(out.contains("Ready to start the day"));
        assert!(out.contains("Next: timeclock record clock-in"));

        run(&mut repository, &["record", "clock-in", "--time", "09:00"])?;
        let out = run(&mut repository, &["status"])?;
        assert!(out.contains("Working - remember to take lunch"));
        assert!(out.contains("09:00"));
        assert!(out.contains("--:--"));
        assert!(out.contains("Next: timeclock record lunch-start"));

        for (kind, time) in [("lunch-start", "12:00"), ("lunch-end", "13:00"), ("clock-out", "17:00")] {
            run(&mut repository, &["record", kind, "--time", time])?;
        }
        let out = run(&mut repository, &["status"])?;
        assert!(out.contains("Work day finished"));
        assert!(!out.contains("Next:"));
        assert!(out.contains("7h 0m worked"));
        Ok(())
    }

    #[test]
    fn test_history_and_summary() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        for (date, out) in [("2025-03-10", "17:00"), ("2025-03-14", "13:00")] {
            run(&mut repository, &["record", "clock-in", "-d", date, "-t", "09:00"])?;
            run(&mut repository, &["record", "clock-out", "-d", date, "-t", out])?;
        }

        let history = run(&mut repository, &["history"])?;
        let lines = history.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Fri 14 Mar 2025"));
        assert!(lines[1].ends_with("8h 0m"));

        let filtered = run(&mut repository, &["history", "--filter", "2025-03-10"])?;
        assert_eq!(filtered.lines().count(), 1);

        let weekly = run(&mut repository, &["summary"])?;
        assert!(weekly.contains("Total hours:\t12h 0m"));
        assert!(weekly.contains("Daily average:\t6h 0m"));
        assert!(weekly.contains("Days recorded:\t2"));
        assert!(weekly.contains("Week of 09/03/2025\t12h 0m"));

        let monthly = run(&mut repository, &["summary", "--view", "monthly"])?;
        assert!(monthly.contains("March 2025\t12h 0m"));
        Ok(())
    }

    #[test]
    fn test_empty_reports() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        assert!(run(&mut repository, &["history"])?.contains("No records found"));
        assert!(run(&mut repository, &["summary"])?.contains("Not enough data yet"));
        Ok(())
    }

    #[test]
    fn test_export_and_import() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("export.csv");
        let path = path.to_str().unwrap();

        let mut repository = AttendanceRepository::new(MemoryStore::new());
        run(&mut repository, &["record", "clock-in", "-t", "09:00"])?;
        run(&mut repository, &["record", "clock-out", "-t", "17:00"])?;

        let out = run(&mut repository, &["export", "--output", path])?;
        assert!(out.contains("Exported 1 records"));

        let stdout = run(&mut repository, &["export", "-o", "-"])?;
        assert_eq!(std::fs::read_to_string(path)?, stdout);

        let mut restored = AttendanceRepository::new(MemoryStore::new());
        run(&mut restored, &["import", path])?;
        assert_eq!(restored.list_all(), repository.list_all());
        Ok(())
    }

    #[test]
    fn test_clear_requires_confirmation() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        run(&mut repository, &["record", "clock-in"])?;

        assert!(run(&mut repository, &["clear"]).is_err());
        assert_eq!(repository.list_all().len(), 1);

        let out = run(&mut repository, &["clear", "--yes"])?;
        assert!(out.contains("Deleted 1 records"));
        assert!(repository.list_all().is_empty());
        Ok(())
    }

    #[test]
    fn test_name_defaults() -> Result<()> {
        let mut repository = AttendanceRepository::new(MemoryStore::new());
        assert_eq!(run(&mut repository, &["name"])?.trim(), "Usuario");
        Ok(())
    }
}
