use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    export::{
        delimited::{parse_delimited_text, to_delimited_text},
        export_file_name,
    },
    storage::{key_value::KeyValueStore, repository::AttendanceRepository},
    utils::clock::Clock,
};

const STDOUT_PATH: &str = "-";

#[derive(Debug, Parser)]
pub struct ExportCommand {
    #[arg(
        long,
        short,
        help = "File to write. Use - for stdout. Defaults to attendance-<today>.csv in the current directory"
    )]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct ImportCommand {
    #[arg(help = "CSV file previously produced by export")]
    path: PathBuf,
}

pub fn process_export_command<S: KeyValueStore>(
    ExportCommand { output }: ExportCommand,
    repository: &AttendanceRepository<S>,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<()> {
    let records = repository.list_all();
    let mut text = to_delimited_text(&records);
    text.push('\n');

    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(clock.time().date_naive())));
    if path.as_os_str() == STDOUT_PATH {
        out.write_all(text.as_bytes())?;
        return Ok(());
    }

    std::fs::write(&path, text).with_context(|| format!("Failed to write export to {path:?}"))?;
    info!("Exported {} records to {path:?}", records.len());
    writeln!(out, "Exported {} records to {}", records.len(), path.display())?;
    Ok(())
}

/// Loads days from an export. Imported days replace stored days with the same date.
pub fn process_import_command<S: KeyValueStore>(
    ImportCommand { path }: ImportCommand,
    repository: &mut AttendanceRepository<S>,
    out: &mut impl Write,
) -> Result<()> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read import from {path:?}"))?;
    let records = parse_delimited_text(&text).with_context(|| format!("Failed to parse {path:?}"))?;
    let count = records.len();

    repository.upsert_many(records)?;
    writeln!(out, "Imported {count} records from {}", path.display())?;
    Ok(())
}
