//! Export CLI commands

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::error::AdminResult;
use crate::export::{self, ExportFormat, Tabular, EXPORT_FILE_NAME};
use crate::session::Session;

/// Destination shared by every export command
#[derive(Args, Debug)]
pub struct ExportTarget {
    /// Output file (defaults to a name in the current directory)
    pub path: Option<PathBuf>,
    /// Write CSV instead of XLSX
    #[arg(long)]
    pub csv: bool,
}

impl ExportTarget {
    fn format(&self) -> ExportFormat {
        if self.csv {
            ExportFormat::Csv
        } else {
            ExportFormat::Xlsx
        }
    }

    fn resolve(&self, default_name: &str) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => Path::new(default_name).with_extension(self.format().extension()),
        }
    }
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Student roster
    Students(ExportTarget),
    /// Monthly expenses
    Expenses(ExportTarget),
    /// Daily cash entries
    Cash(ExportTarget),
    /// Teaching-load entries
    Teaching(ExportTarget),
    /// Tuition payments
    Tuition(ExportTarget),
}

/// Handle an export command
pub fn handle_export_command(
    session: &mut Session,
    cmd: ExportCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    let (path, rows) = match cmd {
        ExportCommands::Students(target) => {
            let path = target.resolve(EXPORT_FILE_NAME);
            session.export_students(&path, target.format())?;
            (path, session.storage()?.students.len())
        }
        ExportCommands::Expenses(target) => {
            write_table(&target, "despesas", session.storage()?.expenses.list())?
        }
        ExportCommands::Cash(target) => {
            write_table(&target, "caixa", session.storage()?.cash.list())?
        }
        ExportCommands::Teaching(target) => write_table(
            &target,
            "carga_horaria",
            session.storage()?.teaching_loads.list(),
        )?,
        ExportCommands::Tuition(target) => {
            write_table(&target, "mensalidades", session.storage()?.payments.list())?
        }
    };

    writeln!(out, "Exported {} row(s) to: {}", rows, path.display())?;
    Ok(())
}

fn write_table<T: Tabular>(
    target: &ExportTarget,
    default_name: &str,
    rows: &[T],
) -> AdminResult<(PathBuf, usize)> {
    let path = target.resolve(default_name);
    export::write_file(&path, rows, target.format())?;
    Ok((path, rows.len()))
}
