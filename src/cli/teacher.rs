//! Teacher and teaching-load CLI commands

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::dates;
use crate::display::{format_load_entries, format_teacher_list};
use crate::error::{AdminError, AdminResult};
use crate::session::Session;

use super::report::create_output;
use super::month_or_current;

/// Teacher subcommands
#[derive(Subcommand, Debug)]
pub enum TeacherCommands {
    /// Register a teacher
    Add { name: String },
    /// Remove a teacher (recorded classes are kept)
    Remove { name: String },
    /// List registered teachers
    List,
    /// Record classes taught on a date (zero is skipped)
    Classes {
        teacher: String,
        /// Date (DD/MM/YYYY, "today" for the current date)
        date: String,
        classes: String,
    },
    /// Replace the classes recorded for a teacher on a date
    Set {
        teacher: String,
        /// Date (DD/MM/YYYY)
        date: String,
        classes: String,
    },
    /// Delete one entry by id
    Delete {
        /// Entry id (e.g. lod-1a2b3c4d)
        id: String,
    },
    /// List every teaching-load entry
    Entries,
    /// Monthly classes and pay for a teacher
    Summary {
        teacher: String,
        /// Month (MM/YYYY, defaults to the current month)
        month: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a teacher command
pub fn handle_teacher_command(
    session: &mut Session,
    cmd: TeacherCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    match cmd {
        TeacherCommands::Add { name } => {
            let teacher = session.teaching()?.register_teacher(&name)?;
            writeln!(out, "Registered teacher: {}", teacher)?;
        }

        TeacherCommands::Remove { name } => {
            let teacher = session.teaching()?.remove_teacher(&name)?;
            writeln!(out, "Removed teacher: {}", teacher)?;
        }

        TeacherCommands::List => {
            let service = session.teaching()?;
            writeln!(out, "{}", format_teacher_list(service.teachers()).trim_end())?;
        }

        TeacherCommands::Classes {
            teacher,
            date,
            classes,
        } => {
            let date = if date.eq_ignore_ascii_case("today") {
                session.today()
            } else {
                dates::parse(&date)?
            };
            let classes = parse_classes(&classes)?;

            match session.teaching()?.record_classes(&teacher, date, classes)? {
                Some(entry) => writeln!(
                    out,
                    "Recorded {} class(es) for {} on {} ({})",
                    entry.classes,
                    entry.teacher,
                    dates::format(entry.date),
                    entry.id
                )?,
                None => writeln!(out, "Nothing to record.")?,
            }
        }

        TeacherCommands::Set {
            teacher,
            date,
            classes,
        } => {
            let date = dates::parse(&date)?;
            let classes = parse_classes(&classes)?;

            match session.teaching()?.set_day(&teacher, date, classes)? {
                Some(entry) => writeln!(
                    out,
                    "{} on {} set to {} class(es) ({})",
                    entry.teacher,
                    dates::format(date),
                    entry.classes,
                    entry.id
                )?,
                None => writeln!(out, "{} cleared", dates::format(date))?,
            }
        }

        TeacherCommands::Delete { id } => {
            let entry = session.teaching()?.delete(&id)?;
            writeln!(out, "Deleted teaching-load entry {}", entry.id)?;
        }

        TeacherCommands::Entries => {
            let service = session.teaching()?;
            writeln!(out, "{}", format_load_entries(service.entries()).trim_end())?;
        }

        TeacherCommands::Summary {
            teacher,
            month,
            output,
        } => {
            let month = month_or_current(session, month.as_deref())?;
            let summary = session.teaching_load(&teacher, month)?;

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                summary.export_csv(&mut writer)?;
                writer.flush()?;
                writeln!(out, "Teaching load exported to: {}", path.display())?;
            } else {
                write!(out, "{}", summary.format_terminal(&session.settings().currency_symbol))?;
            }
        }
    }

    Ok(())
}

fn parse_classes(text: &str) -> AdminResult<u32> {
    text.trim().parse().map_err(|_| {
        AdminError::Validation(format!(
            "Number of classes must be a whole number, got '{}'",
            text.trim()
        ))
    })
}
