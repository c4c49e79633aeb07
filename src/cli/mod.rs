//! Interactive shell
//!
//! The shell reads one command per line, splits it like a Unix shell would
//! and parses it with clap. Handlers bridge the parsed commands with the
//! session's services and write their output to the given writer. No
//! command error ends the session.

pub mod cash;
pub mod expense;
pub mod export;
pub mod report;
pub mod schedule;
pub mod student;
pub mod teacher;
pub mod tuition;

pub use cash::{handle_cash_command, CashCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use schedule::{handle_schedule_command, ScheduleCommands};
pub use student::{handle_student_command, StudentCommands};
pub use teacher::{handle_teacher_command, TeacherCommands};
pub use tuition::{handle_tuition_command, TuitionCommands};

use std::io::Write;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, error, warn};

use crate::dates::{self, YearMonth};
use crate::error::{AdminError, AdminResult};
use crate::session::{Section, Session};

/// One line typed at the prompt
#[derive(Parser, Debug)]
#[command(
    name = "phison",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Shell commands
#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List the sections
    Menu,

    /// Open a section by number or name
    Go {
        /// Section number (1-7) or name (register, students, tuition, ...)
        section: String,
    },

    /// Student registration and roster
    #[command(subcommand)]
    Student(StudentCommands),

    /// Students whose plan is overdue or due soon
    Alerts {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Students with a birthday this month
    Birthdays {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Tuition payments
    #[command(subcommand)]
    Tuition(TuitionCommands),

    /// Weekly class schedule
    #[command(subcommand)]
    Schedule(ScheduleCommands),

    /// Monthly expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Daily cash control
    #[command(subcommand)]
    Cash(CashCommands),

    /// Teachers and teaching load
    #[command(subcommand)]
    Teacher(TeacherCommands),

    /// Export tables to XLSX or CSV
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show the audit trail
    Audit {
        /// Show only the most recent entries
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show available commands
    Help,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Whether the shell should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parse and run one input line, reporting any error to `out`
pub fn run_line(session: &mut Session, line: &str, out: &mut dyn Write) -> std::io::Result<Flow> {
    let words = match split_line(line) {
        Ok(words) => words,
        Err(err) => {
            writeln!(out, "Error: {}", err)?;
            return Ok(Flow::Continue);
        }
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(line, "unparsable command");
            write!(out, "{}", err.render())?;
            return Ok(Flow::Continue);
        }
    };

    match execute(session, parsed.command, out) {
        Ok(flow) => Ok(flow),
        Err(err) if err.is_warning() => {
            warn!(%err, "command refused");
            writeln!(out, "Warning: {}", err)?;
            Ok(Flow::Continue)
        }
        Err(err) => {
            error!(%err, "command failed");
            writeln!(out, "Error: {}", err)?;
            Ok(Flow::Continue)
        }
    }
}

/// Run a parsed command against the session
pub fn execute(session: &mut Session, command: ShellCommand, out: &mut dyn Write) -> AdminResult<Flow> {
    match command {
        ShellCommand::Menu => write!(out, "{}", format_menu(session.current_section()))?,
        ShellCommand::Go { section } => {
            let section = Section::parse(&section).ok_or_else(|| {
                AdminError::Validation(format!(
                    "Unknown section: '{}'. Use a number from 1 to {}",
                    section,
                    Section::ALL.len()
                ))
            })?;
            session.navigate(section)?;
            report::render_section(session, section, out)?;
        }
        ShellCommand::Student(cmd) => handle_student_command(session, cmd, out)?,
        ShellCommand::Alerts { output } => report::handle_alerts(session, output, out)?,
        ShellCommand::Birthdays { output } => report::handle_birthdays(session, output, out)?,
        ShellCommand::Tuition(cmd) => handle_tuition_command(session, cmd, out)?,
        ShellCommand::Schedule(cmd) => handle_schedule_command(session, cmd, out)?,
        ShellCommand::Expense(cmd) => handle_expense_command(session, cmd, out)?,
        ShellCommand::Cash(cmd) => handle_cash_command(session, cmd, out)?,
        ShellCommand::Teacher(cmd) => handle_teacher_command(session, cmd, out)?,
        ShellCommand::Export(cmd) => handle_export_command(session, cmd, out)?,
        ShellCommand::Audit { limit, json } => {
            let audit = session.audit()?;
            if audit.is_empty() {
                writeln!(out, "No changes recorded.")?;
            }
            for entry in audit.recent(limit) {
                if json {
                    writeln!(out, "{}", serde_json::to_string(entry)?)?;
                } else {
                    writeln!(out, "{}", entry.describe())?;
                }
            }
        }
        ShellCommand::Help => write!(out, "{}", HELP)?,
        ShellCommand::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Numbered section list with the current one marked
pub fn format_menu(current: Section) -> String {
    let mut output = String::from("Sections:\n");
    for (i, section) in Section::ALL.iter().enumerate() {
        let marker = if *section == current { ">" } else { " " };
        output.push_str(&format!(
            "{} {}. {:<24} (go {})\n",
            marker,
            i + 1,
            section.to_string(),
            section.slug()
        ));
    }
    output
}

const HELP: &str = "\
Commands:
  menu                                  list sections
  go <section>                          open a section (1-7 or name)
  student add|list|show|edit|delete     manage the roster
  alerts [-o file.csv]                  tuition due-date alerts
  birthdays [-o file.csv]               birthdays this month
  tuition pay|list                      tuition payments
  schedule set|clear|show               weekly class schedule
  expense add|standard|list|delete      monthly expenses
  cash add|set|list|delete|summary      daily cash control
  teacher add|remove|list|classes|set|delete|entries|summary
                                        teaching load and pay
  export students|expenses|cash|teaching|tuition [--csv] [path]
  audit [-n N] [--json]                 recent changes
  help                                  this text
  exit                                  leave

Dates are DD/MM/YYYY, months MM/YYYY. Quote values containing spaces.
Use `<command> --help` for the options of any command.
";

/// Split a line into words, honoring single and double quotes
pub fn split_line(line: &str) -> AdminResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(AdminError::Validation("Unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse an optional date argument, defaulting to the session's today
pub(crate) fn date_or_today(session: &Session, text: Option<&str>) -> AdminResult<NaiveDate> {
    match text {
        Some(text) => Ok(dates::parse(text)?),
        None => Ok(session.today()),
    }
}

/// Parse an optional `MM/YYYY` argument, defaulting to the current month
pub(crate) fn month_or_current(session: &Session, text: Option<&str>) -> AdminResult<YearMonth> {
    match text {
        Some(text) => Ok(YearMonth::parse(text)?),
        None => Ok(YearMonth::of(session.today())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn session() -> Session {
        let mut session = Session::new(Settings::default());
        session.unlock("phison2025");
        session.set_today(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        session
    }

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        run_line(session, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line(r#"student add "Ana Souza" --phone '11 9999'"#).unwrap(),
            vec!["student", "add", "Ana Souza", "--phone", "11 9999"]
        );
        assert_eq!(split_line("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_line(r#"a "" b"#).unwrap(), vec!["a", "", "b"]);
        assert!(split_line("say \"hi").is_err());
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        let mut session = session();
        assert_eq!(run(&mut session, ""), "");
        assert!(run(&mut session, "fly").contains("error"));
    }

    #[test]
    fn test_exit() {
        let mut session = session();
        let mut out = Vec::new();
        assert_eq!(run_line(&mut session, "exit", &mut out).unwrap(), Flow::Exit);
        assert_eq!(run_line(&mut session, "quit", &mut out).unwrap(), Flow::Exit);
        assert_eq!(run_line(&mut session, "menu", &mut out).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_menu_and_go() {
        let mut session = session();
        let menu = run(&mut session, "menu");
        assert!(menu.contains("> 1. Register Students"));
        assert!(menu.contains("7. Teaching-Load Control"));

        run(&mut session, "go 6");
        assert_eq!(session.current_section(), Section::DailyCash);
        assert!(run(&mut session, "go nowhere").starts_with("Error:"));
    }

    #[test]
    fn test_locked_session_reports_error() {
        let mut session = Session::new(Settings::default());
        let out = run(&mut session, "student list");
        assert!(out.starts_with("Error: Session is locked"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = session();
        let out = run(&mut session, "student add Ana --birth 1995-01-20 --due 01/07/2025");
        assert!(out.starts_with("Error: Validation error"));

        let out = run(&mut session, "student delete Nobody");
        assert!(out.starts_with("Warning: Student not found"));

        let mut sink = Vec::new();
        assert_eq!(run_line(&mut session, "help", &mut sink).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_audit_output() {
        let mut session = session();
        assert!(run(&mut session, "audit").contains("No changes recorded"));

        run(&mut session, "teacher add Marcos");
        let text = run(&mut session, "audit");
        assert!(text.contains("created teacher Marcos"));

        let json = run(&mut session, "audit --json");
        assert!(json.contains("\"operation\":\"create\""));
    }
}
