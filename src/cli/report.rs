//! Report commands and section overviews

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::display::{
    format_cash_entries, format_expense_list, format_load_entries, format_payment_list,
    format_schedule_grid, format_standard_expenses, format_student_list, format_teacher_list,
};
use crate::error::{AdminError, AdminResult};
use crate::dates::YearMonth;
use crate::session::{Section, Session};

/// Open a CSV output file for a report
pub(crate) fn create_output(path: &Path) -> AdminResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        AdminError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub fn handle_alerts(session: &Session, output: Option<PathBuf>, out: &mut dyn Write) -> AdminResult<()> {
    let report = session.tuition_alerts()?;

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        writeln!(out, "Tuition alerts exported to: {}", path.display())?;
    } else {
        write!(out, "{}", report.format_terminal())?;
    }

    Ok(())
}

pub fn handle_birthdays(
    session: &Session,
    output: Option<PathBuf>,
    out: &mut dyn Write,
) -> AdminResult<()> {
    let report = session.birthdays()?;

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        writeln!(out, "Birthdays exported to: {}", path.display())?;
    } else {
        write!(out, "{}", report.format_terminal())?;
    }

    Ok(())
}

/// Print the overview shown when a section is opened
pub fn render_section(session: &mut Session, section: Section, out: &mut dyn Write) -> AdminResult<()> {
    writeln!(out, "== {} ==", section)?;

    match section {
        Section::RegisterStudents => {
            writeln!(
                out,
                "student add <name> --birth DD/MM/YYYY --due DD/MM/YYYY \
                 [--email ..] [--national-id ..] [--phone ..] [--fee ..] [--status ..]"
            )?;
        }
        Section::StudentList => {
            let storage = session.storage()?;
            writeln!(out, "{}", format_student_list(storage.students.list()).trim_end())?;
            writeln!(out)?;
            write!(out, "{}", session.tuition_alerts()?.format_terminal())?;
            writeln!(out)?;
            write!(out, "{}", session.birthdays()?.format_terminal())?;
        }
        Section::Tuition => {
            let tuition = session.tuition()?;
            let payments: Vec<_> = tuition.list().iter().collect();
            writeln!(out, "{}", format_payment_list(&payments).trim_end())?;
        }
        Section::Schedule => {
            let schedule = session.schedule()?;
            write!(
                out,
                "{}",
                format_schedule_grid(&schedule.weekdays(), &schedule.grid())
            )?;
        }
        Section::MonthlyExpenses => {
            let expenses = session.expenses()?;
            writeln!(out, "Standard expenses:")?;
            write!(out, "{}", format_standard_expenses(expenses.standard_labels()))?;
            writeln!(out)?;
            writeln!(out, "{}", format_expense_list(expenses.list()).trim_end())?;
        }
        Section::DailyCash => {
            let month = YearMonth::of(session.today());
            let currency = session.settings().currency_symbol.clone();
            write!(out, "{}", session.cash_summary(month)?.format_terminal(&currency))?;
        }
        Section::TeachingLoad => {
            let teaching = session.teaching()?;
            writeln!(out, "Teachers:")?;
            writeln!(out, "{}", format_teacher_list(teaching.teachers()).trim_end())?;
            writeln!(out)?;
            writeln!(out, "{}", format_load_entries(teaching.entries()).trim_end())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::run_line;
    use crate::config::Settings;
    use chrono::NaiveDate;
    use tempfile::TempDir;

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
    fn test_alerts_and_birthdays() {
        let mut session = session();
        run(&mut session, "student add Ana --birth 07/06/1995 --due 12/06/2025");
        run(&mut session, "student add Bruno --birth 01/01/1990 --due 01/06/2025");

        let alerts = run(&mut session, "alerts");
        assert!(alerts.contains("DUE IN 2 DAYS"));
        assert!(alerts.contains("OVERDUE"));

        let birthdays = run(&mut session, "birthdays");
        assert!(birthdays.contains("Ana"));
        assert!(!birthdays.contains("Bruno"));
    }

    #[test]
    fn test_alerts_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("alerts.csv");
        let mut session = session();
        run(&mut session, "student add Bruno --birth 01/01/1990 --due 01/06/2025");

        let out = run(&mut session, &format!("alerts -o {}", path.display()));
        assert!(out.contains("exported"));
        let csv = std::fs::read_to_string(&path).unwrap();
        assert_eq!(csv, "Student,Plan Due,Status\nBruno,01/06/2025,OVERDUE\n");
    }

    #[test]
    fn test_every_section_renders() {
        let mut session = session();
        for section in Section::ALL {
            let mut out = Vec::new();
            render_section(&mut session, section, &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with(&format!("== {} ==", section)));
        }
    }

    #[test]
    fn test_student_list_section() {
        let mut session = session();
        let out = run(&mut session, "go students");
        assert!(out.contains("No students registered."));
        assert!(out.contains("No tuition due"));
    }
}
