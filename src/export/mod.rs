//! Export module
//!
//! Turns record tables into downloadable files:
//! - XLSX: the student roster as delivered to the school office
//! - CSV: the same table for any spreadsheet program
//!
//! Every exportable record implements [`Tabular`]; the header row comes
//! from the type and each record supplies one row of cells.

pub mod csv;
pub mod xlsx;

pub use self::csv::to_csv_bytes;
pub use self::xlsx::to_spreadsheet_bytes;

use std::path::Path;

use tracing::info;

use crate::dates;
use crate::error::AdminResult;
use crate::models::{CashEntry, Expense, Money, Student, Teacher, TeachingLoadEntry, TuitionPayment};

/// Download name of the student spreadsheet
pub const EXPORT_FILE_NAME: &str = "alunos_phison.xlsx";

/// MIME type of the student spreadsheet
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Money(Money),
    Integer(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text rendering used by CSV output
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Money(amount) => amount.to_string(),
            Self::Integer(n) => n.to_string(),
        }
    }
}

/// A record that can be laid out as a spreadsheet row
pub trait Tabular {
    /// Worksheet name (at most 31 characters)
    const SHEET_NAME: &'static str;

    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Encode rows in the given format
pub fn to_bytes<T: Tabular>(rows: &[T], format: ExportFormat) -> AdminResult<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => to_spreadsheet_bytes(rows),
        ExportFormat::Csv => to_csv_bytes(rows),
    }
}

/// Write rows to a file, returning the number of bytes written
pub fn write_file<T: Tabular>(path: &Path, rows: &[T], format: ExportFormat) -> AdminResult<usize> {
    let bytes = to_bytes(rows, format)?;
    std::fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        rows = rows.len(),
        bytes = bytes.len(),
        format = format.extension(),
        "table exported"
    );
    Ok(bytes.len())
}

fn optional_money(amount: Option<Money>) -> Cell {
    amount.map(Cell::Money).unwrap_or_else(|| Cell::text(""))
}

impl Tabular for Student {
    const SHEET_NAME: &'static str = "Students";

    fn headers() -> &'static [&'static str] {
        &[
            "Name",
            "Email",
            "Birth Date",
            "Birthday",
            "National ID",
            "Phone",
            "Plan Due",
            "Monthly Fee",
            "Status",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.name),
            Cell::text(&self.email),
            Cell::text(dates::format(self.birth_date())),
            Cell::text(self.birthday().to_string()),
            Cell::text(&self.national_id),
            Cell::text(&self.phone),
            Cell::text(dates::format(self.plan_due)),
            optional_money(self.monthly_fee),
            Cell::text(self.status.map(|s| s.to_string()).unwrap_or_default()),
        ]
    }
}

impl Tabular for Expense {
    const SHEET_NAME: &'static str = "Expenses";

    fn headers() -> &'static [&'static str] {
        &["Id", "Expense", "Amount", "Due Date"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::text(&self.label),
            Cell::Money(self.amount),
            Cell::text(dates::format(self.due_date)),
        ]
    }
}

impl Tabular for CashEntry {
    const SHEET_NAME: &'static str = "Cash";

    fn headers() -> &'static [&'static str] {
        &["Id", "Date", "Kind", "Amount"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::text(dates::format(self.date)),
            Cell::text(self.kind.to_string()),
            Cell::Money(self.amount),
        ]
    }
}

impl Tabular for Teacher {
    const SHEET_NAME: &'static str = "Teachers";

    fn headers() -> &'static [&'static str] {
        &["Name"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::text(&self.name)]
    }
}

impl Tabular for TeachingLoadEntry {
    const SHEET_NAME: &'static str = "Teaching Load";

    fn headers() -> &'static [&'static str] {
        &["Id", "Teacher", "Date", "Classes"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::text(&self.teacher),
            Cell::text(dates::format(self.date)),
            Cell::Integer(i64::from(self.classes)),
        ]
    }
}

impl Tabular for TuitionPayment {
    const SHEET_NAME: &'static str = "Tuition";

    fn headers() -> &'static [&'static str] {
        &["Id", "Student", "Due Date", "Paid On", "Amount", "Method"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::text(&self.student),
            Cell::text(dates::format(self.due_date)),
            Cell::text(dates::format(self.paid_on)),
            Cell::Money(self.amount),
            Cell::text(self.method.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cells_match_headers() {
        let student = Student::new("Ana", ymd(1995, 1, 20), ymd(2025, 7, 1));
        assert_eq!(student.cells().len(), Student::headers().len());

        let expense = Expense::new("Rent", Money::from_cents(100), ymd(2025, 6, 5));
        assert_eq!(expense.cells().len(), Expense::headers().len());
    }

    #[test]
    fn test_student_cells() {
        let mut student = Student::new("Ana", ymd(1995, 1, 20), ymd(2025, 7, 1));
        let rendered: Vec<String> = student.cells().iter().map(Cell::render).collect();
        assert_eq!(rendered[2], "20/01/1995");
        assert_eq!(rendered[3], "20/01");
        assert_eq!(rendered[7], "");

        student.monthly_fee = Some(Money::from_cents(15000));
        assert_eq!(student.cells()[7], Cell::Money(Money::from_cents(15000)));
    }

    #[test]
    fn test_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE_NAME);
        let students = vec![Student::new("Ana", ymd(1995, 1, 20), ymd(2025, 7, 1))];

        let written = write_file(&path, &students, ExportFormat::Xlsx).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(written, on_disk.len());
        assert_eq!(&on_disk[..2], b"PK");
    }
}
