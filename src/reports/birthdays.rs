//! Birthday roster
//!
//! Students whose birthday falls in the current month.

use chrono::NaiveDate;
use std::io::Write;

use crate::dates::{self, Birthday};
use crate::error::AdminResult;
use crate::models::Student;

/// A student with a birthday this month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub name: String,
    pub birthday: Birthday,
}

/// Birthdays in one month, in roster order
#[derive(Debug, Clone)]
pub struct BirthdayRoster {
    pub month: u32,
    pub entries: Vec<BirthdayEntry>,
    /// Number of students on the roster when the report was generated
    pub roster_size: usize,
}

impl BirthdayRoster {
    pub fn generate(students: &[Student], today: NaiveDate) -> Self {
        let month = dates::month_of(today);
        let entries = students
            .iter()
            .filter(|s| s.has_birthday_in(month))
            .map(|s| BirthdayEntry {
                name: s.name.clone(),
                birthday: s.birthday(),
            })
            .collect();

        Self {
            month,
            entries,
            roster_size: students.len(),
        }
    }

    /// No students are registered at all
    pub fn roster_is_empty(&self) -> bool {
        self.roster_size == 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format!("Birthdays - month {:02}\n", self.month);
        output.push_str(&"=".repeat(40));
        output.push('\n');

        if self.roster_is_empty() {
            output.push_str("No students registered.\n");
        } else if self.entries.is_empty() {
            output.push_str("No birthdays this month.\n");
        } else {
            for entry in &self.entries {
                output.push_str(&format!("{:<30} {}\n", entry.name, entry.birthday));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> AdminResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Name", "Birthday"])?;
        for entry in &self.entries {
            csv.write_record([entry.name.clone(), entry.birthday.to_string()])?;
        }
        csv.flush()?;
        Ok(())
    }
}
