//! Monthly teaching-load summary
//!
//! Classes a teacher taught in one month and the pay owed for them.

use std::io::Write;

use crate::dates::{self, YearMonth};
use crate::error::{AdminError, AdminResult};
use crate::models::{Money, TeachingLoadEntry};

/// Pay owed to one teacher for one month
#[derive(Debug, Clone)]
pub struct TeachingLoadSummary {
    pub teacher: String,
    pub month: YearMonth,
    pub rate: Money,
    /// Matched entries sorted by date
    pub entries: Vec<TeachingLoadEntry>,
    pub total_classes: u64,
    pub pay: Money,
}

impl TeachingLoadSummary {
    /// Summarize entries whose teacher name equals `teacher` exactly
    ///
    /// Fails when the pay does not fit in a money amount.
    pub fn generate(
        entries: &[TeachingLoadEntry],
        teacher: &str,
        month: YearMonth,
        rate: Money,
    ) -> AdminResult<Self> {
        let mut selected: Vec<TeachingLoadEntry> = entries
            .iter()
            .filter(|e| e.is_for(teacher) && month.contains(e.date))
            .cloned()
            .collect();
        selected.sort_by_key(|e| e.date);

        let total_classes: u64 = selected.iter().map(|e| u64::from(e.classes)).sum();
        let pay = rate.checked_times(total_classes).ok_or_else(|| {
            AdminError::Validation(format!(
                "Pay for {} classes at {} does not fit",
                total_classes, rate
            ))
        })?;

        Ok(Self {
            teacher: teacher.to_string(),
            month,
            rate,
            entries: selected,
            total_classes,
            pay,
        })
    }

    /// Nothing was recorded for the teacher in the month
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format!("Teaching Load - {} - {}\n", self.teacher, self.month);
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No classes recorded for this month.\n");
            return output;
        }

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<12} {:>4} classes  {}\n",
                dates::format(entry.date),
                entry.classes,
                entry.id
            ));
        }
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("Total classes: {}\n", self.total_classes));
        output.push_str(&format!(
            "Amount owed ({}/class): {}\n",
            self.rate.format_with_symbol(currency),
            self.pay.format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> AdminResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Teacher", "Date", "Classes"])?;
        for entry in &self.entries {
            csv.write_record([
                entry.teacher.clone(),
                dates::format(entry.date),
                entry.classes.to_string(),
            ])?;
        }
        csv.write_record([
            self.teacher.clone(),
            "TOTAL".to_string(),
            self.total_classes.to_string(),
        ])?;
        csv.write_record([self.teacher.clone(), "PAY".to_string(), self.pay.to_string()])?;
        csv.flush()?;
        Ok(())
    }
}
