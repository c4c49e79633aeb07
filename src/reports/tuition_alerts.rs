//! Tuition due-date alerts
//!
//! Flags students whose plan renewal date has passed or falls within the
//! alert window.

use chrono::NaiveDate;
use std::fmt;
use std::io::Write;

use crate::dates;
use crate::error::AdminResult;
use crate::models::Student;

/// Days ahead of the due date at which an alert is raised
pub const DEFAULT_ALERT_WINDOW_DAYS: i64 = 7;

/// What an alert says about a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLabel {
    Overdue,
    /// Due in this many days (0 means today)
    DueIn(i64),
}

impl AlertLabel {
    /// Classify days-until-due, or `None` when outside the window
    pub fn classify(days: i64, window: i64) -> Option<Self> {
        if days < 0 {
            Some(Self::Overdue)
        } else if days <= window {
            Some(Self::DueIn(days))
        } else {
            None
        }
    }
}

impl fmt::Display for AlertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "OVERDUE"),
            Self::DueIn(days) => write!(f, "DUE IN {} DAYS", days),
        }
    }
}

/// One student flagged by the alert report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuitionAlert {
    pub name: String,
    pub plan_due: NaiveDate,
    pub label: AlertLabel,
}

/// Tuition due-date alerts, in roster order
#[derive(Debug, Clone)]
pub struct TuitionAlerts {
    pub today: NaiveDate,
    pub window_days: i64,
    pub alerts: Vec<TuitionAlert>,
}

impl TuitionAlerts {
    /// Generate alerts with the default seven-day window
    pub fn generate(students: &[Student], today: NaiveDate) -> Self {
        Self::generate_with_window(students, today, DEFAULT_ALERT_WINDOW_DAYS)
    }

    pub fn generate_with_window(students: &[Student], today: NaiveDate, window_days: i64) -> Self {
        let alerts = students
            .iter()
            .filter_map(|student| {
                let days = dates::days_until(student.plan_due, today);
                AlertLabel::classify(days, window_days).map(|label| TuitionAlert {
                    name: student.name.clone(),
                    plan_due: student.plan_due,
                    label,
                })
            })
            .collect();

        Self {
            today,
            window_days,
            alerts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn overdue_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.label == AlertLabel::Overdue)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Tuition Alerts - {}\n", dates::format(self.today)));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.alerts.is_empty() {
            output.push_str("No tuition due in the next ");
            output.push_str(&format!("{} days.\n", self.window_days));
            return output;
        }

        output.push_str(&format!("{:<30} {:<12} {}\n", "Student", "Due", "Status"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for alert in &self.alerts {
            output.push_str(&format!(
                "{:<30} {:<12} {}\n",
                alert.name,
                dates::format(alert.plan_due),
                alert.label
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> AdminResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Student", "Plan Due", "Status"])?;
        for alert in &self.alerts {
            csv.write_record([
                alert.name.clone(),
                dates::format(alert.plan_due),
                alert.label.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(name: &str, plan_due: NaiveDate) -> Student {
        Student::new(name, ymd(1995, 1, 20), plan_due)
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(AlertLabel::classify(-1, 7), Some(AlertLabel::Overdue));
        assert_eq!(AlertLabel::classify(0, 7), Some(AlertLabel::DueIn(0)));
        assert_eq!(AlertLabel::classify(7, 7), Some(AlertLabel::DueIn(7)));
        assert_eq!(AlertLabel::classify(8, 7), None);
    }

    #[test]
    fn test_labels_render() {
        assert_eq!(AlertLabel::Overdue.to_string(), "OVERDUE");
        assert_eq!(AlertLabel::DueIn(2).to_string(), "DUE IN 2 DAYS");
    }

    #[test]
    fn test_generate_in_roster_order() {
        let today = ymd(2025, 6, 10);
        let students = vec![
            student("Ana", ymd(2025, 6, 12)),
            student("Bruno", ymd(2025, 6, 1)),
            student("Carla", ymd(2025, 7, 30)),
            student("Davi", ymd(2025, 6, 17)),
        ];

        let report = TuitionAlerts::generate(&students, today);
        let rows: Vec<(&str, String)> = report
            .alerts
            .iter()
            .map(|a| (a.name.as_str(), a.label.to_string()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("Ana", "DUE IN 2 DAYS".to_string()),
                ("Bruno", "OVERDUE".to_string()),
                ("Davi", "DUE IN 7 DAYS".to_string()),
            ]
        );
        assert_eq!(report.overdue_count(), 1);
    }

    #[test]
    fn test_generate_does_not_touch_roster() {
        let today = ymd(2025, 6, 10);
        let students = vec![student("Ana", ymd(2025, 6, 1))];
        let before = students.clone();

        let _ = TuitionAlerts::generate(&students, today);
        assert_eq!(students, before);
    }

    #[test]
    fn test_empty_report() {
        let report = TuitionAlerts::generate(&[], ymd(2025, 6, 10));
        assert!(report.is_empty());
        assert!(report.format_terminal().contains("No tuition due"));
    }

    #[test]
    fn test_export_csv() {
        let today = ymd(2025, 6, 10);
        let students = vec![student("Silva, Ana", ymd(2025, 6, 1))];
        let report = TuitionAlerts::generate(&students, today);

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Student,Plan Due,Status\n\"Silva, Ana\",01/06/2025,OVERDUE\n"
        );
    }
}
