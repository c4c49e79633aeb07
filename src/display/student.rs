//! Student display formatting

use super::render_table;
use crate::dates;
use crate::models::Student;

/// Format the roster as a table
pub fn format_student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students registered.".to_string();
    }

    let rows: Vec<Vec<String>> = students
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.birthday().to_string(),
                s.phone.clone(),
                dates::format(s.plan_due),
                s.monthly_fee.map(|f| f.to_string()).unwrap_or_default(),
                s.status.map(|st| st.to_string()).unwrap_or_default(),
            ]
        })
        .collect();

    let mut output = render_table(
        &["Name", "Birthday", "Phone", "Plan Due", "Fee", "Status"],
        &rows,
        &[4],
    );
    output.push_str(&format!("{} student(s)\n", students.len()));
    output
}

/// Format a single student's details
pub fn format_student_details(student: &Student, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Student: {}\n", student.name));
    output.push_str(&format!("  Email:        {}\n", student.email));
    output.push_str(&format!(
        "  Birth date:   {} (birthday {})\n",
        dates::format(student.birth_date()),
        student.birthday()
    ));
    output.push_str(&format!("  National ID:  {}\n", student.national_id));
    output.push_str(&format!("  Phone:        {}\n", student.phone));
    output.push_str(&format!("  Plan due:     {}\n", dates::format(student.plan_due)));
    output.push_str(&format!(
        "  Monthly fee:  {}\n",
        student
            .monthly_fee
            .map(|f| f.format_with_symbol(currency))
            .unwrap_or_else(|| "-".into())
    ));
    output.push_str(&format!(
        "  Status:       {}\n",
        student
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into())
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_list() {
        assert_eq!(format_student_list(&[]), "No students registered.");

        let mut ana = Student::new(
            "Ana",
            NaiveDate::from_ymd_opt(1995, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        );
        ana.monthly_fee = Some(Money::from_cents(15000));
        let text = format_student_list(&[ana.clone()]);
        assert!(text.contains("20/01"));
        assert!(text.contains("150.00"));
        assert!(text.ends_with("1 student(s)\n"));

        let details = format_student_details(&ana, "R$");
        assert!(details.contains("Monthly fee:  R$150.00"));
        assert!(details.contains("Status:       -"));
    }
}
