//! Display formatting for terminal output
//!
//! Formats records as aligned plain-text tables and detail views.

pub mod ledger;
pub mod schedule;
pub mod student;

pub use ledger::{
    format_cash_entries, format_expense_list, format_load_entries, format_payment_list,
    format_standard_expenses, format_teacher_list,
};
pub use schedule::format_schedule_grid;
pub use student::{format_student_details, format_student_list};

/// Render rows under a header with columns padded to their widest cell
///
/// Columns listed in `right_aligned` are padded on the left (amounts).
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>], right_aligned: &[usize]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut output = format_row(headers.iter().copied(), &widths, right_aligned);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&separator.join("  "));
    output.push('\n');
    for row in rows {
        output.push_str(&format_row(row.iter().map(String::as_str), &widths, right_aligned));
    }
    output
}

fn format_row<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    right_aligned: &[usize],
) -> String {
    let line: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if right_aligned.contains(&i) {
                format!("{:>width$}", cell, width = *width)
            } else {
                format!("{:<width$}", cell, width = *width)
            }
        })
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let rows = vec![
            vec!["Ana".to_string(), "5.00".to_string()],
            vec!["Bruno".to_string(), "150.00".to_string()],
        ];
        let table = render_table(&["Name", "Fee"], &rows, &[1]);

        assert_eq!(
            table,
            "Name      Fee\n-----  ------\nAna      5.00\nBruno  150.00\n"
        );
    }
}
