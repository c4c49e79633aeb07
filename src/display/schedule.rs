//! Schedule grid display

use crate::services::GridRow;

/// Format the weekly grid, one line per hour
///
/// Long slot texts are cut so the grid stays readable.
pub fn format_schedule_grid(weekdays: &[&str], rows: &[GridRow]) -> String {
    const CELL: usize = 16;

    let mut output = format!("{:<6}", "Hour");
    for day in weekdays {
        output.push_str(&format!("| {:<width$}", day, width = CELL));
    }
    output.push('\n');
    output.push_str(&"-".repeat(6 + weekdays.len() * (CELL + 2)));
    output.push('\n');

    for row in rows {
        output.push_str(&format!("{:02}:00 ", row.hour));
        for cell in &row.cells {
            let text: String = if cell.chars().count() > CELL {
                let head: String = cell.chars().take(CELL - 1).collect();
                format!("{}~", head)
            } else {
                cell.clone()
            };
            output.push_str(&format!("| {:<width$}", text, width = CELL));
        }
        output.push('\n');
    }

    output
}
