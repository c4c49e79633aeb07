//! XLSX export

use rust_xlsxwriter::{Format, Workbook};

use super::{Cell, Tabular};
use crate::error::AdminResult;

/// Encode rows as a single-sheet workbook
///
/// The first row holds the column names; records follow in the order
/// given. An empty slice yields a header-only workbook.
pub fn to_spreadsheet_bytes<T: Tabular>(rows: &[T]) -> AdminResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(T::SHEET_NAME)?;

    for (col, title) in T::headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (index, record) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in record.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => worksheet.write_string(row, col, text)?,
                Cell::Money(amount) => {
                    worksheet.write_number_with_format(row, col, amount.as_f64(), &money_format)?
                }
                Cell::Integer(n) => worksheet.write_number(row, col, n as f64)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}
