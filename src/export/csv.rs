//! CSV export

use super::{Cell, Tabular};
use crate::error::AdminResult;

/// Encode rows as CSV with a header line
pub fn to_csv_bytes<T: Tabular>(rows: &[T]) -> AdminResult<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(T::headers())?;
    for record in rows {
        let cells: Vec<String> = record.cells().iter().map(Cell::render).collect();
        writer.write_record(&cells)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::error::AdminError::Export(e.to_string()))
}
