//! Service layer
//!
//! The service layer provides business logic on top of the record store,
//! handling form parsing, validation and the audit trail. Each service
//! borrows the session's storage and trail for the duration of one command.

pub mod cash;
pub mod expense;
pub mod schedule;
pub mod student;
pub mod teaching;
pub mod tuition;

pub use cash::CashService;
pub use expense::ExpenseService;
pub use schedule::{GridRow, ScheduleService};
pub use student::{StudentForm, StudentService};
pub use teaching::{TeachingService, MAX_CLASSES_PER_DAY};
pub use tuition::TuitionService;

use crate::error::{AdminError, AdminResult};
use crate::models::Money;
use crate::storage::{Identified, Table};

/// Resolve user-typed id text to exactly one row id
pub(crate) fn resolve_id<T: Identified>(
    table: &Table<T>,
    text: &str,
    entity_type: &'static str,
) -> AdminResult<T::Id> {
    let matches = table.find_by_id_text(text);
    match matches.as_slice() {
        [row] => Ok(row.id()),
        [] => Err(AdminError::NotFound {
            entity_type,
            identifier: text.trim().to_string(),
        }),
        _ => Err(AdminError::Validation(format!(
            "Ambiguous {} id '{}' matches {} rows",
            entity_type.to_lowercase(),
            text.trim(),
            matches.len()
        ))),
    }
}

/// Reject negative amounts at the form boundary
pub(crate) fn require_non_negative(amount: Money, what: &str) -> AdminResult<()> {
    if amount.is_negative() {
        return Err(AdminError::Validation(format!(
            "{} cannot be negative: {}",
            what, amount
        )));
    }
    Ok(())
}

/// Parse a money field typed into a form
pub fn parse_amount(text: &str, what: &str) -> AdminResult<Money> {
    Money::parse(text).map_err(|e| AdminError::Validation(format!("{}: {}", what, e)))
}
