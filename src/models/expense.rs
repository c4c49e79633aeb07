//! Expense model
//!
//! A recurring school expense (rent, utilities, taxes...) with its due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
///
/// Labels are not unique: the same standard label is saved again every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub label: String,
    pub amount: Money,
    pub due_date: NaiveDate,
}

impl Expense {
    pub fn new(label: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            label: label.into(),
            amount,
            due_date,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("Expense label cannot be empty".into());
        }
        if self.amount.is_negative() {
            return Err(format!("Expense amount cannot be negative: {}", self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.amount)
    }
}
