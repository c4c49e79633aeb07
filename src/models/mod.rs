//! Core data models
//!
//! This module contains the records kept by the school: students, expenses,
//! cash entries, teachers and their teaching load, tuition payments and the
//! weekly schedule.

pub mod cash;
pub mod expense;
pub mod ids;
pub mod money;
pub mod schedule;
pub mod student;
pub mod teaching;
pub mod tuition;

pub use cash::{CashEntry, CashKind};
pub use expense::Expense;
pub use ids::{CashEntryId, ExpenseId, LoadEntryId, PaymentId};
pub use money::Money;
pub use schedule::{Schedule, SlotKey};
pub use student::{Student, StudentStatus};
pub use teaching::{Teacher, TeachingLoadEntry};
pub use tuition::{PaymentMethod, TuitionPayment};
