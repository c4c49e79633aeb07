//! Derived reports
//!
//! Read-only views computed from the record store on demand:
//! tuition due-date alerts, the birthday roster, the monthly cash summary
//! and the monthly teaching-load pay summary. Each report can be rendered
//! for the terminal or exported as CSV.

pub mod birthdays;
pub mod cash_flow;
pub mod teaching_load;
pub mod tuition_alerts;

pub use birthdays::{BirthdayEntry, BirthdayRoster};
pub use cash_flow::CashSummary;
pub use teaching_load::TeachingLoadSummary;
pub use tuition_alerts::{AlertLabel, TuitionAlert, TuitionAlerts, DEFAULT_ALERT_WINDOW_DAYS};
