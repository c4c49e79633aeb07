//! Storage layer
//!
//! Records live in memory for the duration of a session. `Storage` owns
//! one ordered table per entity plus the schedule grid; nothing is written
//! to disk and a new process starts empty.

pub mod table;

pub use table::{normalize_name, Identified, Named, Table};

use crate::models::{
    CashEntry, Expense, Schedule, Student, Teacher, TeachingLoadEntry, TuitionPayment,
};

/// Owner of every record in the session
#[derive(Debug, Clone, Default)]
pub struct Storage {
    pub students: Table<Student>,
    pub expenses: Table<Expense>,
    pub cash: Table<CashEntry>,
    pub teachers: Table<Teacher>,
    pub teaching_loads: Table<TeachingLoadEntry>,
    pub payments: Table<TuitionPayment>,
    pub schedule: Schedule,
}

impl Storage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all tables
    pub fn row_count(&self) -> usize {
        self.students.len()
            + self.expenses.len()
            + self.cash.len()
            + self.teachers.len()
            + self.teaching_loads.len()
            + self.payments.len()
            + self.schedule.filled_count()
    }
}
