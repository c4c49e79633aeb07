//! Teachers and their teaching load
//!
//! A teaching-load entry records how many classes a teacher taught on a
//! given date; pay owed is derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LoadEntryId;

/// A registered teacher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
}

impl Teacher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Classes taught by one teacher on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingLoadEntry {
    pub id: LoadEntryId,
    /// Name of the teacher (weak reference into the roster)
    pub teacher: String,
    pub date: NaiveDate,
    pub classes: u32,
}

impl TeachingLoadEntry {
    pub fn new(teacher: impl Into<String>, date: NaiveDate, classes: u32) -> Self {
        Self {
            id: LoadEntryId::new(),
            teacher: teacher.into(),
            date,
            classes,
        }
    }

    /// Exact teacher-name equality
    pub fn is_for(&self, teacher: &str) -> bool {
        self.teacher == teacher
    }
}
