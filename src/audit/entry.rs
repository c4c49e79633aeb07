//! Audit entries
//!
//! One entry per change to a school record, carrying JSON snapshots of the
//! record around the change. Updates compute their own field diff.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;

/// What happened to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        };
        f.write_str(verb)
    }
}

/// Kind of school record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Student,
    Expense,
    CashEntry,
    Teacher,
    TeachingLoad,
    TuitionPayment,
    ScheduleSlot,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Student => "student",
            Self::Expense => "expense",
            Self::CashEntry => "cash entry",
            Self::Teacher => "teacher",
            Self::TeachingLoad => "teaching-load entry",
            Self::TuitionPayment => "tuition payment",
            Self::ScheduleSlot => "schedule slot",
        };
        f.write_str(label)
    }
}

/// A change to one record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,

    /// Student or teacher name, or the short id of a ledger row
    pub entity_id: String,

    /// Who the row belongs to, when the id alone does not say it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Field-level changes of an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        let changes = match (&before, &after) {
            (Some(before), Some(after)) => generate_diff(before, after),
            _ => None,
        };
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            changes,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        record: &T,
    ) -> Self {
        Self::new(
            Operation::Create,
            entity_type,
            entity_id.into(),
            entity_name,
            None,
            serde_json::to_value(record).ok(),
        )
    }

    /// Record an edit; the diff between the snapshots becomes `changes`
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self::new(
            Operation::Update,
            entity_type,
            entity_id.into(),
            entity_name,
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
        )
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        record: &T,
    ) -> Self {
        Self::new(
            Operation::Delete,
            entity_type,
            entity_id.into(),
            entity_name,
            serde_json::to_value(record).ok(),
            None,
        )
    }

    /// One line for the `audit` listing, plus the changes of an update
    ///
    /// `[10/06/2025 14:02:11] deleted cash entry csh-1a2b3c4d`
    pub fn describe(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%d/%m/%Y %H:%M:%S"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        match &self.entity_name {
            Some(name) if *name != self.entity_id => output.push_str(&format!(" ({})", name)),
            _ => {}
        }

        if let Some(changes) = &self.changes {
            output.push_str(&format!("\n    {}", changes));
        }

        output
    }
}
