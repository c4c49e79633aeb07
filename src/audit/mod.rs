//! Audit trail
//!
//! Records every create, update and delete with before/after snapshots.
//! The trail lives in the session alongside the records and is dropped
//! with them.
//!
//! - `AuditEntry`: one operation on one record, with JSON snapshots.
//! - `AuditTrail`: append-only, in-order collection of entries.
//! - `generate_diff`: field-level summary between two snapshots.

mod diff;
mod entry;
mod trail;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use trail::AuditTrail;
