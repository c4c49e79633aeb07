//! Daily cash entries
//!
//! One inflow or outflow amount recorded against a date. The cash book is
//! an append-only ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CashEntryId;
use super::money::Money;

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashKind {
    Inflow,
    Outflow,
}

impl CashKind {
    /// Parse kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inflow" | "in" | "entrada" => Some(Self::Inflow),
            "outflow" | "out" | "saida" | "saída" => Some(Self::Outflow),
            _ => None,
        }
    }
}

impl fmt::Display for CashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "INFLOW"),
            Self::Outflow => write!(f, "OUTFLOW"),
        }
    }
}

/// A single cash movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    pub id: CashEntryId,
    pub date: NaiveDate,
    pub kind: CashKind,
    pub amount: Money,
}

impl CashEntry {
    pub fn new(date: NaiveDate, kind: CashKind, amount: Money) -> Self {
        Self {
            id: CashEntryId::new(),
            date,
            kind,
            amount,
        }
    }

    pub fn is_inflow(&self) -> bool {
        self.kind == CashKind::Inflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(CashKind::parse("IN"), Some(CashKind::Inflow));
        assert_eq!(CashKind::parse("saída"), Some(CashKind::Outflow));
        assert_eq!(CashKind::parse("sideways"), None);
        assert_eq!(CashKind::Outflow.to_string(), "OUTFLOW");
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let a = CashEntry::new(date, CashKind::Inflow, Money::from_cents(100));
        let b = CashEntry::new(date, CashKind::Inflow, Money::from_cents(100));
        assert_ne!(a.id, b.id);
        assert!(a.is_inflow());
    }
}
