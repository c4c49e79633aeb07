//! Daily cash service
//!
//! `record` appends to the cash book, so submitting the same day twice
//! yields two rows. `set_day` is the idempotent form: it replaces whatever
//! was recorded for the date and kind.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::dates;
use crate::error::{AdminError, AdminResult};
use crate::models::{CashEntry, CashKind, Money};
use crate::storage::Storage;

use super::{require_non_negative, resolve_id};

/// Service for the daily cash book
pub struct CashService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
}

impl<'a> CashService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail) -> Self {
        Self { storage, audit }
    }

    /// Append a cash movement
    ///
    /// Zero amounts are not recorded and yield `None`.
    pub fn record(
        &mut self,
        date: NaiveDate,
        kind: CashKind,
        amount: Money,
    ) -> AdminResult<Option<CashEntry>> {
        require_non_negative(amount, "Cash amount")?;
        if amount.is_zero() {
            debug!(date = %dates::format(date), %kind, "zero cash amount skipped");
            return Ok(None);
        }

        let entry = CashEntry::new(date, kind, amount);
        self.storage.cash.add(entry.clone());
        self.audit.record(AuditEntry::create(
            EntityType::CashEntry,
            entry.id.to_string(),
            None,
            &entry,
        ));
        info!(id = %entry.id, date = %dates::format(date), %kind, %amount, "cash entry recorded");

        Ok(Some(entry))
    }

    /// Record a day's inflow and outflow together
    ///
    /// Both amounts are checked before either is written, so a bad outflow
    /// leaves no inflow behind. Zero amounts are skipped.
    pub fn record_day(
        &mut self,
        date: NaiveDate,
        inflow: Money,
        outflow: Money,
    ) -> AdminResult<Vec<CashEntry>> {
        require_non_negative(inflow, "Inflow")?;
        require_non_negative(outflow, "Outflow")?;

        let mut recorded = Vec::new();
        for (kind, amount) in [(CashKind::Inflow, inflow), (CashKind::Outflow, outflow)] {
            recorded.extend(self.record(date, kind, amount)?);
        }
        Ok(recorded)
    }

    /// Replace the day's total for one kind
    ///
    /// Every existing row for (date, kind) is removed first; a zero amount
    /// just clears the day.
    pub fn set_day(
        &mut self,
        date: NaiveDate,
        kind: CashKind,
        amount: Money,
    ) -> AdminResult<Option<CashEntry>> {
        require_non_negative(amount, "Cash amount")?;

        let unchanged = {
            let existing: Vec<&CashEntry> = self
                .storage
                .cash
                .iter()
                .filter(|e| e.date == date && e.kind == kind)
                .collect();
            match existing.as_slice() {
                [only] if only.amount == amount => Some((*only).clone()),
                [] if amount.is_zero() => return Ok(None),
                _ => None,
            }
        };
        if let Some(entry) = unchanged {
            return Ok(Some(entry));
        }

        let removed = self
            .storage
            .cash
            .remove_where(|e| e.date == date && e.kind == kind);
        for entry in &removed {
            self.audit.record(AuditEntry::delete(
                EntityType::CashEntry,
                entry.id.to_string(),
                None,
                entry,
            ));
        }

        self.record(date, kind, amount)
    }

    /// Remove one entry by id
    pub fn delete(&mut self, id_text: &str) -> AdminResult<CashEntry> {
        let id = resolve_id(&self.storage.cash, id_text, "Entry")?;
        let entry = self
            .storage
            .cash
            .remove_id(id)
            .ok_or_else(|| AdminError::entry_not_found(id_text.trim()))?;

        self.audit.record(AuditEntry::delete(
            EntityType::CashEntry,
            entry.id.to_string(),
            None,
            &entry,
        ));
        info!(id = %entry.id, "cash entry deleted");

        Ok(entry)
    }

    pub fn list(&self) -> &[CashEntry] {
        self.storage.cash.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_record_appends() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        let entry = service
            .record(day(5), CashKind::Inflow, Money::from_cents(10000))
            .unwrap()
            .unwrap();
        assert_eq!(entry.amount, Money::from_cents(10000));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_resubmission_duplicates_rows() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        service.record(day(5), CashKind::Inflow, Money::from_cents(10000)).unwrap();
        service.record(day(5), CashKind::Inflow, Money::from_cents(10000)).unwrap();

        assert_eq!(service.list().len(), 2);
        assert_ne!(service.list()[0].id, service.list()[1].id);
    }

    #[test]
    fn test_zero_and_negative_amounts() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        assert!(service.record(day(5), CashKind::Outflow, Money::zero()).unwrap().is_none());
        assert!(service
            .record(day(5), CashKind::Outflow, Money::from_cents(-1))
            .unwrap_err()
            .is_validation());
        assert!(service.list().is_empty());
        drop(service);
        assert!(audit.is_empty());
    }

    #[test]
    fn test_record_day_is_all_or_nothing() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        let err = service
            .record_day(day(2), Money::from_cents(10000), Money::from_cents(-500))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().is_empty());

        let recorded = service
            .record_day(day(2), Money::from_cents(10000), Money::zero())
            .unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].kind, CashKind::Inflow);

        let recorded = service
            .record_day(day(3), Money::from_cents(50000), Money::from_cents(12050))
            .unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(service.list().len(), 3);
        drop(service);
        assert_eq!(audit.len(), 3);
    }

    #[test]
    fn test_set_day_is_idempotent() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        service.record(day(5), CashKind::Inflow, Money::from_cents(100)).unwrap();
        service.record(day(5), CashKind::Inflow, Money::from_cents(200)).unwrap();
        service.record(day(5), CashKind::Outflow, Money::from_cents(50)).unwrap();

        service.set_day(day(5), CashKind::Inflow, Money::from_cents(300)).unwrap();
        let snapshot = service.list().to_vec();
        service.set_day(day(5), CashKind::Inflow, Money::from_cents(300)).unwrap();

        assert_eq!(service.list(), snapshot.as_slice());
        let inflows: Vec<_> = service.list().iter().filter(|e| e.is_inflow()).collect();
        assert_eq!(inflows.len(), 1);
        assert_eq!(inflows[0].amount, Money::from_cents(300));
        assert_eq!(service.list().len(), 2);
    }

    #[test]
    fn test_set_day_zero_clears() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        service.record(day(5), CashKind::Inflow, Money::from_cents(100)).unwrap();
        assert!(service.set_day(day(5), CashKind::Inflow, Money::zero()).unwrap().is_none());
        assert!(service.list().is_empty());
        assert!(service.set_day(day(5), CashKind::Inflow, Money::zero()).unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = CashService::new(&mut storage, &mut audit);

        let entry = service
            .record(day(5), CashKind::Inflow, Money::from_cents(100))
            .unwrap()
            .unwrap();
        service.delete(&entry.id.to_string()).unwrap();
        assert!(service.list().is_empty());
        assert!(service.delete(&entry.id.to_string()).unwrap_err().is_not_found());
    }
}
