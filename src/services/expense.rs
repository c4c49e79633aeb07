//! Expense service

use chrono::NaiveDate;
use tracing::info;

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::config::Settings;
use crate::error::{AdminError, AdminResult};
use crate::models::{Expense, Money};
use crate::storage::{normalize_name, Storage};

use super::resolve_id;

/// Service for monthly expenses
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
    settings: &'a Settings,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail, settings: &'a Settings) -> Self {
        Self {
            storage,
            audit,
            settings,
        }
    }

    /// Record an expense under any label
    pub fn add(&mut self, label: &str, amount: Money, due_date: NaiveDate) -> AdminResult<Expense> {
        let expense = Expense::new(label.trim(), amount, due_date);
        expense.validate().map_err(AdminError::Validation)?;

        self.storage.expenses.add(expense.clone());
        self.audit.record(AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.label.clone()),
            &expense,
        ));
        info!(id = %expense.id, label = %expense.label, amount = %expense.amount, "expense added");

        Ok(expense)
    }

    /// Record one of the standard expenses
    ///
    /// `label` is either one of the configured labels (case-insensitive) or
    /// its 1-based position in the list.
    pub fn add_standard(
        &mut self,
        label: &str,
        amount: Money,
        due_date: NaiveDate,
    ) -> AdminResult<Expense> {
        let canonical = self.standard_label(label)?.to_string();
        self.add(&canonical, amount, due_date)
    }

    /// The configured standard expense labels
    pub fn standard_labels(&self) -> &[String] {
        &self.settings.standard_expenses
    }

    /// Remove every expense carrying the label
    pub fn delete_by_label(&mut self, label: &str) -> AdminResult<Vec<Expense>> {
        let wanted = normalize_name(label);
        let removed = self
            .storage
            .expenses
            .remove_where(|e| normalize_name(&e.label) == wanted);

        if removed.is_empty() {
            return Err(AdminError::expense_not_found(label.trim()));
        }

        for expense in &removed {
            self.audit.record(AuditEntry::delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.label.clone()),
                expense,
            ));
        }
        info!(label = %label.trim(), count = removed.len(), "expenses deleted by label");

        Ok(removed)
    }

    /// Remove exactly one expense by id
    pub fn delete(&mut self, id_text: &str) -> AdminResult<Expense> {
        let id = resolve_id(&self.storage.expenses, id_text, "Expense")?;
        let expense = self
            .storage
            .expenses
            .remove_id(id)
            .ok_or_else(|| AdminError::expense_not_found(id_text.trim()))?;

        self.audit.record(AuditEntry::delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.label.clone()),
            &expense,
        ));
        info!(id = %expense.id, "expense deleted");

        Ok(expense)
    }

    pub fn list(&self) -> &[Expense] {
        self.storage.expenses.list()
    }

    fn standard_label(&self, label: &str) -> AdminResult<&str> {
        let labels = &self.settings.standard_expenses;

        if let Ok(position) = label.trim().parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| labels.get(i))
                .map(String::as_str)
                .ok_or_else(|| {
                    AdminError::Validation(format!(
                        "Standard expense number must be 1-{}",
                        labels.len()
                    ))
                });
        }

        let wanted = normalize_name(label);
        labels
            .iter()
            .find(|l| normalize_name(l) == wanted)
            .map(String::as_str)
            .ok_or_else(|| {
                AdminError::Validation(format!("'{}' is not a standard expense", label.trim()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    struct Fixture {
        storage: Storage,
        audit: AuditTrail,
        settings: Settings,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                storage: Storage::new(),
                audit: AuditTrail::new(),
                settings: Settings::default(),
            }
        }

        fn service(&mut self) -> ExpenseService<'_> {
            ExpenseService::new(&mut self.storage, &mut self.audit, &self.settings)
        }
    }

    #[test]
    fn test_add_expense() {
        let mut fx = Fixture::new();
        let expense = fx
            .service()
            .add(" Cleaning ", Money::from_cents(8000), due(10))
            .unwrap();

        assert_eq!(expense.label, "Cleaning");
        assert_eq!(fx.storage.expenses.len(), 1);
        assert_eq!(fx.audit.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut fx = Fixture::new();
        let mut service = fx.service();
        assert!(service.add("", Money::from_cents(1), due(1)).unwrap_err().is_validation());
        assert!(service
            .add("Rent", Money::from_cents(-1), due(1))
            .unwrap_err()
            .is_validation());
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_add_standard() {
        let mut fx = Fixture::new();
        let mut service = fx.service();

        let by_name = service.add_standard("internet", Money::from_cents(9990), due(15)).unwrap();
        assert_eq!(by_name.label, "Internet");

        let by_position = service.add_standard("1", Money::from_cents(150000), due(5)).unwrap();
        assert_eq!(by_position.label, "Rent");

        assert!(service
            .add_standard("Yacht", Money::from_cents(1), due(5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_standard("10", Money::from_cents(1), due(5))
            .unwrap_err()
            .is_validation());
        assert_eq!(service.standard_labels().len(), 9);
    }

    #[test]
    fn test_delete_by_label_removes_all() {
        let mut fx = Fixture::new();
        let mut service = fx.service();
        service.add("Rent", Money::from_cents(150000), due(5)).unwrap();
        service.add("Water", Money::from_cents(9000), due(10)).unwrap();
        service.add("Rent", Money::from_cents(150000), due(5)).unwrap();

        let removed = service.delete_by_label("rent").unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(service.list().len(), 1);
        assert_eq!(service.list()[0].label, "Water");

        assert!(service.delete_by_label("Rent").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_by_id_removes_one() {
        let mut fx = Fixture::new();
        let mut service = fx.service();
        let first = service.add("Rent", Money::from_cents(150000), due(5)).unwrap();
        service.add("Rent", Money::from_cents(150000), due(5)).unwrap();

        service.delete(&first.id.to_string()).unwrap();
        assert_eq!(service.list().len(), 1);
        assert_ne!(service.list()[0].id, first.id);
    }
}
