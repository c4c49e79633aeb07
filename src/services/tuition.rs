//! Tuition payment service

use chrono::NaiveDate;
use tracing::info;

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::dates;
use crate::error::{AdminError, AdminResult};
use crate::models::{Money, PaymentMethod, TuitionPayment};
use crate::storage::{normalize_name, Storage};

use super::require_non_negative;

/// Service for tuition payments
pub struct TuitionService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
}

impl<'a> TuitionService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail) -> Self {
        Self { storage, audit }
    }

    /// Record a payment for a registered student
    pub fn record_payment(
        &mut self,
        student: &str,
        due_date: NaiveDate,
        paid_on: NaiveDate,
        amount: Money,
        method: PaymentMethod,
    ) -> AdminResult<TuitionPayment> {
        let name = self
            .storage
            .students
            .find_by_name(student)
            .map(|s| s.name.clone())
            .ok_or_else(|| AdminError::student_not_found(student.trim()))?;
        require_non_negative(amount, "Amount paid")?;

        let payment = TuitionPayment::new(name, due_date, paid_on, amount, method);
        self.storage.payments.add(payment.clone());
        self.audit.record(AuditEntry::create(
            EntityType::TuitionPayment,
            payment.id.to_string(),
            Some(payment.student.clone()),
            &payment,
        ));
        info!(
            id = %payment.id,
            student = %payment.student,
            paid_on = %dates::format(paid_on),
            %amount,
            %method,
            late = payment.is_late(),
            "tuition payment recorded"
        );

        Ok(payment)
    }

    /// Payments made by one student, in recording order
    pub fn payments_for(&self, student: &str) -> Vec<&TuitionPayment> {
        let wanted = normalize_name(student);
        self.storage
            .payments
            .iter()
            .filter(|p| normalize_name(&p.student) == wanted)
            .collect()
    }

    pub fn list(&self) -> &[TuitionPayment] {
        self.storage.payments.list()
    }
}
