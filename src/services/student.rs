//! Student service
//!
//! Parses the registration and edit forms, enforces name uniqueness and
//! keeps the audit trail for the roster.

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::config::Settings;
use crate::dates;
use crate::error::{AdminError, AdminResult};
use crate::models::{Student, StudentStatus};
use crate::storage::{normalize_name, Storage};

use super::{parse_amount, require_non_negative};

/// The text fields of the registration and edit forms
///
/// Dates are typed as `DD/MM/YYYY`; an empty fee or status leaves the
/// field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub national_id: String,
    pub phone: String,
    pub plan_due: String,
    pub monthly_fee: String,
    pub status: String,
}

impl StudentForm {
    /// Pre-fill an edit form from an existing student
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            birth_date: dates::format(student.birth_date()),
            national_id: student.national_id.clone(),
            phone: student.phone.clone(),
            plan_due: dates::format(student.plan_due),
            monthly_fee: student
                .monthly_fee
                .map(|fee| fee.to_string())
                .unwrap_or_default(),
            status: student.status.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

/// Service for the student roster
pub struct StudentService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
    settings: &'a Settings,
}

impl<'a> StudentService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail, settings: &'a Settings) -> Self {
        Self {
            storage,
            audit,
            settings,
        }
    }

    /// Register a new student
    pub fn create(&mut self, form: &StudentForm) -> AdminResult<Student> {
        let student = self.parse_form(form)?;

        if self.storage.students.contains_name(&student.name) {
            warn!(name = %student.name, "student already registered");
            return Err(AdminError::Duplicate {
                entity_type: "Student",
                identifier: student.name.clone(),
            });
        }

        self.storage.students.add(student.clone());
        self.audit.record(AuditEntry::create(
            EntityType::Student,
            student.name.clone(),
            Some(student.name.clone()),
            &student,
        ));
        info!(name = %student.name, "student registered");

        Ok(student)
    }

    /// Replace a student's fields, keeping its position in the roster
    pub fn update(&mut self, name: &str, form: &StudentForm) -> AdminResult<Student> {
        let before = self
            .storage
            .students
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| AdminError::student_not_found(name.trim()))?;

        let student = self.parse_form(form)?;

        let renamed = normalize_name(&student.name) != normalize_name(&before.name);
        if renamed && self.storage.students.contains_name(&student.name) {
            return Err(AdminError::Duplicate {
                entity_type: "Student",
                identifier: student.name.clone(),
            });
        }

        if !self.storage.students.update(name, student.clone()) {
            return Err(AdminError::student_not_found(name.trim()));
        }

        self.audit.record(AuditEntry::update(
            EntityType::Student,
            before.name.clone(),
            Some(student.name.clone()),
            &before,
            &student,
        ));
        info!(name = %student.name, renamed, "student updated");

        Ok(student)
    }

    /// Remove a student from the roster
    pub fn delete(&mut self, name: &str) -> AdminResult<Student> {
        let student = self
            .storage
            .students
            .remove(name)
            .ok_or_else(|| AdminError::student_not_found(name.trim()))?;

        self.audit.record(AuditEntry::delete(
            EntityType::Student,
            student.name.clone(),
            Some(student.name.clone()),
            &student,
        ));
        info!(name = %student.name, "student deleted");

        Ok(student)
    }

    pub fn find(&self, name: &str) -> Option<&Student> {
        self.storage.students.find_by_name(name)
    }

    pub fn list(&self) -> &[Student] {
        self.storage.students.list()
    }

    fn parse_form(&self, form: &StudentForm) -> AdminResult<Student> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("Student name is required".into()));
        }

        let birth_date = parse_date_field(&form.birth_date, "Birth date")?;
        if !self.settings.accepts_birth_year(birth_date.year()) {
            let range = self
                .settings
                .birth_year_range
                .map(|r| format!(" ({}-{})", r.min, r.max))
                .unwrap_or_default();
            return Err(AdminError::Validation(format!(
                "Birth year {} is outside the accepted range{}",
                birth_date.year(),
                range
            )));
        }

        let plan_due = parse_date_field(&form.plan_due, "Plan due date")?;

        let mut student = Student::new(name, birth_date, plan_due);
        student.email = form.email.trim().to_string();
        student.national_id = form.national_id.trim().to_string();
        student.phone = form.phone.trim().to_string();

        if !form.monthly_fee.trim().is_empty() {
            let fee = parse_amount(&form.monthly_fee, "Monthly fee")?;
            require_non_negative(fee, "Monthly fee")?;
            student.monthly_fee = Some(fee);
        }

        if !form.status.trim().is_empty() {
            student.status = Some(StudentStatus::parse(&form.status).ok_or_else(|| {
                AdminError::Validation(format!("Unknown status: {}", form.status.trim()))
            })?);
        }

        student
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        Ok(student)
    }
}

fn parse_date_field(text: &str, field: &str) -> AdminResult<NaiveDate> {
    dates::parse(text).map_err(|e| AdminError::Validation(format!("{}: {}", field, e)))
}
