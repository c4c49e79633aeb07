//! Teacher roster and teaching-load service

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::dates;
use crate::error::{AdminError, AdminResult};
use crate::models::{Teacher, TeachingLoadEntry};
use crate::storage::Storage;

use super::resolve_id;

/// Most classes one teacher can be recorded for on one date
pub const MAX_CLASSES_PER_DAY: u32 = 24;

/// Service for teachers and the classes they teach
pub struct TeachingService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
}

impl<'a> TeachingService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail) -> Self {
        Self { storage, audit }
    }

    /// Add a teacher to the roster
    pub fn register_teacher(&mut self, name: &str) -> AdminResult<Teacher> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("Teacher name is required".into()));
        }

        if self.storage.teachers.contains_name(name) {
            warn!(name, "teacher already registered");
            return Err(AdminError::Duplicate {
                entity_type: "Teacher",
                identifier: name.to_string(),
            });
        }

        let teacher = Teacher::new(name);
        self.storage.teachers.add(teacher.clone());
        self.audit.record(AuditEntry::create(
            EntityType::Teacher,
            teacher.name.clone(),
            Some(teacher.name.clone()),
            &teacher,
        ));
        info!(name = %teacher.name, "teacher registered");

        Ok(teacher)
    }

    /// Remove a teacher from the roster
    ///
    /// Recorded classes are kept; they still appear in monthly summaries
    /// under the teacher's name.
    pub fn remove_teacher(&mut self, name: &str) -> AdminResult<Teacher> {
        let teacher = self
            .storage
            .teachers
            .remove(name)
            .ok_or_else(|| AdminError::teacher_not_found(name.trim()))?;

        self.audit.record(AuditEntry::delete(
            EntityType::Teacher,
            teacher.name.clone(),
            Some(teacher.name.clone()),
            &teacher,
        ));
        info!(name = %teacher.name, "teacher removed");

        Ok(teacher)
    }

    pub fn teachers(&self) -> &[Teacher] {
        self.storage.teachers.list()
    }

    /// Append the classes a teacher taught on a date
    ///
    /// The entry stores the roster spelling of the name. Zero classes are
    /// not recorded and yield `None`. The day's total may not exceed
    /// [`MAX_CLASSES_PER_DAY`].
    pub fn record_classes(
        &mut self,
        teacher: &str,
        date: NaiveDate,
        classes: u32,
    ) -> AdminResult<Option<TeachingLoadEntry>> {
        let canonical = self.roster_name(teacher)?;
        let already: u32 = self
            .storage
            .teaching_loads
            .iter()
            .filter(|e| e.is_for(&canonical) && e.date == date)
            .map(|e| e.classes)
            .fold(0, u32::saturating_add);
        check_classes(already.saturating_add(classes))?;
        if classes == 0 {
            debug!(teacher = %canonical, date = %dates::format(date), "zero classes skipped");
            return Ok(None);
        }

        let entry = TeachingLoadEntry::new(canonical, date, classes);
        self.storage.teaching_loads.add(entry.clone());
        self.audit.record(AuditEntry::create(
            EntityType::TeachingLoad,
            entry.id.to_string(),
            Some(entry.teacher.clone()),
            &entry,
        ));
        info!(
            id = %entry.id,
            teacher = %entry.teacher,
            date = %dates::format(date),
            classes,
            "classes recorded"
        );

        Ok(Some(entry))
    }

    /// Replace the classes recorded for a teacher on a date
    pub fn set_day(
        &mut self,
        teacher: &str,
        date: NaiveDate,
        classes: u32,
    ) -> AdminResult<Option<TeachingLoadEntry>> {
        let canonical = self.roster_name(teacher)?;
        check_classes(classes)?;

        let unchanged = {
            let existing: Vec<&TeachingLoadEntry> = self
                .storage
                .teaching_loads
                .iter()
                .filter(|e| e.is_for(&canonical) && e.date == date)
                .collect();
            match existing.as_slice() {
                [only] if only.classes == classes => Some((*only).clone()),
                [] if classes == 0 => return Ok(None),
                _ => None,
            }
        };
        if let Some(entry) = unchanged {
            return Ok(Some(entry));
        }

        let removed = self
            .storage
            .teaching_loads
            .remove_where(|e| e.is_for(&canonical) && e.date == date);
        for entry in &removed {
            self.audit.record(AuditEntry::delete(
                EntityType::TeachingLoad,
                entry.id.to_string(),
                Some(entry.teacher.clone()),
                entry,
            ));
        }

        self.record_classes(&canonical, date, classes)
    }

    /// Remove one teaching-load entry by id
    pub fn delete(&mut self, id_text: &str) -> AdminResult<TeachingLoadEntry> {
        let id = resolve_id(&self.storage.teaching_loads, id_text, "Entry")?;
        let entry = self
            .storage
            .teaching_loads
            .remove_id(id)
            .ok_or_else(|| AdminError::entry_not_found(id_text.trim()))?;

        self.audit.record(AuditEntry::delete(
            EntityType::TeachingLoad,
            entry.id.to_string(),
            Some(entry.teacher.clone()),
            &entry,
        ));
        info!(id = %entry.id, "teaching-load entry deleted");

        Ok(entry)
    }

    pub fn entries(&self) -> &[TeachingLoadEntry] {
        self.storage.teaching_loads.list()
    }

    fn roster_name(&self, teacher: &str) -> AdminResult<String> {
        self.storage
            .teachers
            .find_by_name(teacher)
            .map(|t| t.name.clone())
            .ok_or_else(|| AdminError::teacher_not_found(teacher.trim()))
    }
}

fn check_classes(classes: u32) -> AdminResult<()> {
    if classes > MAX_CLASSES_PER_DAY {
        return Err(AdminError::Validation(format!(
            "At most {} classes per teacher per day",
            MAX_CLASSES_PER_DAY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_register_teacher() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        let err = service.register_teacher(" marcos ").unwrap_err();
        assert!(err.is_duplicate());
        assert!(err.is_warning());
        assert_eq!(service.teachers().len(), 1);

        assert!(service.register_teacher("  ").unwrap_err().is_validation());
    }

    #[test]
    fn test_record_requires_registered_teacher() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        let err = service.record_classes("Ghost", day(2), 3).unwrap_err();
        assert!(err.is_not_found());
        assert!(service.entries().is_empty());
    }

    #[test]
    fn test_record_uses_roster_name() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        let entry = service.record_classes("marcos", day(2), 3).unwrap().unwrap();
        assert_eq!(entry.teacher, "Marcos");
        assert!(service.record_classes("Marcos", day(3), 0).unwrap().is_none());
        assert_eq!(service.entries().len(), 1);
    }

    #[test]
    fn test_resubmission_duplicates_rows() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        service.record_classes("Marcos", day(2), 3).unwrap();
        service.record_classes("Marcos", day(2), 3).unwrap();
        assert_eq!(service.entries().len(), 2);
    }

    #[test]
    fn test_set_day_is_idempotent() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        service.register_teacher("Julia").unwrap();
        service.record_classes("Marcos", day(2), 3).unwrap();
        service.record_classes("Marcos", day(2), 3).unwrap();
        service.record_classes("Julia", day(2), 1).unwrap();

        service.set_day("Marcos", day(2), 4).unwrap();
        let snapshot = service.entries().to_vec();
        service.set_day("Marcos", day(2), 4).unwrap();
        assert_eq!(service.entries(), snapshot.as_slice());

        let marcos: Vec<_> = service.entries().iter().filter(|e| e.is_for("Marcos")).collect();
        assert_eq!(marcos.len(), 1);
        assert_eq!(marcos[0].classes, 4);

        service.set_day("Marcos", day(2), 0).unwrap();
        assert_eq!(service.entries().len(), 1);
    }

    #[test]
    fn test_classes_per_day_capped() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        assert!(service.record_classes("Marcos", day(2), 4_000_000_000).unwrap_err().is_validation());
        assert!(service.entries().is_empty());

        service.record_classes("Marcos", day(2), 20).unwrap();
        assert!(service.record_classes("Marcos", day(2), 5).unwrap_err().is_validation());
        service.record_classes("Marcos", day(2), 4).unwrap();
        service.record_classes("Marcos", day(3), MAX_CLASSES_PER_DAY).unwrap();

        let before = service.entries().to_vec();
        assert!(service.set_day("Marcos", day(2), u32::MAX).unwrap_err().is_validation());
        assert_eq!(service.entries(), before.as_slice());
    }

    #[test]
    fn test_remove_teacher_keeps_entries() {
        let mut storage = Storage::new();
        let mut audit = AuditTrail::new();
        let mut service = TeachingService::new(&mut storage, &mut audit);

        service.register_teacher("Marcos").unwrap();
        let entry = service.record_classes("Marcos", day(2), 3).unwrap().unwrap();
        service.remove_teacher("Marcos").unwrap();

        assert!(service.teachers().is_empty());
        assert_eq!(service.entries().len(), 1);
        assert!(service.remove_teacher("Marcos").unwrap_err().is_not_found());

        service.delete(&entry.id.to_string()).unwrap();
        assert!(service.entries().is_empty());
    }
}
