//! Weekly schedule service

use chrono::Weekday;
use serde_json::json;
use tracing::info;

use crate::audit::{AuditEntry, AuditTrail, EntityType};
use crate::config::Settings;
use crate::error::{AdminError, AdminResult};
use crate::models::schedule::weekday_name;
use crate::models::SlotKey;
use crate::storage::Storage;

/// One hour of the schedule grid, with a cell per configured weekday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub hour: u32,
    pub cells: Vec<String>,
}

/// Service for the weekly class schedule
pub struct ScheduleService<'a> {
    storage: &'a mut Storage,
    audit: &'a mut AuditTrail,
    settings: &'a Settings,
}

impl<'a> ScheduleService<'a> {
    pub fn new(storage: &'a mut Storage, audit: &'a mut AuditTrail, settings: &'a Settings) -> Self {
        Self {
            storage,
            audit,
            settings,
        }
    }

    /// Set the text of one slot, returning what it held before
    ///
    /// Empty text clears the slot.
    pub fn set_slot(&mut self, day: Weekday, hour: u32, text: &str) -> AdminResult<Option<String>> {
        let key = self.slot_key(day, hour)?;
        let previous = self.storage.schedule.set(key, text);
        let current = self.storage.schedule.get(key).map(str::to_string);

        let before = previous.as_ref().map(|t| json!({"slot": key.to_string(), "text": t}));
        let after = current.as_ref().map(|t| json!({"slot": key.to_string(), "text": t}));
        let entry = match (&before, &after) {
            (None, Some(after)) => Some(AuditEntry::create(
                EntityType::ScheduleSlot,
                key.to_string(),
                None,
                after,
            )),
            (Some(before), Some(after)) if before != after => Some(AuditEntry::update(
                EntityType::ScheduleSlot,
                key.to_string(),
                None,
                before,
                after,
            )),
            (Some(before), None) => Some(AuditEntry::delete(
                EntityType::ScheduleSlot,
                key.to_string(),
                None,
                before,
            )),
            _ => None,
        };
        if let Some(entry) = entry {
            self.audit.record(entry);
            info!(slot = %key, cleared = current.is_none(), "schedule slot updated");
        }

        Ok(previous)
    }

    pub fn slot(&self, day: Weekday, hour: u32) -> AdminResult<Option<&str>> {
        let key = self.slot_key(day, hour)?;
        Ok(self.storage.schedule.get(key))
    }

    /// Empty the whole grid, returning how many slots were filled
    pub fn clear(&mut self) -> usize {
        let count = self.storage.schedule.filled_count();
        if count > 0 {
            let filled: Vec<(SlotKey, String)> = self
                .storage
                .schedule
                .filled()
                .map(|(k, v)| (*k, v.clone()))
                .collect();
            for (key, text) in filled {
                self.audit.record(AuditEntry::delete(
                    EntityType::ScheduleSlot,
                    key.to_string(),
                    None,
                    &json!({"slot": key.to_string(), "text": text}),
                ));
            }
            self.storage.schedule.clear();
            info!(count, "schedule cleared");
        }
        count
    }

    /// Weekday headers for the grid
    pub fn weekdays(&self) -> Vec<&'static str> {
        self.settings
            .schedule
            .weekdays
            .iter()
            .map(|d| weekday_name(*d))
            .collect()
    }

    /// The full grid: one row per configured hour
    pub fn grid(&self) -> Vec<GridRow> {
        let schedule = &self.settings.schedule;
        schedule
            .hours()
            .map(|hour| GridRow {
                hour,
                cells: schedule
                    .weekdays
                    .iter()
                    .map(|day| {
                        self.storage
                            .schedule
                            .get(SlotKey::new(*day, hour))
                            .unwrap_or_default()
                            .to_string()
                    })
                    .collect(),
            })
            .collect()
    }

    fn slot_key(&self, day: Weekday, hour: u32) -> AdminResult<SlotKey> {
        let schedule = &self.settings.schedule;
        if !schedule.has_weekday(day) {
            return Err(AdminError::Validation(format!(
                "{} is not a class day",
                weekday_name(day)
            )));
        }
        if !schedule.has_hour(hour) {
            return Err(AdminError::Validation(format!(
                "Hour {:02}:00 is outside the schedule ({:02}:00-{:02}:00)",
                hour, schedule.first_hour, schedule.last_hour
            )));
        }
        Ok(SlotKey::new(day, hour))
    }
}
