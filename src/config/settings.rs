//! Session settings
//!
//! Settings are read once at startup from a JSON or YAML file (chosen by
//! extension) and otherwise fall back to the school's defaults. Records are
//! never written to disk; only a settings template can be saved.

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::AdminError;
use crate::models::Money;

/// Inclusive range of accepted birth years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

/// Dimensions of the weekly schedule grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Weekdays shown in the grid
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<Weekday>,

    /// First bookable hour (inclusive)
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,

    /// Last bookable hour (inclusive)
    #[serde(default = "default_last_hour")]
    pub last_hour: u32,
}

impl ScheduleSettings {
    pub fn has_weekday(&self, day: Weekday) -> bool {
        self.weekdays.contains(&day)
    }

    pub fn has_hour(&self, hour: u32) -> bool {
        hour >= self.first_hour && hour <= self.last_hour
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.first_hour..=self.last_hour
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            weekdays: default_weekdays(),
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
        }
    }
}

/// Settings for a record-keeping session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shared passphrase for the entry gate (compared as plain text)
    #[serde(default = "default_passphrase")]
    pub passphrase: String,

    /// Accepted birth years; `null` accepts any year
    #[serde(default = "default_birth_year_range")]
    pub birth_year_range: Option<YearRange>,

    /// Pay owed per class taught
    #[serde(default = "default_class_rate")]
    pub class_rate: Money,

    /// Days ahead of a plan due-date at which an alert is raised
    #[serde(default = "default_alert_window_days")]
    pub alert_window_days: i64,

    /// Preset expense labels offered every month
    #[serde(default = "default_standard_expenses")]
    pub standard_expenses: Vec<String>,

    /// Schedule grid dimensions
    #[serde(default)]
    pub schedule: ScheduleSettings,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_passphrase() -> String {
    "phison2025".to_string()
}

fn default_birth_year_range() -> Option<YearRange> {
    Some(YearRange {
        min: 1960,
        max: 2025,
    })
}

fn default_class_rate() -> Money {
    Money::from_cents(2200)
}

fn default_alert_window_days() -> i64 {
    7
}

fn default_standard_expenses() -> Vec<String> {
    [
        "Rent",
        "Water",
        "Internet",
        "Electricity",
        "Accounting",
        "Taxes",
        "Card Machine",
        "TV",
        "Teacher",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_weekdays() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

fn default_first_hour() -> u32 {
    5
}

fn default_last_hour() -> u32 {
    21
}

fn default_currency() -> String {
    "R$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            passphrase: default_passphrase(),
            birth_year_range: default_birth_year_range(),
            class_rate: default_class_rate(),
            alert_window_days: default_alert_window_days(),
            standard_expenses: default_standard_expenses(),
            schedule: ScheduleSettings::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from a file, or use the defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AdminError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a JSON or YAML file
    pub fn load(path: &Path) -> Result<Self, AdminError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AdminError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = if is_yaml(path) {
            serde_yaml::from_str(&contents).map_err(|e| {
                AdminError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            serde_json::from_str(&contents).map_err(|e| {
                AdminError::Config(format!("Failed to parse settings file: {}", e))
            })?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a JSON or YAML file
    pub fn save(&self, path: &Path) -> Result<(), AdminError> {
        let contents = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        std::fs::write(path, contents).map_err(|e| {
            AdminError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), AdminError> {
        if let Some(range) = self.birth_year_range {
            if range.min > range.max {
                return Err(AdminError::Config(format!(
                    "Birth year range is empty: {} > {}",
                    range.min, range.max
                )));
            }
        }

        if self.class_rate.is_negative() {
            return Err(AdminError::Config("Class rate cannot be negative".into()));
        }
        if self.class_rate > Money::MAX {
            return Err(AdminError::Config(format!(
                "Class rate is too large: {}",
                self.class_rate
            )));
        }

        if self.alert_window_days < 0 {
            return Err(AdminError::Config(
                "Alert window cannot be negative".into(),
            ));
        }

        let schedule = &self.schedule;
        if schedule.weekdays.is_empty() {
            return Err(AdminError::Config("Schedule needs at least one weekday".into()));
        }
        if schedule.first_hour > schedule.last_hour || schedule.last_hour > 23 {
            return Err(AdminError::Config(format!(
                "Invalid schedule hours: {}-{}",
                schedule.first_hour, schedule.last_hour
            )));
        }

        Ok(())
    }

    /// Check a birth year against the configured range
    pub fn accepts_birth_year(&self, year: i32) -> bool {
        self.birth_year_range
            .map(|range| range.contains(year))
            .unwrap_or(true)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.passphrase, "phison2025");
        assert_eq!(settings.class_rate, Money::from_cents(2200));
        assert_eq!(settings.standard_expenses.len(), 9);
        assert_eq!(settings.schedule.weekdays.len(), 5);
        assert_eq!(settings.schedule.hours().count(), 17);
        assert!(settings.accepts_birth_year(1960));
        assert!(settings.accepts_birth_year(2025));
        assert!(!settings.accepts_birth_year(1959));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unbounded_birth_years() {
        let settings = Settings {
            birth_year_range: None,
            ..Settings::default()
        };
        assert!(settings.accepts_birth_year(1900));
        assert!(settings.accepts_birth_year(2030));
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.passphrase = "secret".into();
        settings.class_rate = Money::from_cents(2500);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_partial_yaml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        std::fs::write(
            &path,
            "passphrase: escola\nbirth_year_range: null\nschedule:\n  weekdays: [Mon, Wed]\n",
        )
        .unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.passphrase, "escola");
        assert_eq!(loaded.birth_year_range, None);
        assert_eq!(loaded.schedule.weekdays, vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(loaded.schedule.first_hour, 5);
        assert_eq!(loaded.class_rate, Money::from_cents(2200));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"birth_year_range": {"min": 2000, "max": 1990}}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
    }

    #[test]
    fn test_oversized_class_rate_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"class_rate": 9223372036854775807}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("Class rate is too large"));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, AdminError::Io(_)));
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}
