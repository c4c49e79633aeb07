//! Per-session state
//!
//! A `Session` owns everything one user works with: the settings, the
//! record store, the audit trail, the passphrase gate and the currently
//! selected section. Nothing outlives the process.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::AuditTrail;
use crate::config::Settings;
use crate::dates::{self, YearMonth};
use crate::error::{AdminError, AdminResult};
use crate::export::{self, ExportFormat};
use crate::reports::{BirthdayRoster, CashSummary, TeachingLoadSummary, TuitionAlerts};
use crate::services::{
    CashService, ExpenseService, ScheduleService, StudentService, TeachingService, TuitionService,
};
use crate::storage::{normalize_name, Storage};

/// Navigation sections of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    RegisterStudents,
    StudentList,
    Tuition,
    Schedule,
    MonthlyExpenses,
    DailyCash,
    TeachingLoad,
}

impl Section {
    /// Menu order
    pub const ALL: [Section; 7] = [
        Self::RegisterStudents,
        Self::StudentList,
        Self::Tuition,
        Self::Schedule,
        Self::MonthlyExpenses,
        Self::DailyCash,
        Self::TeachingLoad,
    ];

    /// Short name typed after `go`
    pub fn slug(&self) -> &'static str {
        match self {
            Self::RegisterStudents => "register",
            Self::StudentList => "students",
            Self::Tuition => "tuition",
            Self::Schedule => "schedule",
            Self::MonthlyExpenses => "expenses",
            Self::DailyCash => "cash",
            Self::TeachingLoad => "teaching",
        }
    }

    /// Parse a section from its menu number, slug or full title
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied();
        }
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|section| section.slug() == lower || section.to_string().to_lowercase() == lower)
            .copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisterStudents => write!(f, "Register Students"),
            Self::StudentList => write!(f, "Student List"),
            Self::Tuition => write!(f, "Tuition"),
            Self::Schedule => write!(f, "Schedule"),
            Self::MonthlyExpenses => write!(f, "Monthly Expenses"),
            Self::DailyCash => write!(f, "Daily Cash Control"),
            Self::TeachingLoad => write!(f, "Teaching-Load Control"),
        }
    }
}

/// State of one record-keeping session
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    storage: Storage,
    audit: AuditTrail,
    authenticated: bool,
    section: Section,
    today: Option<NaiveDate>,
}

impl Session {
    /// Start a locked, empty session
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            storage: Storage::new(),
            audit: AuditTrail::new(),
            authenticated: false,
            section: Section::RegisterStudents,
            today: None,
        }
    }

    /// Open the gate if the passphrase matches exactly
    pub fn unlock(&mut self, passphrase: &str) -> bool {
        if passphrase == self.settings.passphrase {
            self.authenticated = true;
            info!("session unlocked");
        } else {
            warn!("wrong passphrase");
        }
        self.authenticated
    }

    pub fn lock(&mut self) {
        self.authenticated = false;
        info!("session locked");
    }

    pub fn is_unlocked(&self) -> bool {
        self.authenticated
    }

    fn require_unlocked(&self) -> AdminResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AdminError::Locked("enter the passphrase first".into()))
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pin "today" for reports (used for reproducible runs)
    pub fn set_today(&mut self, date: NaiveDate) {
        self.today = Some(date);
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(dates::today)
    }

    pub fn current_section(&self) -> Section {
        self.section
    }

    pub fn navigate(&mut self, section: Section) -> AdminResult<()> {
        self.require_unlocked()?;
        self.section = section;
        info!(%section, "navigated");
        Ok(())
    }

    pub fn storage(&self) -> AdminResult<&Storage> {
        self.require_unlocked()?;
        Ok(&self.storage)
    }

    pub fn storage_mut(&mut self) -> AdminResult<&mut Storage> {
        self.require_unlocked()?;
        Ok(&mut self.storage)
    }

    pub fn audit(&self) -> AdminResult<&AuditTrail> {
        self.require_unlocked()?;
        Ok(&self.audit)
    }

    pub fn students(&mut self) -> AdminResult<StudentService<'_>> {
        self.require_unlocked()?;
        Ok(StudentService::new(
            &mut self.storage,
            &mut self.audit,
            &self.settings,
        ))
    }

    pub fn expenses(&mut self) -> AdminResult<ExpenseService<'_>> {
        self.require_unlocked()?;
        Ok(ExpenseService::new(
            &mut self.storage,
            &mut self.audit,
            &self.settings,
        ))
    }

    pub fn cash(&mut self) -> AdminResult<CashService<'_>> {
        self.require_unlocked()?;
        Ok(CashService::new(&mut self.storage, &mut self.audit))
    }

    pub fn teaching(&mut self) -> AdminResult<TeachingService<'_>> {
        self.require_unlocked()?;
        Ok(TeachingService::new(&mut self.storage, &mut self.audit))
    }

    pub fn tuition(&mut self) -> AdminResult<TuitionService<'_>> {
        self.require_unlocked()?;
        Ok(TuitionService::new(&mut self.storage, &mut self.audit))
    }

    pub fn schedule(&mut self) -> AdminResult<ScheduleService<'_>> {
        self.require_unlocked()?;
        Ok(ScheduleService::new(
            &mut self.storage,
            &mut self.audit,
            &self.settings,
        ))
    }

    pub fn tuition_alerts(&self) -> AdminResult<TuitionAlerts> {
        let storage = self.storage()?;
        Ok(TuitionAlerts::generate_with_window(
            storage.students.list(),
            self.today(),
            self.settings.alert_window_days,
        ))
    }

    pub fn birthdays(&self) -> AdminResult<BirthdayRoster> {
        let storage = self.storage()?;
        Ok(BirthdayRoster::generate(storage.students.list(), self.today()))
    }

    pub fn cash_summary(&self, month: YearMonth) -> AdminResult<CashSummary> {
        let storage = self.storage()?;
        Ok(CashSummary::generate(storage.cash.list(), month))
    }

    /// Teaching-load pay for a teacher, resolved against the roster
    ///
    /// A teacher removed from the roster is still found through the
    /// classes recorded under their name.
    pub fn teaching_load(&self, teacher: &str, month: YearMonth) -> AdminResult<TeachingLoadSummary> {
        let storage = self.storage()?;
        let wanted = normalize_name(teacher);
        let name = storage
            .teachers
            .find_by_name(teacher)
            .map(|t| t.name.clone())
            .or_else(|| {
                storage
                    .teaching_loads
                    .iter()
                    .find(|e| normalize_name(&e.teacher) == wanted)
                    .map(|e| e.teacher.clone())
            })
            .ok_or_else(|| AdminError::teacher_not_found(teacher.trim()))?;
        TeachingLoadSummary::generate(
            storage.teaching_loads.list(),
            &name,
            month,
            self.settings.class_rate,
        )
    }

    /// Export the student roster
    pub fn export_students(&self, path: &Path, format: ExportFormat) -> AdminResult<usize> {
        let storage = self.storage()?;
        export::write_file(path, storage.students.list(), format)
    }
}
