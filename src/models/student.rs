//! Student model
//!
//! Represents an enrolled student with contact details, plan due-date and
//! an optional monthly fee and status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::dates::{self, Birthday};

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl StudentStatus {
    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" | "ativo" => Some(Self::Active),
            "inactive" | "not_active" | "nao ativo" | "não ativo" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// An enrolled student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Full name, the student's identity within the roster
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Birth date; the birthday is always derived from it
    birth_date: NaiveDate,

    birthday: Birthday,

    /// National ID (CPF)
    #[serde(default)]
    pub national_id: String,

    #[serde(default)]
    pub phone: String,

    /// When the current plan must be renewed
    pub plan_due: NaiveDate,

    pub monthly_fee: Option<Money>,

    pub status: Option<StudentStatus>,
}

impl Student {
    /// Create a new student with the required fields
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, plan_due: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            birth_date,
            birthday: Birthday::of(birth_date),
            national_id: String::new(),
            phone: String::new(),
            plan_due,
            monthly_fee: None,
            status: None,
        }
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn birthday(&self) -> Birthday {
        self.birthday
    }

    /// Change the birth date, recomputing the birthday
    pub fn set_birth_date(&mut self, birth_date: NaiveDate) {
        self.birth_date = birth_date;
        self.birthday = Birthday::of(birth_date);
    }

    /// Whether the student's birthday falls in the given month
    pub fn has_birthday_in(&self, month: u32) -> bool {
        dates::month_of(self.birth_date) == month
    }

    /// Validate the student
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }

        let length = self.name.chars().count();
        if length > 100 {
            return Err(StudentValidationError::NameTooLong(length));
        }

        if let Some(fee) = self.monthly_fee {
            if fee.is_negative() {
                return Err(StudentValidationError::NegativeFee(fee));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for students
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeFee(Money),
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Student name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Student name too long ({} chars, max 100)", len)
            }
            Self::NegativeFee(fee) => write!(f, "Monthly fee cannot be negative: {}", fee),
        }
    }
}

impl std::error::Error for StudentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_student_derives_birthday() {
        let student = Student::new("Ana Souza", ymd(1995, 1, 20), ymd(2025, 7, 1));
        assert_eq!(student.birthday(), Birthday { day: 20, month: 1 });
        assert!(student.has_birthday_in(1));
        assert!(!student.has_birthday_in(3));
        assert!(student.status.is_none());
    }

    #[test]
    fn test_set_birth_date_recomputes_birthday() {
        let mut student = Student::new("Ana", ymd(1995, 1, 20), ymd(2025, 7, 1));
        student.set_birth_date(ymd(1990, 3, 5));
        assert_eq!(student.birthday().to_string(), "05/03");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(StudentStatus::parse("ACTIVE"), Some(StudentStatus::Active));
        assert_eq!(StudentStatus::parse("ativo"), Some(StudentStatus::Active));
        assert_eq!(StudentStatus::parse("inactive"), Some(StudentStatus::Inactive));
        assert_eq!(StudentStatus::parse("maybe"), None);
    }

    #[test]
    fn test_validation() {
        let mut student = Student::new("Valid", ymd(1995, 1, 20), ymd(2025, 7, 1));
        assert!(student.validate().is_ok());

        student.monthly_fee = Some(Money::from_cents(-100));
        assert!(matches!(
            student.validate(),
            Err(StudentValidationError::NegativeFee(_))
        ));

        student.monthly_fee = None;
        student.name = "  ".into();
        assert_eq!(student.validate(), Err(StudentValidationError::EmptyName));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut student = Student::new("Conceição".repeat(10), ymd(1995, 1, 20), ymd(2025, 7, 1));
        assert!(student.name.len() > 100);
        assert!(student.validate().is_ok());

        student.name = "ã".repeat(101);
        assert_eq!(student.validate(), Err(StudentValidationError::NameTooLong(101)));
    }

    #[test]
    fn test_serialization() {
        let mut student = Student::new("Ana", ymd(1995, 1, 20), ymd(2025, 7, 1));
        student.status = Some(StudentStatus::Inactive);
        let json = serde_json::to_string(&student).unwrap();
        assert!(json.contains("\"INACTIVE\""));

        let deserialized: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(student, deserialized);
    }
}
