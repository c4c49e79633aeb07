//! Tuition payments
//!
//! Records a monthly payment made by a student against a due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PaymentId;
use super::money::Money;

/// How a tuition payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Pix,
    CreditCard,
    DebitCard,
    BankSlip,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        Self::Cash,
        Self::Pix,
        Self::CreditCard,
        Self::DebitCard,
        Self::BankSlip,
    ];

    /// Parse payment method from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "cash" | "dinheiro" => Some(Self::Cash),
            "pix" => Some(Self::Pix),
            "credit" | "credit_card" => Some(Self::CreditCard),
            "debit" | "debit_card" => Some(Self::DebitCard),
            "slip" | "bank_slip" | "boleto" => Some(Self::BankSlip),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Pix => write!(f, "Pix"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::DebitCard => write!(f, "Debit Card"),
            Self::BankSlip => write!(f, "Bank Slip"),
        }
    }
}

/// A tuition payment made by a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuitionPayment {
    pub id: PaymentId,
    /// Name of the paying student (weak reference into the roster)
    pub student: String,
    pub due_date: NaiveDate,
    pub paid_on: NaiveDate,
    pub amount: Money,
    pub method: PaymentMethod,
}

impl TuitionPayment {
    pub fn new(
        student: impl Into<String>,
        due_date: NaiveDate,
        paid_on: NaiveDate,
        amount: Money,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            student: student.into(),
            due_date,
            paid_on,
            amount,
            method,
        }
    }

    /// Whether the payment arrived after its due date
    pub fn is_late(&self) -> bool {
        self.paid_on > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!(PaymentMethod::parse("PIX"), Some(PaymentMethod::Pix));
        assert_eq!(PaymentMethod::parse("credit-card"), Some(PaymentMethod::CreditCard));
        assert_eq!(PaymentMethod::parse("Debit Card"), Some(PaymentMethod::DebitCard));
        assert_eq!(PaymentMethod::parse("boleto"), Some(PaymentMethod::BankSlip));
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_is_late() {
        let due = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let paid = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let payment = TuitionPayment::new("Ana", due, paid, Money::from_cents(15000), PaymentMethod::Pix);
        assert!(payment.is_late());
    }
}
