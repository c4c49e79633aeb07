//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so fees, expenses and cash
//! totals are summed exactly. Rounding to two decimals only happens when a
//! value is displayed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single record may carry (R$ 9.999.999.999,99)
    pub const MAX: Money = Money(999_999_999_999);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use phison_admin::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a whole count (e.g. classes taught times the per-class rate)
    ///
    /// `None` when the product does not fit.
    pub fn checked_times(&self, count: u64) -> Option<Self> {
        let count = i64::try_from(count).ok()?;
        self.0.checked_mul(count).map(Self)
    }

    /// Amount as a float, for spreadsheet cells only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "10,50", "-10.50", "R$10.50", "10" and
    /// "1.234,56". When a comma is present it is the decimal separator and
    /// dots before it group thousands. More than two fractional digits are
    /// rejected rather than rounded, as is anything above [`Money::MAX`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        // Handle negative sign at start
        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Remove currency symbol if present
        let s = s.strip_prefix("R$").unwrap_or(s).trim_start();
        let s = s.strip_prefix('$').unwrap_or(s);

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        if s.is_empty() {
            return Err(invalid());
        }

        let (units, fraction) = match s.rsplit_once(',') {
            Some((units, fraction)) => (strip_thousands(units).ok_or_else(invalid)?, Some(fraction)),
            None => match s.split_once('.') {
                Some((units, fraction)) => (units.to_string(), Some(fraction)),
                None => (s.to_string(), None),
            },
        };

        let fraction = fraction.unwrap_or("");
        if units.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if units.is_empty() {
            0
        } else if units.bytes().all(|b| b.is_ascii_digit()) {
            units
                .parse()
                .map_err(|_| MoneyParseError::TooLarge(s.to_string()))?
        } else {
            return Err(invalid());
        };

        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => parse_digits(fraction).ok_or_else(invalid)? * 10,
            2 => parse_digits(fraction).ok_or_else(invalid)?,
            _ if fraction.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(MoneyParseError::TooPrecise(s.to_string()))
            }
            _ => return Err(invalid()),
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= Self::MAX.0)
            .ok_or_else(|| MoneyParseError::TooLarge(s.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.units().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Drop `.` thousands separators from the integer part of "1.234.567,89"
fn strip_thousands(units: &str) -> Option<String> {
    let mut groups = units.split('.');
    let first = groups.next().unwrap_or("");
    let mut digits = first.to_string();
    for group in groups {
        if first.is_empty() || first.len() > 3 || group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    digits.bytes().all(|b| b.is_ascii_digit()).then_some(digits)
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Money amount has more than two decimals: {}", s)
            }
            MoneyParseError::TooLarge(s) => write!(f, "Money amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
