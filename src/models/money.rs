//! Money type for representing currency amounts
//!
//! Amounts keep the full precision of the text they were read from. Rounding
//! to two fractional digits happens only when an amount is rendered.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// A monetary amount with exact decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use chat_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parse a numeric token such as `15`, `12.5` or `12,50`
    ///
    /// A comma is read as the decimal separator. Fraction digits beyond what
    /// a `Decimal` can hold are dropped, and a whole part too large for it
    /// saturates at `Decimal::MAX`. Returns `None` when the token is not
    /// digits with at most one separator.
    ///
    /// ```
    /// use chat_ledger::models::Money;
    /// assert_eq!(Money::from_numeric_token("12,5"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_numeric_token("abc"), None);
    /// ```
    pub fn from_numeric_token(token: &str) -> Option<Self> {
        let normalized = token.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return None;
        }

        let whole = match whole.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };

        let mut fraction = fraction;
        loop {
            let candidate = if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            };

            if let Ok(value) = Decimal::from_str(&candidate) {
                return Some(Self(value));
            }
            if fraction.is_empty() {
                return Some(Self(Decimal::MAX));
            }
            fraction = &fraction[..fraction.len() - 1];
        }
    }

    /// Format as `<symbol> <amount>` with two fractional digits
    ///
    /// The sign follows the symbol, e.g. `R$ -25.00`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", symbol, self.to_decimal_string())
    }

    /// Plain decimal rendering rounded to two fractional digits
    pub fn to_decimal_string(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            // drop the sign of amounts like -0.001
            rounded = Decimal::ZERO;
        }
        rounded.rescale(2);
        rounded.to_string()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> Option<Decimal> {
        Money::from_numeric_token(s).map(|m| m.0)
    }

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.0, Decimal::new(105, 1));
        assert_eq!(m, Money::from(Decimal::new(1050, 2)));
    }

    #[test]
    fn test_numeric_tokens() {
        assert_eq!(token("25"), Some(Decimal::new(25, 0)));
        assert_eq!(token("12.5"), Some(Decimal::new(125, 1)));
        assert_eq!(token("12,50"), Some(Decimal::new(1250, 2)));
        assert_eq!(token("0.05"), Some(Decimal::new(5, 2)));
        assert_eq!(token("007"), Some(Decimal::new(7, 0)));
        // Thousand separators read as a decimal point
        assert_eq!(token("1.500"), Some(Decimal::new(15, 1)));
    }

    #[test]
    fn test_sub_cent_precision_kept() {
        assert_eq!(token("0.004"), Some(Decimal::new(4, 3)));
        assert_eq!(token("1,999"), Some(Decimal::new(1999, 3)));
        assert!(Money::from_numeric_token("0.004").unwrap().is_positive());
    }

    #[test]
    fn test_oversized_tokens() {
        assert_eq!(token("99999999999999999999"), Decimal::from_str("99999999999999999999").ok());
        assert_eq!(token("123456789012345678901234567890"), Some(Decimal::MAX));

        let long_fraction = format!("1.{}", "3".repeat(40));
        let value = token(&long_fraction).unwrap();
        assert!(value > Decimal::ONE && value < Decimal::new(2, 0));
    }

    #[test]
    fn test_rejected_tokens() {
        assert_eq!(Money::from_numeric_token(""), None);
        assert_eq!(Money::from_numeric_token(".5"), None);
        assert_eq!(Money::from_numeric_token("1.2.3"), None);
        assert_eq!(Money::from_numeric_token("-5"), None);
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(2500).format_with_symbol("R$"), "R$ 25.00");
        assert_eq!(Money::from_cents(-2500).format_with_symbol("R$"), "R$ -25.00");
        assert_eq!(Money::from_cents(-5).format_with_symbol("R$"), "R$ -0.05");
        assert_eq!(Money::zero().format_with_symbol("$"), "$ 0.00");
    }

    #[test]
    fn test_rounding_only_on_display() {
        assert_eq!(Money::from(Decimal::new(4, 3)).to_string(), "0.00");
        assert_eq!(Money::from(Decimal::new(5, 3)).to_string(), "0.01");
        assert_eq!(Money::from(Decimal::new(1994, 3)).to_string(), "1.99");
        assert_eq!(Money::from(Decimal::new(-1, 3)).to_string(), "0.00");

        let total: Money = (0..10).map(|_| Money::from(Decimal::new(5, 3))).sum();
        assert_eq!(total, Money::from(Decimal::new(5, 2)));
        assert_eq!(total.to_string(), "0.05");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(70000).to_string(), "700.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>(), Money::from_cents(2000));
    }

    #[test]
    fn test_saturating_sum() {
        let big = Money::from(Decimal::MAX);
        assert_eq!(big + Money::from_cents(1), big);
    }
}
