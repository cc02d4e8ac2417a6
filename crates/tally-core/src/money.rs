//! # Money Module
//!
//! Provides the `Money` type for handling shared-expense amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Splitting a bill:                                                      │
//! │    100.00 / 3 = 33.333...  → balances drift by fractions of a cent     │
//! │    Every comparison then needs an epsilon (|x| < 0.01)                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10000 cents / 3 = 3333 cents (×3 = 9999 cents)                      │
//! │    We KNOW 1 cent is left over, and assign it explicitly               │
//! │    "Is this balance settled?" becomes `|balance| <= 1 cent`            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! // Create from cents (preferred)
//! let dinner = Money::from_cents(10000); // 100.00
//!
//! // Or parse a decimal string coming from a form or ledger file
//! let cab: Money = "60.5".parse().unwrap();
//! assert_eq!(cab.cents(), 6050);
//!
//! let total = dinner + cab;
//! assert_eq!(total.to_string(), "160.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
pub const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances are negative for debtors
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as cents**: `Money::from_cents(3334)` is `3334` in JSON
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Expense.amount ──► allocate() ──► Expense.split_between               │
/// │        │                                   │                            │
/// │        ▼                                   ▼                            │
/// │  Expense.paid_by ──────────► aggregate() ──► Balances                  │
/// │                                                 │                       │
/// │                                                 ▼                       │
/// │                                     plan() ──► Settlement.amount       │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted at the input boundary: 100 billion units.
    ///
    /// Any realistic ledger stays far below it, and sums of many such
    /// amounts still fit in an i64.
    pub const MAX_AMOUNT: Money = Money(10_000_000_000_000);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let share = Money::from_cents(3334); // 33.34
    /// assert_eq!(share.cents(), 3334);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let debt = Money::from_cents(-3333);
    /// assert_eq!(debt.abs().cents(), 3333);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Divides into `parts` equal shares, rounded to the nearest cent.
    ///
    /// Halves round away from zero, so 0.05 split two ways is 0.03 per
    /// share. The shares generally do not add back up to `self`; see
    /// [`crate::allocation::allocate`] for how the remainder is placed.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10000).rounded_share(3).cents(), 3333);
    /// assert_eq!(Money::from_cents(5).rounded_share(2).cents(), 3);
    /// ```
    ///
    /// `parts` must be non-zero.
    pub fn rounded_share(&self, parts: usize) -> Money {
        // i128 keeps 2 * amount from overflowing on extreme values
        let amount = self.0 as i128;
        let parts = parts as i128;
        let magnitude = (2 * amount.abs() + parts) / (2 * parts);
        let share = if amount < 0 { -magnitude } else { magnitude };
        Money(share as i64)
    }

    /// Adds two amounts, returning `None` on i64 overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// True when the magnitude does not exceed [`Money::MAX_AMOUNT`].
    #[inline]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Money::MAX_AMOUNT.0 as u64
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount with at most two fractional digits.
///
/// Accepts `"100"`, `"33.34"`, `"-5.5"`, `"+0.01"`. Rejects exponents,
/// thousands separators and a third fractional digit, since any of those
/// would need rounding this type refuses to guess at. Magnitudes above
/// [`Money::MAX_AMOUNT`] are rejected as well.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            Some(_) => (false, trimmed),
            None => return Err(invalid("must not be empty")),
        };

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (body, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("must contain digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("must be a plain decimal number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let overflow = || invalid("is too large");
        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        let cents = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(overflow)?;

        let money = Money(if negative { -cents } else { cents });
        if !money.is_within_limit() {
            return Err(overflow());
        }
        Ok(money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two places; currency symbols are a display concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a head count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(6666).to_string(), "66.66");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-3333).to_string(), "-33.33");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(1);
        assert_eq!(c.cents(), 1499);
    }

    #[test]
    fn test_sum() {
        let shares = [
            Money::from_cents(3334),
            Money::from_cents(3333),
            Money::from_cents(3333),
        ];
        let total: Money = shares.iter().sum();
        assert_eq!(total, Money::from_cents(10000));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let owed = Money::from_cents(1);
        assert!(owed.is_positive());

        let owes = Money::from_cents(-1);
        assert!(owes.is_negative());
        assert_eq!(owes.abs(), owed);
    }

    #[rstest]
    #[case::thirds(10000, 3, 3333)]
    #[case::exact(6000, 3, 2000)]
    #[case::half_rounds_up(5, 2, 3)]
    #[case::below_half(1, 3, 0)]
    #[case::sevenths(100, 7, 14)]
    #[case::negative_half(-5, 2, -3)]
    #[case::single(1234, 1, 1234)]
    fn test_rounded_share(#[case] cents: i64, #[case] parts: usize, #[case] expected: i64) {
        assert_eq!(Money::from_cents(cents).rounded_share(parts).cents(), expected);
    }

    #[rstest]
    #[case::integer("100", 10000)]
    #[case::two_places("33.34", 3334)]
    #[case::one_place("60.5", 6050)]
    #[case::leading_dot(".05", 5)]
    #[case::trailing_dot("7.", 700)]
    #[case::negative("-5.5", -550)]
    #[case::explicit_plus("+0.01", 1)]
    #[case::padded("  12.00 ", 1200)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(input.parse::<Money>().unwrap().cents(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::sign_only("-")]
    #[case::dot_only(".")]
    #[case::three_places("1.005")]
    #[case::exponent("1e3")]
    #[case::separator("1,000")]
    #[case::letters("ten")]
    #[case::double_sign("--1")]
    #[case::overflow("99999999999999999999")]
    #[case::above_limit("90000000000000000")]
    #[case::just_above_limit("100000000000.01")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = input.parse::<Money>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert_eq!("100000000000".parse::<Money>().unwrap(), Money::MAX_AMOUNT);
        assert_eq!("-100000000000".parse::<Money>().unwrap(), -Money::MAX_AMOUNT);
        assert!(Money::MAX_AMOUNT.is_within_limit());
        assert!(!Money::from_cents(i64::MIN).is_within_limit());
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(3334)).unwrap();
        assert_eq!(json, "3334");
        let back: Money = serde_json::from_str("-3333").unwrap();
        assert_eq!(back, Money::from_cents(-3333));
    }

    /// 100.00 split three ways loses a cent at the share level; the
    /// allocator hands it back to the first consumer.
    #[test]
    fn test_division_remainder_documented() {
        let total = Money::from_cents(10000);
        let share = total.rounded_share(3);
        let reconstructed = share * 3;
        assert_eq!(reconstructed.cents(), 9999);
        assert_eq!((total - reconstructed).cents(), 1);
    }
}
