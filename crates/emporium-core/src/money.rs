//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart total is a sum over every entry. With f64, a cart of ten        │
//! │  $0.10 items does not total $1.00.                                      │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal (rust_decimal)                           │
//! │    0.1 + 0.2 = 0.3 exactly                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use emporium_core::money::Money;
//!
//! let price = Money::from_minor(1099); // $10.99
//! let total = price + Money::from_major(5); // $15.99
//! assert_eq!(total, Money::from_minor(1599));
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(10.99); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units (dollars, not cents).
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 representation, any scale
/// - **Transparent serde**: serialized as a decimal string, e.g. `"10.99"`
/// - **No currency**: the shop trades in a single currency
///
/// ## Where Money is Used
/// ```text
/// Item.price ──► Cart entry ──► Cart.total ──► UserOrder.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a whole-unit amount.
    ///
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10).to_string(), "$10.00");
    /// ```
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Creates an amount from minor units (cents).
    ///
    /// ```rust
    /// use emporium_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, 2))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with two decimal places.
///
/// ## Note
/// This is for logs and debugging. Clients receive the raw decimal string.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

/// Parses the plain decimal form used in storage, e.g. `"10.99"`.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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

    #[test]
    fn test_from_minor_and_major_agree() {
        assert_eq!(Money::from_minor(1000), Money::from_major(10));
        assert_eq!(Money::from_minor(1099).amount(), Decimal::new(1099, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "$10.99");
        assert_eq!(Money::from_major(5).to_string(), "$5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_tenths_sum_exactly() {
        let dime = Money::from_minor(10);
        let total: Money = std::iter::repeat(dime).take(10).sum();
        assert_eq!(total, Money::from_major(1));

        let a: Money = "0.1".parse().unwrap();
        let b: Money = "0.2".parse().unwrap();
        assert_eq!(a + b, "0.3".parse().unwrap());
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Money = Vec::<Money>::new().iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ten dollars".parse::<Money>().is_err());
        assert_eq!(" 12.50 ".parse::<Money>().unwrap(), Money::from_minor(1250));
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_minor(1099)).unwrap();
        assert_eq!(json, "\"10.99\"");

        let back: Money = serde_json::from_str("\"10.99\"").unwrap();
        assert_eq!(back, Money::from_minor(1099));
    }

    #[test]
    fn test_negative_checks() {
        assert!(Money::from_minor(-1).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(!Money::from_minor(1).is_negative());
    }
}
