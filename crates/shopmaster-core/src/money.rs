//! # Money Module
//!
//! Monetary values as integer poisha (1 taka = 100 poisha).
//!
//! Every amount in the system flows through this type: product prices,
//! sale totals, purchase costs, refunds, rent invoices, cash balances.
//! The frontend converts to a display string; the engine never touches
//! floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in poisha (smallest currency unit).
///
/// Signed so that derived balances may go negative (a session that spends
/// more on purchases than it took in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a value from poisha.
    ///
    /// ## Example
    /// ```rust
    /// use shopmaster_core::money::Money;
    ///
    /// let price = Money::from_poisha(5000); // ৳50.00
    /// assert_eq!(price.poisha(), 5000);
    /// ```
    #[inline]
    pub const fn from_poisha(poisha: i64) -> Self {
        Money(poisha)
    }

    /// Creates a value from whole taka.
    #[inline]
    pub const fn from_taka(taka: i64) -> Self {
        Money(taka * 100)
    }

    /// Returns the value in poisha.
    #[inline]
    pub const fn poisha(&self) -> i64 {
        self.0
    }

    /// Returns the whole-taka portion.
    #[inline]
    pub const fn taka(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the poisha portion (always 0-99).
    #[inline]
    pub const fn poisha_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a quantity (line total = unit price x quantity).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides a total cost across a quantity to get the unit cost.
    ///
    /// Truncating integer division: ৳1.00 split across 3 units is 33 poisha
    /// each. The remainder stays in the recorded total, never in the unit
    /// cost.
    ///
    /// Invariant: `quantity > 0` (callers validate before dividing).
    #[inline]
    pub const fn unit_cost(&self, quantity: i64) -> Self {
        Money(self.0 / quantity)
    }

    /// Adds a markup given in basis points (2000 bps = +20%).
    ///
    /// ## Example
    /// ```rust
    /// use shopmaster_core::money::Money;
    ///
    /// let cost = Money::from_poisha(4000); // ৳40.00
    /// assert_eq!(cost.with_markup_bps(2000).poisha(), 4800); // ৳48.00
    /// ```
    pub fn with_markup_bps(&self, bps: u32) -> Money {
        // i128 keeps large amounts from overflowing; +5000 rounds the
        // half-poisha case.
        let markup = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(self.0 + markup as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug/log formatting. The frontend owns localized display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}৳{}.{:02}", sign, self.taka().abs(), self.poisha_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing ledger columns (`sales.iter().map(|s| s.total_amount).sum()`).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_poisha() {
        let money = Money::from_poisha(5099);
        assert_eq!(money.poisha(), 5099);
        assert_eq!(money.taka(), 50);
        assert_eq!(money.poisha_part(), 99);
    }

    #[test]
    fn test_from_taka() {
        assert_eq!(Money::from_taka(50).poisha(), 5000);
        assert_eq!(Money::from_taka(-5).poisha(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_poisha(5099)), "৳50.99");
        assert_eq!(format!("{}", Money::from_poisha(500)), "৳5.00");
        assert_eq!(format!("{}", Money::from_poisha(-550)), "-৳5.50");
        assert_eq!(format!("{}", Money::from_poisha(0)), "৳0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_taka(10);
        let b = Money::from_taka(5);

        assert_eq!((a + b).poisha(), 1500);
        assert_eq!((a - b).poisha(), 500);
        assert_eq!((a * 3).poisha(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_taka(150), Money::from_taka(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_taka(200));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_unit_cost_truncates() {
        // ৳4.00 total over 3 units -> 133 poisha per unit, remainder dropped
        let cost = Money::from_poisha(400);
        assert_eq!(cost.unit_cost(3).poisha(), 133);

        // Even split
        assert_eq!(Money::from_taka(400).unit_cost(10), Money::from_taka(40));
    }

    #[test]
    fn test_markup() {
        // Auto-created products price at cost +20%
        assert_eq!(
            Money::from_taka(40).with_markup_bps(2000),
            Money::from_taka(48)
        );
        // Rounding of the half-poisha case
        assert_eq!(Money::from_poisha(25).with_markup_bps(2000).poisha(), 30);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_poisha(1).is_positive());
        assert!(Money::from_poisha(-1).is_negative());
        assert_eq!(Money::from_poisha(-550).abs().poisha(), 550);
    }
}
