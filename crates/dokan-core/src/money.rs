//! # Money Module
//!
//! Provides the `Taka` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Storefront prices are whole-taka amounts (৳500, ৳1,000), so we        │
//! │  store them as i64 directly. Subtotals, delivery fees and discounts    │
//! │  stay exact however many line items the cart holds.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dokan_core::money::Taka;
//!
//! let price = Taka::new(1099); // ৳1,099
//!
//! // Arithmetic operations
//! let doubled = price * 2;               // ৳2,198
//! let total = price + Taka::new(500);    // ৳1,599
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Taka Type
// =============================================================================

/// A monetary value in whole Bangladeshi taka.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Taka(i64);

impl Taka {
    /// Creates a Taka value from a whole-taka amount.
    ///
    /// ## Example
    /// ```rust
    /// use dokan_core::money::Taka;
    ///
    /// let price = Taka::new(1099);
    /// assert_eq!(price.amount(), 1099);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Taka(amount)
    }

    /// Returns the raw whole-taka amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero taka.
    #[inline]
    pub const fn zero() -> Self {
        Taka(0)
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

    /// Clamps negative amounts up to zero.
    ///
    /// A promotional discount larger than the order value must not produce
    /// a negative amount due.
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Taka(0)
        } else {
            *self
        }
    }

    /// Multiplies by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dokan_core::money::Taka;
    ///
    /// let unit_price = Taka::new(299);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.amount(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Taka(self.0 * qty)
    }

    /// Computes the whole-percent saving of `self` relative to `original`.
    ///
    /// Uses round-half-up integer math so ৳800 → ৳600 reports 25%, and
    /// ৳1,000 → ৳667 reports 33%. Returns 0 when `original` is not
    /// positive (malformed upstream data must not divide by zero).
    ///
    /// ## Example
    /// ```rust
    /// use dokan_core::money::Taka;
    ///
    /// let selling = Taka::new(800);
    /// let offer = Taka::new(600);
    /// assert_eq!(offer.percent_off(selling), 25);
    /// ```
    pub fn percent_off(&self, original: Taka) -> u8 {
        if original.0 <= 0 {
            return 0;
        }
        let saved = (original.0 - self.0).max(0) as i128;
        // round((saved / original) * 100)
        let pct = (saved * 100 + original.0 as i128 / 2) / original.0 as i128;
        pct.min(100) as u8
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Taka {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}৳{}", sign, self.0.abs())
    }
}

/// Default taka is zero.
impl Default for Taka {
    fn default() -> Self {
        Taka::zero()
    }
}

/// Addition of two Taka values.
impl Add for Taka {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Taka(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Taka {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Taka values.
impl Sub for Taka {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Taka(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Taka {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Taka {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Taka(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Taka {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Taka(self.0 * qty)
    }
}

impl From<i64> for Taka {
    fn from(amount: i64) -> Self {
        Taka(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Taka::new(1099);
        assert_eq!(money.amount(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Taka::new(1099)), "৳1099");
        assert_eq!(format!("{}", Taka::new(-550)), "-৳550");
        assert_eq!(format!("{}", Taka::new(0)), "৳0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Taka::new(1000);
        let b = Taka::new(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        let result: Taka = a * 3;
        assert_eq!(result.amount(), 3000);
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Taka::new(-40).floor_zero().amount(), 0);
        assert_eq!(Taka::new(40).floor_zero().amount(), 40);
    }

    #[test]
    fn test_percent_off_exact() {
        // ৳800 selling, ৳600 offer = 25% off
        assert_eq!(Taka::new(600).percent_off(Taka::new(800)), 25);
    }

    #[test]
    fn test_percent_off_rounds() {
        // ৳1000 → ৳667 saves 333, 33.3% rounds to 33
        assert_eq!(Taka::new(667).percent_off(Taka::new(1000)), 33);
        // ৳1000 → ৳665 saves 335, 33.5% rounds to 34
        assert_eq!(Taka::new(665).percent_off(Taka::new(1000)), 34);
    }

    #[test]
    fn test_percent_off_degenerate_inputs() {
        // Zero or negative original never divides
        assert_eq!(Taka::new(100).percent_off(Taka::zero()), 0);
        assert_eq!(Taka::new(100).percent_off(Taka::new(-10)), 0);
        // Offer above selling is not a saving
        assert_eq!(Taka::new(900).percent_off(Taka::new(800)), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Taka::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Taka::new(100);
        assert!(positive.is_positive());

        let negative = Taka::new(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Taka::new(299);
        assert_eq!(unit_price.multiply_quantity(3).amount(), 897);
    }
}
