//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many billing systems:                                               │
//! │    ₹262.80 rounded off, delta dropped → books off by ₹0.20             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    26280 paise rounds to 26300, and the +20 paise delta is kept as      │
//! │    an explicit, signed round-off line on the bill                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Every rounding point in the engine uses **round half away from zero**
//! (₹0.825 → ₹0.83, -₹0.825 → -₹0.83). Rounding happens only where an
//! amount becomes user-visible; sums of already-rounded paise are exact.
//!
//! ## Usage
//! ```rust
//! use swiftbill_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // ₹21.98
//! let total = price + Money::from_paise(500); // ₹15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Paise per rupee. The one place this constant lives.
const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for round-off deltas, refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  LineItem.unit_price ──► ResolvedLine.taxable ──► CGST/SGST/IGST       │
/// │                                 │                                       │
/// │                                 ▼                                       │
/// │  CartTotals ──► Discount ──► Round-off ──► Grand Total ──► Settlement  │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Calculations, snapshots, and the renderer API all use paise.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// let price = Money::from_rupees(250); // ₹250.00
    /// assert_eq!(price.paise(), 25000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * PAISE_PER_RUPEE)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -₹5.50
    /// assert_eq!(negative.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * PAISE_PER_RUPEE - minor)
        } else {
            Money(major * PAISE_PER_RUPEE + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// let price = Money::from_paise(1099);
    /// assert_eq!(price.rupees(), 10);
    ///
    /// let negative = Money::from_paise(-550);
    /// assert_eq!(negative.rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
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
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a rate in basis points, rounding half away from zero.
    ///
    /// This is the single percentage primitive: per-component GST amounts
    /// and percentage discounts both go through it.
    ///
    /// ## Implementation
    /// Integer math in i128: `|amount| × bps / 10000`, with `+5000` before
    /// the division providing the half-away-from-zero rounding; the sign is
    /// reapplied afterwards so negative amounts round away from zero too.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    /// use swiftbill_core::types::TaxRate;
    ///
    /// let taxable = Money::from_paise(20000); // ₹200.00
    /// let cgst = taxable.apply_bps(TaxRate::from_bps(900)); // 9%
    /// assert_eq!(cgst.paise(), 1800); // ₹18.00
    ///
    /// // ₹10.00 at 8.25% = ₹0.825 → rounds to ₹0.83
    /// let odd = Money::from_paise(1000).apply_bps(TaxRate::from_bps(825));
    /// assert_eq!(odd.paise(), 83);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Taxable Value: ₹200.00
    ///      │
    ///      ▼
    /// apply_bps(9%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// CGST: ₹18.00
    /// ```
    pub fn apply_bps(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 900 = 9%
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(self.0.signum() * magnitude as i64)
    }

    /// Rounds to the nearest whole rupee, half away from zero.
    ///
    /// This is the round-off primitive: the caller keeps the signed delta
    /// (`rounded − original`) as an explicit line on the bill.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(26280).round_to_rupee().paise(), 26300);
    /// assert_eq!(Money::from_paise(26249).round_to_rupee().paise(), 26200);
    /// assert_eq!(Money::from_paise(26250).round_to_rupee().paise(), 26300);
    /// ```
    pub fn round_to_rupee(&self) -> Money {
        let magnitude = (self.0.abs() + PAISE_PER_RUPEE / 2) / PAISE_PER_RUPEE * PAISE_PER_RUPEE;
        Money(self.0.signum() * magnitude)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(10000); // ₹100.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.paise(), 20000); // ₹200.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Masala Chai ₹100.00
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: ₹200.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// Used wherever a discount must not invert an amount negative
    /// (per-item discounts on the taxable value, the bill-level discount
    /// on the payable total).
    #[inline]
    pub fn saturating_sub_at_zero(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use [`crate::config::BillingConfig::format_money`]
/// for actual display to honor the configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of an iterator of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
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
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.paise(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_apply_bps_exact() {
        // ₹200.00 at 9% = ₹18.00 exactly
        let amount = Money::from_paise(20000);
        let tax = amount.apply_bps(TaxRate::from_bps(900));
        assert_eq!(tax.paise(), 1800);
    }

    #[test]
    fn test_apply_bps_rounds_half_away_from_zero() {
        // ₹10.00 at 8.25% = ₹0.825 → ₹0.83
        let amount = Money::from_paise(1000);
        assert_eq!(amount.apply_bps(TaxRate::from_bps(825)).paise(), 83);

        // -₹10.00 at 8.25% = -₹0.825 → -₹0.83 (away from zero, not toward)
        let refund = Money::from_paise(-1000);
        assert_eq!(refund.apply_bps(TaxRate::from_bps(825)).paise(), -83);
    }

    #[test]
    fn test_round_to_rupee() {
        assert_eq!(Money::from_paise(26280).round_to_rupee().paise(), 26300);
        assert_eq!(Money::from_paise(26249).round_to_rupee().paise(), 26200);
        // exactly half a rupee rounds up (away from zero)
        assert_eq!(Money::from_paise(26250).round_to_rupee().paise(), 26300);
        assert_eq!(Money::from_paise(-150).round_to_rupee().paise(), -200);
        assert_eq!(Money::zero().round_to_rupee().paise(), 0);
    }

    #[test]
    fn test_saturating_sub_at_zero() {
        let total = Money::from_paise(500);
        assert_eq!(total.saturating_sub_at_zero(Money::from_paise(200)).paise(), 300);
        // discount overshoot clamps at zero rather than going negative
        assert_eq!(total.saturating_sub_at_zero(Money::from_paise(900)).paise(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_paise(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.paise(), 897);
    }

    #[test]
    fn test_sum() {
        let parts = [Money::from_paise(100), Money::from_paise(250), Money::from_paise(50)];
        let total: Money = parts.iter().copied().sum();
        assert_eq!(total.paise(), 400);
    }

    /// Critical test: a split rate must re-sum to the combined rate even
    /// when each half rounds independently, because the halves come from
    /// TaxRate::half() which preserves the sum at the rate level.
    #[test]
    fn test_half_rate_amounts_resum() {
        let taxable = Money::from_paise(33333);
        let rate = TaxRate::from_bps(1800);
        let (cgst_rate, sgst_rate) = rate.half();
        let cgst = taxable.apply_bps(cgst_rate);
        let sgst = taxable.apply_bps(sgst_rate);
        // 33333 × 9% = 2999.97 paise → 3000 each; equal halves stay equal
        assert_eq!(cgst.paise(), 3000);
        assert_eq!(sgst.paise(), 3000);
        assert_eq!((cgst + sgst).paise(), 6000);
    }
}
