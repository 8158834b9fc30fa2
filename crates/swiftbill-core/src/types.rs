//! # Domain Types
//!
//! Core domain types for the settlement and tax computation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  ResolvedLine   │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  unit_price     │──►│  taxable value  │   │  Percentage     │       │
//! │  │  quantity       │   │  cgst/sgst/igst │   │  Amount         │       │
//! │  │  GstCharge      │   │  (immutable)    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  PlaceOfSupply  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  IntraState     │   │  Cash Upi Card  │       │
//! │  │  1800 = 18%     │   │  InterState     │   │  Bank Credit    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Two GST Regimes
//! Intra-state supplies split the combined rate into equal CGST and SGST
//! halves; inter-state supplies charge the full rate as IGST. The two are
//! mutually exclusive per line, and [`GstCharge`] makes the malformed
//! mixed case representable only through an explicit `Split`, which the
//! resolver rejects.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the common GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Splits the rate into the intra-state CGST/SGST halves.
    ///
    /// The second half takes the remainder so the halves always re-sum to
    /// the combined rate, odd bps included.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::types::TaxRate;
    ///
    /// let (cgst, sgst) = TaxRate::from_bps(1800).half();
    /// assert_eq!((cgst.bps(), sgst.bps()), (900, 900));
    ///
    /// let (cgst, sgst) = TaxRate::from_bps(555).half();
    /// assert_eq!(cgst.bps() + sgst.bps(), 555);
    /// ```
    pub const fn half(&self) -> (TaxRate, TaxRate) {
        let cgst = self.0 / 2;
        (TaxRate(cgst), TaxRate(self.0 - cgst))
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// GST Charge
// =============================================================================

/// How a line item is taxed.
///
/// Either a single combined rate (the resolver splits it per the place of
/// supply), or explicit per-component rates captured as-is from the item
/// master. A `Split` must keep the two regimes exclusive: IGST together
/// with a non-zero CGST or SGST is rejected at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GstCharge {
    /// Single combined GST rate in basis points.
    Rate { bps: u32 },
    /// Explicit per-component rates in basis points.
    Split {
        cgst_bps: u32,
        sgst_bps: u32,
        igst_bps: u32,
    },
}

// =============================================================================
// Place of Supply
// =============================================================================

/// Whether the supply is taxed intra-state (CGST + SGST) or inter-state
/// (IGST). Determined upstream by comparing seller and customer states;
/// walk-in customers default to intra-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlaceOfSupply {
    /// Same state: combined rate splits into CGST + SGST halves.
    #[default]
    IntraState,
    /// Different state: full rate charged as IGST.
    InterState,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settles the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash; the cashier records the tendered amount.
    Cash,
    /// UPI transfer (full settlement, no partial-payment concept).
    Upi,
    /// Card on external terminal (full settlement).
    Card,
    /// Direct bank transfer (full settlement).
    Bank,
    /// Credit sale: recorded as fully outstanding.
    Credit,
}

impl PaymentMethod {
    /// Electronic methods guarantee full settlement and need no tendered
    /// amount. Cash needs one; credit deliberately records nothing received.
    pub const fn settles_in_full(&self) -> bool {
        matches!(self, PaymentMethod::Upi | PaymentMethod::Card | PaymentMethod::Bank)
    }

    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart line as entered at the register.
/// Uses the snapshot pattern: price, name, and tax classification are
/// frozen copies of the item master at the time of adding.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Stable identifier for the cart line (item master ID or UUID).
    pub id: String,

    /// Display name shown on the bill.
    pub name: String,

    /// Unit price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Quantity sold. Must be positive; zero is rejected, never coerced.
    pub quantity: i64,

    /// Unit label for display ("pcs", "kg", ...).
    #[serde(default)]
    pub unit: String,

    /// Tax classification. `None` falls back to the configured default rate.
    #[serde(default)]
    pub tax: Option<GstCharge>,

    /// HSN/SAC classification code. `None` falls back to the configured
    /// default code.
    #[serde(default)]
    pub hsn_code: Option<String>,

    /// Per-item discount in paise, subtracted from the taxable value
    /// (floored at zero).
    #[serde(default)]
    pub discount_paise: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the per-item discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }
}

// =============================================================================
// Resolved Line
// =============================================================================

/// The immutable derivation of one [`LineItem`]: taxable value plus the
/// three GST components, all three always present (zero when not
/// applicable) so aggregation never branches on tax type.
///
/// Created once by the tax resolver and never mutated; any input change
/// re-derives the whole line instead of patching it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedLine {
    /// Identifier of the originating line item.
    pub item_id: String,

    /// Display name (frozen).
    pub name: String,

    /// HSN code, with the configured default applied when the item had none.
    pub hsn_code: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit label for display.
    pub unit: String,

    /// Unit price in paise (frozen).
    pub unit_price_paise: i64,

    /// Taxable value: unit price × quantity − per-item discount, floored
    /// at zero.
    pub taxable_paise: i64,

    /// CGST rate applied to the taxable value.
    pub cgst_rate_bps: u32,
    /// CGST amount in paise.
    pub cgst_paise: i64,

    /// SGST rate applied to the taxable value.
    pub sgst_rate_bps: u32,
    /// SGST amount in paise.
    pub sgst_paise: i64,

    /// IGST rate applied to the taxable value.
    pub igst_rate_bps: u32,
    /// IGST amount in paise.
    pub igst_paise: i64,
}

impl ResolvedLine {
    /// Total tax on this line across all three components.
    #[inline]
    pub fn tax_paise(&self) -> i64 {
        self.cgst_paise + self.sgst_paise + self.igst_paise
    }

    /// Line total: taxable value plus all tax amounts.
    #[inline]
    pub fn line_total_paise(&self) -> i64 {
        self.taxable_paise + self.tax_paise()
    }

    /// Returns the taxable value as Money.
    #[inline]
    pub fn taxable(&self) -> Money {
        Money::from_paise(self.taxable_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise())
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Bill-level discount, entered at the summary stage of checkout.
///
/// Percentage discounts apply to the **tax-inclusive** total: the discount
/// reduces what the customer pays, not the statutory taxable base. The
/// HSN summary is built pre-discount for the same reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage of the tax-inclusive total, in basis points (1000 = 10%).
    Percentage(u32),
    /// Flat amount in paise.
    Amount(i64),
}

impl Discount {
    /// No discount.
    #[inline]
    pub const fn none() -> Self {
        Discount::Percentage(0)
    }

    /// True when the discount cannot change the bill.
    pub const fn is_none(&self) -> bool {
        match self {
            Discount::Percentage(bps) => *bps == 0,
            Discount::Amount(paise) => *paise == 0,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
