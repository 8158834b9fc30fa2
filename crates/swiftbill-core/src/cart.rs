//! # Cart Aggregator
//!
//! Sums resolved lines into the commercial totals of the bill: subtotal,
//! tax, discount, round-off, grand total.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Aggregation                                   │
//! │                                                                         │
//! │  [ResolvedLine] ──► subtotal = Σ taxable                               │
//! │                     tax      = Σ (cgst + sgst + igst)                  │
//! │                          │                                              │
//! │                          ▼                                              │
//! │               discount on the TAX-INCLUSIVE total                      │
//! │               (clamped: a bill never goes negative)                    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │               round-off to the whole rupee (optional),                 │
//! │               signed delta kept as its own line                        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                     CartTotals (immutable)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wholesale Recompute
//! Totals are recomputed from scratch on every input change; there is no
//! incremental patching, so the summation invariant
//! `grand_total == after_discount + round_off` holds at all times and
//! recomputation is idempotent.
//!
//! The percentage discount deliberately applies to the tax-inclusive
//! total (it reduces what the customer pays), while the statutory HSN
//! summary in [`crate::hsn`] stays pre-discount. That asymmetry is the
//! GST convention, not an inconsistency to fix.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Discount, ResolvedLine, TaxRate};
use crate::validation::{validate_discount_bps, validate_item_discount_paise};

// =============================================================================
// Cart Totals
// =============================================================================

/// The reconciled commercial totals of one cart.
///
/// ## Invariants
/// - `grand_total_paise == subtotal + tax − discount + round_off` exactly
/// - `round_off_paise == 0` whenever round-off is disabled
/// - `discount_paise` is the *effective* (clamped) discount, so the
///   identity above never needs a floor term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Number of lines on the bill.
    pub item_count: usize,

    /// Total quantity across all lines.
    pub total_quantity: i64,

    /// Sum of taxable values in paise.
    pub subtotal_paise: i64,

    /// Sum of CGST amounts in paise.
    pub cgst_paise: i64,

    /// Sum of SGST amounts in paise.
    pub sgst_paise: i64,

    /// Sum of IGST amounts in paise.
    pub igst_paise: i64,

    /// Total tax in paise (CGST + SGST + IGST).
    pub tax_paise: i64,

    /// Effective bill-level discount in paise (clamped to the payable
    /// total; never negative).
    pub discount_paise: i64,

    /// Signed round-off delta in paise: `grand_total − after_discount`.
    pub round_off_paise: i64,

    /// Final payable amount in paise.
    pub grand_total_paise: i64,
}

impl CartTotals {
    /// Tax-inclusive total before discount and round-off — the base the
    /// statutory HSN summary must reconcile against.
    #[inline]
    pub fn total_before_discount_paise(&self) -> i64 {
        self.subtotal_paise + self.tax_paise
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Computes the cart totals for a set of resolved lines.
///
/// Pure function of its inputs; callers invoke it on every input mutation
/// instead of mutating an accumulator, which removes any ordering
/// dependency between edits.
///
/// ## Arguments
/// * `lines` - resolved cart lines
/// * `discount` - bill-level discount
/// * `round_off_enabled` - round the payable total to the whole rupee
///
/// ## Example
/// ```rust
/// use swiftbill_core::cart::compute_totals;
/// use swiftbill_core::config::BillingConfig;
/// use swiftbill_core::tax::TaxResolver;
/// use swiftbill_core::types::{Discount, GstCharge, LineItem, PlaceOfSupply};
///
/// let config = BillingConfig::default();
/// let resolver = TaxResolver::new(&config, PlaceOfSupply::IntraState);
/// let lines = resolver.resolve_all(&[LineItem {
///     id: "1".to_string(),
///     name: "Ledger Book".to_string(),
///     unit_price_paise: 10000,
///     quantity: 2,
///     unit: "pcs".to_string(),
///     tax: Some(GstCharge::Rate { bps: 1800 }),
///     hsn_code: None,
///     discount_paise: 0,
/// }]).unwrap();
///
/// let totals = compute_totals(&lines, &Discount::none(), true).unwrap();
/// assert_eq!(totals.subtotal_paise, 20000);
/// assert_eq!(totals.tax_paise, 3600);
/// assert_eq!(totals.grand_total_paise, 23600);
/// ```
pub fn compute_totals(
    lines: &[ResolvedLine],
    discount: &Discount,
    round_off_enabled: bool,
) -> CoreResult<CartTotals> {
    let subtotal: Money = lines.iter().map(ResolvedLine::taxable).sum();
    let cgst: Money = lines.iter().map(|l| Money::from_paise(l.cgst_paise)).sum();
    let sgst: Money = lines.iter().map(|l| Money::from_paise(l.sgst_paise)).sum();
    let igst: Money = lines.iter().map(|l| Money::from_paise(l.igst_paise)).sum();
    let tax = cgst + sgst + igst;

    let total_before = subtotal + tax;

    let requested = match discount {
        Discount::Percentage(bps) => {
            validate_discount_bps(*bps)?;
            total_before.apply_bps(TaxRate::from_bps(*bps))
        }
        Discount::Amount(paise) => {
            validate_item_discount_paise(*paise)?;
            Money::from_paise(*paise)
        }
    };

    // A discount cannot invert the bill: the clamped value is the
    // effective discount recorded on the totals.
    let effective_discount = requested.min(total_before);
    let after_discount = total_before - effective_discount;

    let (grand_total, round_off) = if round_off_enabled {
        let rounded = after_discount.round_to_rupee();
        (rounded, rounded - after_discount)
    } else {
        // Amounts are integer paise already, so "round to minor unit" is
        // the identity here and the delta is zero.
        (after_discount, Money::zero())
    };

    Ok(CartTotals {
        item_count: lines.len(),
        total_quantity: lines.iter().map(|l| l.quantity).sum(),
        subtotal_paise: subtotal.paise(),
        cgst_paise: cgst.paise(),
        sgst_paise: sgst.paise(),
        igst_paise: igst.paise(),
        tax_paise: tax.paise(),
        discount_paise: effective_discount.paise(),
        round_off_paise: round_off.paise(),
        grand_total_paise: grand_total.paise(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
