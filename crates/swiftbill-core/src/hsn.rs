//! # HSN/Tax-Code Breakdown Builder
//!
//! Regroups resolved lines by HSN classification code into the statutory
//! summary table printed on GST invoices.
//!
//! ## Statutory vs Commercial
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Two Views of the Same Resolved Lines                         │
//! │                                                                         │
//! │  [ResolvedLine] ──┬──► Cart Aggregator ──► discount/round-off ──► pay  │
//! │                   │         (commercial view)                           │
//! │                   │                                                     │
//! │                   └──► HSN Builder ──► per-code taxable + tax table    │
//! │                             (statutory view, PRE-discount)              │
//! │                                                                         │
//! │  Both views must reconcile: Σ bucket totals == subtotal + tax          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The breakdown is reported on taxable value before the commercial
//! discount and round-off are blended in — discount is a commercial
//! adjustment, not a tax-base adjustment.
//!
//! ## Ordering
//! Buckets are emitted in first-seen order of their code across the line
//! sequence. Deterministic output is required for reproducible document
//! rendering and for tests that assert exact tables.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartTotals;
use crate::error::{CoreError, CoreResult};
use crate::types::ResolvedLine;

// =============================================================================
// HSN Bucket
// =============================================================================

/// One row of the statutory HSN summary: every resolved line with this
/// code aggregated together.
///
/// Rate columns show the rates of the first line seen for the code, which
/// is how the bill layouts print a bucket whose lines share a slab.
/// Amount columns always aggregate every line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HsnBucket {
    /// HSN/SAC classification code.
    pub hsn_code: String,

    /// Aggregated taxable value in paise.
    pub taxable_paise: i64,

    /// CGST rate (first-seen) in basis points.
    pub cgst_rate_bps: u32,
    /// Aggregated CGST amount in paise.
    pub cgst_paise: i64,

    /// SGST rate (first-seen) in basis points.
    pub sgst_rate_bps: u32,
    /// Aggregated SGST amount in paise.
    pub sgst_paise: i64,

    /// IGST rate (first-seen) in basis points.
    pub igst_rate_bps: u32,
    /// Aggregated IGST amount in paise.
    pub igst_paise: i64,

    /// Bucket total in paise: taxable + all tax amounts.
    pub total_paise: i64,
}

// =============================================================================
// Builder
// =============================================================================

/// Groups resolved lines into HSN buckets, first-seen order.
///
/// The resolver has already applied the default code to unclassified
/// lines, so every line lands in exactly one bucket.
///
/// ## Example
/// ```rust
/// use swiftbill_core::config::BillingConfig;
/// use swiftbill_core::hsn::build_hsn_summary;
/// use swiftbill_core::tax::TaxResolver;
/// use swiftbill_core::types::{GstCharge, LineItem, PlaceOfSupply};
///
/// let resolver = TaxResolver::new(&BillingConfig::default(), PlaceOfSupply::IntraState);
/// let lines = resolver.resolve_all(&[LineItem {
///     id: "1".to_string(),
///     name: "Ledger Book".to_string(),
///     unit_price_paise: 10000,
///     quantity: 2,
///     unit: "pcs".to_string(),
///     tax: Some(GstCharge::Rate { bps: 1800 }),
///     hsn_code: Some("1001".to_string()),
///     discount_paise: 0,
/// }]).unwrap();
///
/// let buckets = build_hsn_summary(&lines);
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets[0].hsn_code, "1001");
/// assert_eq!(buckets[0].taxable_paise, 20000);
/// assert_eq!(buckets[0].total_paise, 23600);
/// ```
pub fn build_hsn_summary(lines: &[ResolvedLine]) -> Vec<HsnBucket> {
    let mut buckets: Vec<HsnBucket> = Vec::new();

    for line in lines {
        match buckets.iter_mut().find(|b| b.hsn_code == line.hsn_code) {
            Some(bucket) => {
                bucket.taxable_paise += line.taxable_paise;
                bucket.cgst_paise += line.cgst_paise;
                bucket.sgst_paise += line.sgst_paise;
                bucket.igst_paise += line.igst_paise;
                bucket.total_paise += line.line_total_paise();
            }
            None => buckets.push(HsnBucket {
                hsn_code: line.hsn_code.clone(),
                taxable_paise: line.taxable_paise,
                cgst_rate_bps: line.cgst_rate_bps,
                cgst_paise: line.cgst_paise,
                sgst_rate_bps: line.sgst_rate_bps,
                sgst_paise: line.sgst_paise,
                igst_rate_bps: line.igst_rate_bps,
                igst_paise: line.igst_paise,
                total_paise: line.line_total_paise(),
            }),
        }
    }

    buckets
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Cross-checks the statutory summary against the commercial totals.
///
/// Summing every bucket's total must reconstruct the pre-discount
/// tax-inclusive total. With integer paise the sums are exact; the
/// tolerance of one paisa per bucket only exists to absorb independent
/// per-bucket rounding, should a renderer feed back re-rounded values.
///
/// ## Errors
/// `CoreError::ReconciliationMismatch` — an internal-consistency failure,
/// i.e. a resolver/aggregator bug, never a user-facing condition. Callers
/// must halt document generation rather than emit an incorrect statutory
/// summary.
pub fn reconcile(buckets: &[HsnBucket], totals: &CartTotals) -> CoreResult<()> {
    let bucket_total: i64 = buckets.iter().map(|b| b.total_paise).sum();
    let expected = totals.total_before_discount_paise();
    let tolerance = buckets.len() as i64;

    if (bucket_total - expected).abs() > tolerance {
        return Err(CoreError::ReconciliationMismatch {
            bucket_total_paise: bucket_total,
            expected_paise: expected,
            tolerance_paise: tolerance,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::compute_totals;
    use crate::config::BillingConfig;
    use crate::tax::TaxResolver;
    use crate::types::{Discount, GstCharge, LineItem, PlaceOfSupply};

    fn item(id: &str, price_paise: i64, qty: i64, rate_bps: u32, hsn: Option<&str>) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            unit_price_paise: price_paise,
            quantity: qty,
            unit: "pcs".to_string(),
            tax: Some(GstCharge::Rate { bps: rate_bps }),
            hsn_code: hsn.map(str::to_string),
            discount_paise: 0,
        }
    }

    fn resolve(items: &[LineItem]) -> Vec<crate::types::ResolvedLine> {
        TaxResolver::new(&BillingConfig::default(), PlaceOfSupply::IntraState)
            .resolve_all(items)
            .unwrap()
    }

    #[test]
    fn test_reference_cart_buckets() {
        // (₹100 × 2 @ 18%, HSN 1001), (₹50 × 1 @ 12%, HSN 1002)
        let lines = resolve(&[
            item("1", 10000, 2, 1800, Some("1001")),
            item("2", 5000, 1, 1200, Some("1002")),
        ]);
        let buckets = build_hsn_summary(&lines);

        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].hsn_code, "1001");
        assert_eq!(buckets[0].taxable_paise, 20000);
        assert_eq!(buckets[0].cgst_paise, 1800);
        assert_eq!(buckets[0].sgst_paise, 1800);
        assert_eq!(buckets[0].cgst_rate_bps, 900);

        assert_eq!(buckets[1].hsn_code, "1002");
        assert_eq!(buckets[1].taxable_paise, 5000);
        assert_eq!(buckets[1].cgst_paise, 300);
        assert_eq!(buckets[1].sgst_paise, 300);
    }

    #[test]
    fn test_lines_sharing_a_code_aggregate() {
        let lines = resolve(&[
            item("1", 10000, 1, 1800, Some("0902")),
            item("2", 6000, 2, 1800, Some("0902")),
        ]);
        let buckets = build_hsn_summary(&lines);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].taxable_paise, 22000);
        assert_eq!(buckets[0].cgst_paise, 900 + 1080);
        assert_eq!(buckets[0].total_paise, 22000 + 2 * (900 + 1080));
    }

    #[test]
    fn test_first_seen_order_is_stable() {
        let lines = resolve(&[
            item("1", 1000, 1, 1800, Some("3004")),
            item("2", 1000, 1, 1800, Some("0902")),
            item("3", 1000, 1, 1800, Some("3004")),
            item("4", 1000, 1, 1800, Some("8471")),
        ]);
        let buckets = build_hsn_summary(&lines);
        let codes: Vec<&str> = buckets.iter().map(|b| b.hsn_code.as_str()).collect();
        assert_eq!(codes, vec!["3004", "0902", "8471"]);
    }

    #[test]
    fn test_unclassified_lines_fall_into_default_bucket() {
        let lines = resolve(&[item("1", 1000, 1, 1800, None)]);
        let buckets = build_hsn_summary(&lines);
        assert_eq!(buckets[0].hsn_code, "9999");
    }

    #[test]
    fn test_reconciles_with_cart_totals_pre_discount() {
        let lines = resolve(&[
            item("1", 10000, 2, 1800, Some("1001")),
            item("2", 5000, 1, 1200, Some("1002")),
        ]);
        let buckets = build_hsn_summary(&lines);

        // Discount and round-off must NOT disturb the statutory view.
        let totals = compute_totals(&lines, &Discount::Percentage(1000), true).unwrap();

        let bucket_sum: i64 = buckets.iter().map(|b| b.total_paise).sum();
        assert_eq!(bucket_sum, totals.total_before_discount_paise());
        assert!(reconcile(&buckets, &totals).is_ok());
    }

    #[test]
    fn test_single_bucket_reconciles() {
        let lines = resolve(&[item("1", 9999, 3, 1800, Some("0902"))]);
        let buckets = build_hsn_summary(&lines);
        let totals = compute_totals(&lines, &Discount::none(), false).unwrap();
        assert_eq!(buckets.len(), 1);
        assert!(reconcile(&buckets, &totals).is_ok());
    }

    #[test]
    fn test_reconcile_detects_corruption() {
        let lines = resolve(&[item("1", 10000, 1, 1800, Some("1001"))]);
        let mut buckets = build_hsn_summary(&lines);
        let totals = compute_totals(&lines, &Discount::none(), false).unwrap();

        buckets[0].total_paise += 100; // simulate an aggregation bug

        let err = reconcile(&buckets, &totals).unwrap_err();
        assert!(matches!(err, CoreError::ReconciliationMismatch { .. }));
    }

    #[test]
    fn test_igst_lines_bucket_cleanly() {
        let lines = TaxResolver::new(&BillingConfig::default(), PlaceOfSupply::InterState)
            .resolve_all(&[
                item("1", 10000, 2, 1800, Some("1001")),
                item("2", 5000, 1, 1200, Some("1002")),
            ])
            .unwrap();
        let buckets = build_hsn_summary(&lines);

        assert_eq!(buckets[0].igst_paise, 3600);
        assert_eq!(buckets[0].cgst_paise, 0);
        assert_eq!(buckets[1].igst_paise, 600);

        let totals = compute_totals(&lines, &Discount::none(), false).unwrap();
        assert!(reconcile(&buckets, &totals).is_ok());
    }

    #[test]
    fn test_build_is_idempotent() {
        let lines = resolve(&[
            item("1", 10000, 2, 1800, Some("1001")),
            item("2", 5000, 1, 1200, Some("1002")),
        ]);
        assert_eq!(build_hsn_summary(&lines), build_hsn_summary(&lines));
    }

    #[test]
    fn test_empty_cart_empty_summary() {
        let buckets = build_hsn_summary(&[]);
        assert!(buckets.is_empty());
        let totals = compute_totals(&[], &Discount::none(), false).unwrap();
        assert!(reconcile(&buckets, &totals).is_ok());
    }
}
