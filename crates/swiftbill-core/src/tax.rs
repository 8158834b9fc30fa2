//! # Line-Item Tax Resolver
//!
//! Turns one [`LineItem`] into one [`ResolvedLine`]: taxable value plus
//! per-component CGST/SGST/IGST amounts.
//!
//! ## Resolution Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Line Resolution                                   │
//! │                                                                         │
//! │  LineItem ──► constraint checks ──► taxable value ──► rate routing     │
//! │                (qty > 0, no          (price × qty       │               │
//! │                 mixed regime)         − discount,       ▼               │
//! │                                       floor 0)    CGST/SGST/IGST       │
//! │                                                    amounts (rounded    │
//! │                                                    half away from 0)   │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                                   ResolvedLine         │
//! │                                                   (immutable)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rate Routing
//! - Explicit `Split` rates are applied as-is (captured from the item
//!   master), after checking the two regimes are not mixed.
//! - A combined `Rate` splits into equal CGST/SGST halves for intra-state
//!   supplies, or routes wholly to IGST for inter-state supplies.
//! - A line with no classification gets the configured default rate.
//!
//! All three components are always present on the output (zero when not
//! applicable), so downstream aggregation never branches on tax type.

use crate::config::BillingConfig;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{GstCharge, LineItem, PlaceOfSupply, ResolvedLine, TaxRate};
use crate::validation::{
    validate_hsn_code, validate_item_discount_paise, validate_price_paise, validate_quantity,
    validate_tax_rate_bps,
};

// =============================================================================
// Tax Resolver
// =============================================================================

/// Resolves cart lines against a fixed configuration and place of supply.
///
/// Construction copies the two configured defaults, so a resolver is a
/// small, freely cloneable value with no lifetime ties to the config.
///
/// ## Example
/// ```rust
/// use swiftbill_core::config::BillingConfig;
/// use swiftbill_core::tax::TaxResolver;
/// use swiftbill_core::types::{GstCharge, LineItem, PlaceOfSupply};
///
/// let config = BillingConfig::default();
/// let resolver = TaxResolver::new(&config, PlaceOfSupply::IntraState);
///
/// let line = LineItem {
///     id: "itm-1".to_string(),
///     name: "Masala Chai".to_string(),
///     unit_price_paise: 10000,
///     quantity: 2,
///     unit: "pcs".to_string(),
///     tax: Some(GstCharge::Rate { bps: 1800 }),
///     hsn_code: Some("0902".to_string()),
///     discount_paise: 0,
/// };
///
/// let resolved = resolver.resolve(&line).unwrap();
/// assert_eq!(resolved.taxable_paise, 20000);
/// assert_eq!(resolved.cgst_paise, 1800); // 9% of ₹200.00
/// assert_eq!(resolved.sgst_paise, 1800);
/// assert_eq!(resolved.igst_paise, 0);
/// ```
#[derive(Debug, Clone)]
pub struct TaxResolver {
    default_rate: TaxRate,
    default_hsn: String,
    place: PlaceOfSupply,
}

impl TaxResolver {
    /// Creates a resolver for one transaction.
    pub fn new(config: &BillingConfig, place: PlaceOfSupply) -> Self {
        TaxResolver {
            default_rate: TaxRate::from_bps(config.default_tax_rate_bps),
            default_hsn: config.default_hsn_code.clone(),
            place,
        }
    }

    /// The place of supply this resolver routes combined rates by.
    #[inline]
    pub fn place(&self) -> PlaceOfSupply {
        self.place
    }

    /// Resolves a single line item.
    ///
    /// ## Errors
    /// `CoreError::InvalidLineItem` for non-positive quantity, negative
    /// price/discount, a malformed HSN code, or a tax split mixing IGST
    /// with CGST/SGST. Invalid input is rejected, never coerced.
    pub fn resolve(&self, item: &LineItem) -> CoreResult<ResolvedLine> {
        validate_quantity(item.quantity).map_err(|e| invalid(item, e))?;
        validate_price_paise(item.unit_price_paise).map_err(|e| invalid(item, e))?;
        validate_item_discount_paise(item.discount_paise).map_err(|e| invalid(item, e))?;

        let hsn_code = match &item.hsn_code {
            Some(code) => {
                validate_hsn_code(code).map_err(|e| invalid(item, e))?;
                code.trim().to_string()
            }
            None => self.default_hsn.clone(),
        };

        let gross = item.unit_price().multiply_quantity(item.quantity);
        let taxable = gross.saturating_sub_at_zero(item.discount());

        let (cgst_rate, sgst_rate, igst_rate) =
            self.route_rates(item, item.tax.unwrap_or(GstCharge::Rate {
                bps: self.default_rate.bps(),
            }))?;

        Ok(ResolvedLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            hsn_code,
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_price_paise: item.unit_price_paise,
            taxable_paise: taxable.paise(),
            cgst_rate_bps: cgst_rate.bps(),
            cgst_paise: taxable.apply_bps(cgst_rate).paise(),
            sgst_rate_bps: sgst_rate.bps(),
            sgst_paise: taxable.apply_bps(sgst_rate).paise(),
            igst_rate_bps: igst_rate.bps(),
            igst_paise: taxable.apply_bps(igst_rate).paise(),
        })
    }

    /// Resolves every line of a cart, stopping at the first invalid one.
    pub fn resolve_all(&self, items: &[LineItem]) -> CoreResult<Vec<ResolvedLine>> {
        items.iter().map(|item| self.resolve(item)).collect()
    }

    /// Routes a charge to the three components per the place of supply.
    fn route_rates(
        &self,
        item: &LineItem,
        charge: GstCharge,
    ) -> CoreResult<(TaxRate, TaxRate, TaxRate)> {
        match charge {
            GstCharge::Rate { bps } => {
                validate_tax_rate_bps(bps).map_err(|e| invalid(item, e))?;
                let rate = TaxRate::from_bps(bps);
                match self.place {
                    PlaceOfSupply::IntraState => {
                        let (cgst, sgst) = rate.half();
                        Ok((cgst, sgst, TaxRate::zero()))
                    }
                    PlaceOfSupply::InterState => Ok((TaxRate::zero(), TaxRate::zero(), rate)),
                }
            }
            GstCharge::Split {
                cgst_bps,
                sgst_bps,
                igst_bps,
            } => {
                for bps in [cgst_bps, sgst_bps, igst_bps] {
                    validate_tax_rate_bps(bps).map_err(|e| invalid(item, e))?;
                }
                if igst_bps > 0 && (cgst_bps > 0 || sgst_bps > 0) {
                    return Err(CoreError::InvalidLineItem {
                        item_id: item.id.clone(),
                        reason: "IGST cannot be combined with CGST/SGST on one line"
                            .to_string(),
                    });
                }
                Ok((
                    TaxRate::from_bps(cgst_bps),
                    TaxRate::from_bps(sgst_bps),
                    TaxRate::from_bps(igst_bps),
                ))
            }
        }
    }
}

fn invalid(item: &LineItem, err: ValidationError) -> CoreError {
    CoreError::InvalidLineItem {
        item_id: item.id.clone(),
        reason: err.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
