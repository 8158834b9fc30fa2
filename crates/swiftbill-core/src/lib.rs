//! # swiftbill-core: Pure Business Logic for SwiftBill
//!
//! This crate is the **heart** of SwiftBill. It contains the settlement and
//! statutory-tax computation engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SwiftBill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    POS Frontend (JS)                            │   │
//! │  │    Cart UI ──► Checkout Wizard ──► Invoice/Receipt Renderers   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 swiftbill-checkout                              │   │
//! │  │    4-stage wizard: guards, session, confirmation snapshot       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swiftbill-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │    tax    │  │   cart    │  │    hsn    │  │   │
//! │  │   │   Money   │  │ Resolver  │  │  Totals   │  │  Buckets  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │settlement │  │validation │  │  config   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (LineItem, ResolvedLine, Discount, ...)
//! - [`config`] - Injected billing configuration
//! - [`tax`] - Line-item tax resolver (CGST/SGST/IGST routing)
//! - [`cart`] - Cart aggregator (discount, round-off, grand total)
//! - [`hsn`] - Statutory HSN breakdown + reconciliation
//! - [`settlement`] - Change/balance computation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Wholesale Recompute**: Totals are derived from scratch on every change,
//!    never patched incrementally
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use swiftbill_core::cart::compute_totals;
//! use swiftbill_core::config::BillingConfig;
//! use swiftbill_core::tax::TaxResolver;
//! use swiftbill_core::types::{Discount, GstCharge, LineItem, PlaceOfSupply};
//!
//! let config = BillingConfig::default();
//! let resolver = TaxResolver::new(&config, PlaceOfSupply::IntraState);
//!
//! let cart = vec![LineItem {
//!     id: "itm-1".to_string(),
//!     name: "Masala Chai".to_string(),
//!     unit_price_paise: 10000, // ₹100.00
//!     quantity: 2,
//!     unit: "pcs".to_string(),
//!     tax: Some(GstCharge::Rate { bps: 1800 }), // 18% GST
//!     hsn_code: Some("0902".to_string()),
//!     discount_paise: 0,
//! }];
//!
//! let lines = resolver.resolve_all(&cart).unwrap();
//! let totals = compute_totals(&lines, &Discount::none(), true).unwrap();
//!
//! // ₹200.00 + ₹18.00 CGST + ₹18.00 SGST
//! assert_eq!(totals.grand_total_paise, 23600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod error;
pub mod hsn;
pub mod money;
pub mod settlement;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use swiftbill_core::Money` instead of
// `use swiftbill_core::money::Money`

pub use cart::{compute_totals, CartTotals};
pub use config::BillingConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use hsn::{build_hsn_summary, reconcile, HsnBucket};
pub use money::Money;
pub use settlement::Settlement;
pub use tax::TaxResolver;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-store in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
