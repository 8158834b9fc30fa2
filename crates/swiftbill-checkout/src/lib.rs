//! # swiftbill-checkout: The POS Checkout State Machine
//!
//! A 4-stage guarded wizard that sequences data collection for one sale
//! and freezes the computed settlement at confirmation.
//!
//! ## The Wizard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Stages                                    │
//! │                                                                         │
//! │   ┌──────────┐      ┌──────────┐      ┌──────────┐      ┌──────────┐   │
//! │   │ Customer │─Next►│ Payment  │─Next►│ Summary  │─Next►│Confirmed │   │
//! │   │   (1)    │◄Back─│   (2)    │◄Back─│   (3)    │      │   (4)    │   │
//! │   └──────────┘      └──────────┘      └──────────┘      └──────────┘   │
//! │        │                  │                 │                │          │
//! │   guard: party       guard: cash       unconditional    TERMINAL       │
//! │   or walk-in         covers total                       frozen          │
//! │   chosen             (re-checked on                     snapshot        │
//! │                      every advance)                     emitted         │
//! │                                                                         │
//! │  Side effects are confined to the 3→4 transition. Everything before   │
//! │  is a pure state update.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`stage`] - Stages, events, and the pure transition table with guards
//! - [`session`] - The mutable session, reactive recompute, confirmation
//! - [`error`] - Guard violations and frozen-session errors
//!
//! All arithmetic lives in `swiftbill-core`; this crate only sequences it.
//!
//! ## Example Usage
//!
//! ```rust
//! use swiftbill_checkout::{CheckoutSession, CheckoutStage};
//! use swiftbill_core::config::BillingConfig;
//! use swiftbill_core::money::Money;
//! use swiftbill_core::types::{Discount, GstCharge, LineItem, PlaceOfSupply};
//!
//! let cart = vec![LineItem {
//!     id: "itm-1".to_string(),
//!     name: "Masala Chai".to_string(),
//!     unit_price_paise: 10000,
//!     quantity: 2,
//!     unit: "pcs".to_string(),
//!     tax: Some(GstCharge::Rate { bps: 1800 }),
//!     hsn_code: Some("0902".to_string()),
//!     discount_paise: 0,
//! }];
//!
//! let mut session =
//!     CheckoutSession::new(BillingConfig::default(), PlaceOfSupply::IntraState, cart).unwrap();
//!
//! session.choose_walk_in().unwrap();
//! session.advance().unwrap();
//! session.set_received_amount(Money::from_paise(25000)).unwrap();
//! session.advance().unwrap();
//! session.set_discount(Discount::Percentage(1000)).unwrap();
//! session.advance().unwrap();
//!
//! assert_eq!(session.stage(), CheckoutStage::Confirmed);
//! let snapshot = session.finalized().unwrap();
//! assert_eq!(snapshot.settlement.change_paise, 25000 - snapshot.totals.grand_total_paise);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;
pub mod stage;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CheckoutError, CheckoutResult};
pub use session::{suggested_tenders, CheckoutSession, Customer, FinalizedCheckout};
pub use stage::{transition, CheckoutEvent, CheckoutStage, GuardContext, GuardReason};
