//! # Checkout Session
//!
//! One in-progress checkout: the mutable wizard state, the reactive
//! recompute of totals and settlement, and the terminal confirmation
//! snapshot.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CheckoutSession Lifecycle                           │
//! │                                                                         │
//! │  CheckoutSession::new(config, place, cart)                             │
//! │       │  resolves every line once; invalid carts never get a session   │
//! │       ▼                                                                 │
//! │  setters (customer, method, tender, discount, round-off)              │
//! │       │  every setter triggers a WHOLESALE recompute of                 │
//! │       │  CartTotals + Settlement — nothing is patched in place         │
//! │       ▼                                                                 │
//! │  advance()/back() drive the transition table                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Summary ──advance()──► Confirmed                                      │
//! │       │  the ONE side effect: HSN reconciliation, then the frozen      │
//! │       │  FinalizedCheckout snapshot for renderers/persistence          │
//! │       ▼                                                                 │
//! │  terminal: every further mutation returns SessionConfirmed             │
//! │                                                                         │
//! │  Cancel = drop the session. Never reused for a second transaction.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A session is owned exclusively by the one checkout in progress; all
//! recomputation is synchronous. The 3→4 hand-off is the only boundary
//! where asynchronous collaborators (printing, persistence) take over,
//! and they receive an immutable snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use swiftbill_core::cart::{compute_totals, CartTotals};
use swiftbill_core::config::BillingConfig;
use swiftbill_core::error::CoreError;
use swiftbill_core::hsn::{build_hsn_summary, reconcile, HsnBucket};
use swiftbill_core::money::Money;
use swiftbill_core::settlement::Settlement;
use swiftbill_core::tax::TaxResolver;
use swiftbill_core::types::{Discount, LineItem, PaymentMethod, PlaceOfSupply, ResolvedLine};
use swiftbill_core::validation::validate_received_paise;
use swiftbill_core::MAX_CART_ITEMS;

use crate::error::{CheckoutError, CheckoutResult};
use crate::stage::{transition, CheckoutEvent, CheckoutStage, GuardContext};

/// Display name used when the cashier chooses walk-in without entering one.
pub const WALK_IN_PLACEHOLDER: &str = "Walk-in Customer";

// =============================================================================
// Customer
// =============================================================================

/// Who the bill is for: an identified party from the customer book, or an
/// anonymous walk-in. Walk-in needs no further fields; the name defaults
/// to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Customer {
    /// Anonymous point-of-sale customer, not persisted.
    WalkIn {
        name: String,
        #[serde(default)]
        phone: Option<String>,
    },
    /// Identified party from the customer book.
    Party {
        id: String,
        name: String,
        #[serde(default)]
        phone: Option<String>,
    },
}

impl Customer {
    /// A walk-in with the placeholder name.
    pub fn walk_in() -> Self {
        Customer::WalkIn {
            name: WALK_IN_PLACEHOLDER.to_string(),
            phone: None,
        }
    }

    /// Name shown on the bill.
    pub fn display_name(&self) -> &str {
        match self {
            Customer::WalkIn { name, .. } | Customer::Party { name, .. } => name,
        }
    }

    #[inline]
    pub const fn is_walk_in(&self) -> bool {
        matches!(self, Customer::WalkIn { .. })
    }
}

// =============================================================================
// Finalized Checkout
// =============================================================================

/// The immutable result of a confirmed checkout.
///
/// This is the entire boundary contract with the document renderers and
/// the persistence collaborator: every amount a rendered bill displays
/// must be a bit-exact field of this snapshot — renderers never recompute
/// tax or totals on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedCheckout {
    /// Human-readable invoice number (`POS-yymmdd-HHMMSS-xxxx`).
    pub invoice_number: String,

    /// The session this sale came from.
    pub session_id: String,

    /// Store name for the bill header.
    pub store_name: String,

    /// Store address lines for the bill header.
    pub store_address: Vec<String>,

    /// When the checkout began.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When stage 4 was reached. The snapshot is frozen as of this moment.
    #[ts(as = "String")]
    pub confirmed_at: DateTime<Utc>,

    /// Who the bill is for.
    pub customer: Customer,

    /// How it was (or will be) paid.
    pub payment_method: PaymentMethod,

    /// Advisory reference for upi/card/bank payments.
    pub transaction_id: Option<String>,

    /// Advisory bank account label for bank transfers.
    pub bank_account: Option<String>,

    /// The discount as entered.
    pub discount: Discount,

    /// Whether the payable total was rounded to the whole rupee.
    pub round_off_enabled: bool,

    /// The resolved, immutable item list.
    pub items: Vec<ResolvedLine>,

    /// Commercial totals (subtotal, tax, discount, round-off, grand total).
    pub totals: CartTotals,

    /// Statutory per-HSN summary, reconciled against `totals`.
    pub hsn_summary: Vec<HsnBucket>,

    /// Money movement: received, change due, outstanding balance.
    pub settlement: Settlement,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// The mutable state of one checkout in progress.
///
/// ## Example
/// ```rust
/// use swiftbill_checkout::session::CheckoutSession;
/// use swiftbill_core::config::BillingConfig;
/// use swiftbill_core::types::{GstCharge, LineItem, PaymentMethod, PlaceOfSupply};
///
/// let cart = vec![LineItem {
///     id: "itm-1".to_string(),
///     name: "Ledger Book".to_string(),
///     unit_price_paise: 100000,
///     quantity: 1,
///     unit: "pcs".to_string(),
///     tax: Some(GstCharge::Rate { bps: 1800 }),
///     hsn_code: Some("4820".to_string()),
///     discount_paise: 0,
/// }];
///
/// let mut session =
///     CheckoutSession::new(BillingConfig::default(), PlaceOfSupply::IntraState, cart).unwrap();
/// session.choose_walk_in().unwrap();
/// session.advance().unwrap(); // → Payment
/// session.set_payment_method(PaymentMethod::Upi).unwrap();
/// session.advance().unwrap(); // → Summary
/// session.advance().unwrap(); // → Confirmed
///
/// let snapshot = session.finalized().unwrap();
/// assert_eq!(snapshot.totals.grand_total_paise, 118000);
/// assert!(snapshot.settlement.is_settled());
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    id: String,
    created_at: DateTime<Utc>,
    config: BillingConfig,
    items: Vec<LineItem>,
    lines: Vec<ResolvedLine>,
    stage: CheckoutStage,
    customer: Option<Customer>,
    payment_method: PaymentMethod,
    received: Option<Money>,
    transaction_id: Option<String>,
    bank_account: Option<String>,
    discount: Discount,
    round_off_enabled: bool,
    totals: CartTotals,
    settlement: Settlement,
    finalized: Option<FinalizedCheckout>,
}

impl CheckoutSession {
    /// Begins a checkout for one cart.
    ///
    /// Every line is resolved exactly once here; a cart with an invalid
    /// line never produces a session. Defaults mirror the register:
    /// payment method cash, round-off on, no discount, no customer chosen
    /// yet.
    pub fn new(
        config: BillingConfig,
        place: PlaceOfSupply,
        items: Vec<LineItem>,
    ) -> CheckoutResult<Self> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if items.len() > MAX_CART_ITEMS {
            return Err(CheckoutError::Core(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            }));
        }

        let resolver = TaxResolver::new(&config, place);
        let lines = resolver.resolve_all(&items)?;

        let discount = Discount::none();
        let round_off_enabled = true;
        let totals = compute_totals(&lines, &discount, round_off_enabled)?;
        let payment_method = PaymentMethod::Cash;
        let settlement = Settlement::for_method(payment_method, totals.grand_total(), None);

        let session = CheckoutSession {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            config,
            items,
            lines,
            stage: CheckoutStage::Customer,
            customer: None,
            payment_method,
            received: None,
            transaction_id: None,
            bank_account: None,
            discount,
            round_off_enabled,
            totals,
            settlement,
            finalized: None,
        };

        debug!(
            session = %session.id,
            items = session.items.len(),
            grand_total = session.totals.grand_total_paise,
            "checkout started"
        );

        Ok(session)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    #[inline]
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    #[inline]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[inline]
    pub fn received(&self) -> Option<Money> {
        self.received
    }

    #[inline]
    pub fn discount(&self) -> Discount {
        self.discount
    }

    #[inline]
    pub fn round_off_enabled(&self) -> bool {
        self.round_off_enabled
    }

    /// The current commercial totals, recomputed on every input change.
    #[inline]
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// The current settlement against the current totals.
    #[inline]
    pub fn settlement(&self) -> Settlement {
        self.settlement
    }

    /// The resolved, immutable item list.
    #[inline]
    pub fn lines(&self) -> &[ResolvedLine] {
        &self.lines
    }

    /// The cart as entered, before resolution.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[inline]
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// The statutory HSN summary for the current lines. Runs in parallel
    /// off the same resolved lines as the totals; built on demand because
    /// the lines never change after construction.
    pub fn hsn_summary(&self) -> Vec<HsnBucket> {
        build_hsn_summary(&self.lines)
    }

    /// The frozen snapshot, available once the session is confirmed.
    #[inline]
    pub fn finalized(&self) -> Option<&FinalizedCheckout> {
        self.finalized.as_ref()
    }

    // -------------------------------------------------------------------------
    // Setters (stage-agnostic; every one recomputes wholesale)
    // -------------------------------------------------------------------------

    /// Selects an identified party or an explicit walk-in.
    pub fn select_customer(&mut self, customer: Customer) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        debug!(session = %self.id, customer = customer.display_name(), "customer selected");
        self.customer = Some(customer);
        Ok(())
    }

    /// Chooses walk-in mode explicitly (placeholder name).
    pub fn choose_walk_in(&mut self) -> CheckoutResult<()> {
        self.select_customer(Customer::walk_in())
    }

    /// Sets the payment method and re-derives the settlement.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        self.payment_method = method;
        self.resettle();
        debug!(session = %self.id, method = ?method, "payment method set");
        Ok(())
    }

    /// Sets the tendered amount (cash) and re-derives the settlement.
    pub fn set_received_amount(&mut self, received: Money) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        validate_received_paise(received.paise()).map_err(CoreError::from)?;
        self.received = Some(received);
        self.resettle();
        debug!(session = %self.id, received = received.paise(), "tender entered");
        Ok(())
    }

    /// Records an advisory transaction reference (upi/card/bank). Never
    /// blocks any transition.
    pub fn set_transaction_id(&mut self, transaction_id: Option<String>) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        self.transaction_id = transaction_id.filter(|t| !t.trim().is_empty());
        Ok(())
    }

    /// Records an advisory bank account label. Never blocks any transition.
    pub fn set_bank_account(&mut self, bank_account: Option<String>) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        self.bank_account = bank_account.filter(|b| !b.trim().is_empty());
        Ok(())
    }

    /// Sets the bill-level discount and recomputes totals + settlement.
    ///
    /// Totals are computed before the new value is stored, so a rejected
    /// discount leaves the session untouched.
    pub fn set_discount(&mut self, discount: Discount) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        let totals = compute_totals(&self.lines, &discount, self.round_off_enabled)?;
        self.discount = discount;
        self.totals = totals;
        self.resettle();
        debug!(
            session = %self.id,
            discount = self.totals.discount_paise,
            grand_total = self.totals.grand_total_paise,
            "discount applied"
        );
        Ok(())
    }

    /// Toggles round-off and recomputes totals + settlement.
    pub fn set_round_off(&mut self, enabled: bool) -> CheckoutResult<()> {
        self.ensure_mutable()?;
        let totals = compute_totals(&self.lines, &self.discount, enabled)?;
        self.round_off_enabled = enabled;
        self.totals = totals;
        self.resettle();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Attempts to advance one stage.
    ///
    /// Guards run against the **current** totals — the cash guard is
    /// re-evaluated every time, because the discount (and with it the
    /// grand total) can change while the wizard is open.
    ///
    /// Advancing from Summary performs the one-time side effect: the HSN
    /// summary is reconciled and the frozen [`FinalizedCheckout`] snapshot
    /// is emitted. A reconciliation failure leaves the session on Summary
    /// and halts document generation.
    pub fn advance(&mut self) -> CheckoutResult<CheckoutStage> {
        let next = transition(self.stage, CheckoutEvent::Next, &self.guard_context())
            .map_err(|reason| CheckoutError::GuardViolation {
                stage: self.stage,
                event: CheckoutEvent::Next,
                reason,
            })?;

        if next.is_terminal() {
            let snapshot = self.build_snapshot()?;
            info!(
                session = %self.id,
                invoice = %snapshot.invoice_number,
                grand_total = snapshot.totals.grand_total_paise,
                method = ?snapshot.payment_method,
                "checkout confirmed"
            );
            self.finalized = Some(snapshot);
        } else {
            debug!(session = %self.id, from = self.stage.as_str(), to = next.as_str(), "advanced");
        }

        self.stage = next;
        Ok(next)
    }

    /// Returns to the previous stage. All previously entered values are
    /// preserved; forward guards simply run again on the next advance.
    pub fn back(&mut self) -> CheckoutResult<CheckoutStage> {
        let prev = transition(self.stage, CheckoutEvent::Back, &self.guard_context())
            .map_err(|reason| CheckoutError::GuardViolation {
                stage: self.stage,
                event: CheckoutEvent::Back,
                reason,
            })?;

        debug!(session = %self.id, from = self.stage.as_str(), to = prev.as_str(), "went back");
        self.stage = prev;
        Ok(prev)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn ensure_mutable(&self) -> CheckoutResult<()> {
        if self.stage.is_terminal() {
            Err(CheckoutError::SessionConfirmed)
        } else {
            Ok(())
        }
    }

    fn guard_context(&self) -> GuardContext {
        GuardContext {
            customer_chosen: self.customer.is_some(),
            payment_method: self.payment_method,
            received_paise: self.received.map(|m| m.paise()),
            grand_total_paise: self.totals.grand_total_paise,
        }
    }

    /// Re-derives the settlement from the current totals and tender.
    fn resettle(&mut self) {
        self.settlement = Settlement::for_method(
            self.payment_method,
            self.totals.grand_total(),
            self.received,
        );
    }

    /// Builds the confirmation snapshot. The reconciliation check runs
    /// here so an inconsistent statutory summary can never reach a
    /// renderer.
    fn build_snapshot(&self) -> CheckoutResult<FinalizedCheckout> {
        let hsn_summary = self.hsn_summary();
        reconcile(&hsn_summary, &self.totals)?;

        let confirmed_at = Utc::now();

        Ok(FinalizedCheckout {
            invoice_number: invoice_number(&self.id, confirmed_at),
            session_id: self.id.clone(),
            store_name: self.config.store_name.clone(),
            store_address: self.config.store_address.clone(),
            created_at: self.created_at,
            confirmed_at,
            customer: self.customer.clone().unwrap_or_else(Customer::walk_in),
            payment_method: self.payment_method,
            transaction_id: self.transaction_id.clone(),
            bank_account: self.bank_account.clone(),
            discount: self.discount,
            round_off_enabled: self.round_off_enabled,
            items: self.lines.clone(),
            totals: self.totals.clone(),
            hsn_summary,
            settlement: self.settlement,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Quick-tender denominations offered on the cash pad, on top of the
/// exact amount.
const QUICK_TENDER_RUPEES: [i64; 5] = [100, 200, 500, 1000, 2000];

/// Suggested cash tenders for a payable total: the exact amount first,
/// then the total plus each quick denomination.
///
/// ## Example
/// ```rust
/// use swiftbill_checkout::session::suggested_tenders;
/// use swiftbill_core::money::Money;
///
/// let tenders = suggested_tenders(Money::from_paise(26300));
/// assert_eq!(tenders[0].paise(), 26300);
/// assert_eq!(tenders[1].paise(), 26300 + 10000);
/// ```
pub fn suggested_tenders(grand_total: Money) -> Vec<Money> {
    let mut tenders = Vec::with_capacity(1 + QUICK_TENDER_RUPEES.len());
    tenders.push(grand_total);
    for rupees in QUICK_TENDER_RUPEES {
        tenders.push(grand_total + Money::from_rupees(rupees));
    }
    tenders
}

/// Invoice number stamped at confirmation: timestamp plus a short
/// session-derived suffix, e.g. `POS-260807-143522-4f2a`.
fn invoice_number(session_id: &str, at: DateTime<Utc>) -> String {
    let suffix: String = session_id
        .chars()
        .rev()
        .filter(char::is_ascii_alphanumeric)
        .take(4)
        .collect();
    format!("POS-{}-{}", at.format("%y%m%d-%H%M%S"), suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use swiftbill_core::types::GstCharge;

    fn item(id: &str, price_paise: i64, qty: i64, rate_bps: u32, hsn: &str) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            unit_price_paise: price_paise,
            quantity: qty,
            unit: "pcs".to_string(),
            tax: Some(GstCharge::Rate { bps: rate_bps }),
            hsn_code: Some(hsn.to_string()),
            discount_paise: 0,
        }
    }

    /// (₹100 × 2 @ 18%, HSN 1001) + (₹50 × 1 @ 12%, HSN 1002):
    /// subtotal ₹250.00, tax ₹42.00, pre-discount total ₹292.00.
    fn reference_cart() -> Vec<LineItem> {
        vec![
            item("1", 10000, 2, 1800, "1001"),
            item("2", 5000, 1, 1200, "1002"),
        ]
    }

    fn session_with(items: Vec<LineItem>) -> CheckoutSession {
        CheckoutSession::new(BillingConfig::default(), PlaceOfSupply::IntraState, items).unwrap()
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = CheckoutSession::new(
            BillingConfig::default(),
            PlaceOfSupply::IntraState,
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_oversized_cart_rejected() {
        let items: Vec<LineItem> = (0..=MAX_CART_ITEMS)
            .map(|i| item(&format!("{i}"), 100, 1, 1800, "9999"))
            .collect();
        let err =
            CheckoutSession::new(BillingConfig::default(), PlaceOfSupply::IntraState, items)
                .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_line_never_gets_a_session() {
        let err = CheckoutSession::new(
            BillingConfig::default(),
            PlaceOfSupply::IntraState,
            vec![item("z", 100, 0, 1800, "9999")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::InvalidLineItem { .. })
        ));
    }

    #[test]
    fn test_customer_guard_then_walk_in() {
        let mut session = session_with(reference_cart());
        assert_eq!(session.stage(), CheckoutStage::Customer);

        // No customer chosen: blocked, stage unchanged.
        let err = session.advance().unwrap_err();
        assert!(matches!(err, CheckoutError::GuardViolation { .. }));
        assert_eq!(session.stage(), CheckoutStage::Customer);

        // Walk-in counts as an explicit choice.
        session.choose_walk_in().unwrap();
        assert_eq!(session.advance().unwrap(), CheckoutStage::Payment);
        assert_eq!(
            session.customer().unwrap().display_name(),
            WALK_IN_PLACEHOLDER
        );
    }

    #[test]
    fn test_cash_guard_blocks_until_covered() {
        // grand total ₹1180.00
        let mut session = session_with(vec![item("1", 100000, 1, 1800, "4820")]);
        assert_eq!(session.totals().grand_total_paise, 118000);

        session.choose_walk_in().unwrap();
        session.advance().unwrap();

        session
            .set_received_amount(Money::from_paise(100000))
            .unwrap();
        assert!(session.advance().is_err());
        assert_eq!(session.stage(), CheckoutStage::Payment);

        session
            .set_received_amount(Money::from_paise(118000))
            .unwrap();
        assert_eq!(session.advance().unwrap(), CheckoutStage::Summary);
        assert_eq!(session.settlement().change_paise, 0);
    }

    #[test]
    fn test_discount_changes_re_evaluate_the_cash_guard() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();

        // ₹263.00 tendered against the undiscounted ₹292.00: blocked.
        session
            .set_received_amount(Money::from_paise(26300))
            .unwrap();
        assert!(session.advance().is_err());

        // 10% discount drops the payable total to ₹263.00 (rounded): the
        // same tender now satisfies the guard.
        session.set_discount(Discount::Percentage(1000)).unwrap();
        assert_eq!(session.totals().grand_total_paise, 26300);
        assert_eq!(session.advance().unwrap(), CheckoutStage::Summary);
    }

    #[test]
    fn test_full_cash_checkout_with_discount_and_round_off() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();

        session
            .set_received_amount(Money::from_paise(30000))
            .unwrap();
        session.advance().unwrap();

        session.set_discount(Discount::Percentage(1000)).unwrap();
        let totals = session.totals();
        assert_eq!(totals.subtotal_paise, 25000);
        assert_eq!(totals.tax_paise, 4200);
        assert_eq!(totals.discount_paise, 2920);
        assert_eq!(totals.round_off_paise, 20);
        assert_eq!(totals.grand_total_paise, 26300);

        assert_eq!(session.advance().unwrap(), CheckoutStage::Confirmed);

        let snapshot = session.finalized().expect("snapshot after confirmation");
        assert!(snapshot.invoice_number.starts_with("POS-"));
        assert_eq!(snapshot.settlement.received_paise, 30000);
        assert_eq!(snapshot.settlement.change_paise, 3700);
        assert_eq!(snapshot.settlement.balance_paise, 0);
        assert_eq!(snapshot.hsn_summary.len(), 2);
        assert_eq!(snapshot.hsn_summary[0].hsn_code, "1001");
        assert_eq!(snapshot.items.len(), 2);
    }

    #[test]
    fn test_electronic_payment_settles_in_full_without_tender() {
        let mut session = session_with(reference_cart());
        session
            .select_customer(Customer::Party {
                id: "p1".to_string(),
                name: "Lakshmi Stores".to_string(),
                phone: Some("9876543210".to_string()),
            })
            .unwrap();
        session.advance().unwrap();

        session.set_payment_method(PaymentMethod::Upi).unwrap();
        session
            .set_transaction_id(Some("UPI123456".to_string()))
            .unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        let snapshot = session.finalized().unwrap();
        assert_eq!(snapshot.settlement.received_paise, 29200);
        assert!(snapshot.settlement.is_settled());
        assert_eq!(snapshot.transaction_id.as_deref(), Some("UPI123456"));
        assert!(!snapshot.customer.is_walk_in());
    }

    #[test]
    fn test_credit_sale_records_full_balance() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();

        session.set_payment_method(PaymentMethod::Credit).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        let snapshot = session.finalized().unwrap();
        assert_eq!(snapshot.settlement.received_paise, 0);
        assert_eq!(snapshot.settlement.balance_paise, 29200);
        assert_eq!(snapshot.settlement.change_paise, 0);
    }

    #[test]
    fn test_back_preserves_entered_values() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();
        session
            .set_received_amount(Money::from_paise(30000))
            .unwrap();
        session.advance().unwrap();
        session.set_discount(Discount::Percentage(1000)).unwrap();

        // Summary → Payment → Customer: nothing is cleared.
        session.back().unwrap();
        session.back().unwrap();
        assert_eq!(session.stage(), CheckoutStage::Customer);
        assert!(session.customer().is_some());
        assert_eq!(session.received(), Some(Money::from_paise(30000)));
        assert_eq!(session.discount(), Discount::Percentage(1000));

        // Forward guards simply run again.
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.stage(), CheckoutStage::Summary);
    }

    #[test]
    fn test_back_blocked_at_first_stage() {
        let mut session = session_with(reference_cart());
        assert!(session.back().is_err());
    }

    #[test]
    fn test_confirmed_session_is_frozen() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();
        session.set_payment_method(PaymentMethod::Card).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.stage(), CheckoutStage::Confirmed);

        assert!(matches!(
            session.set_discount(Discount::Amount(100)),
            Err(CheckoutError::SessionConfirmed)
        ));
        assert!(matches!(
            session.set_payment_method(PaymentMethod::Cash),
            Err(CheckoutError::SessionConfirmed)
        ));
        assert!(matches!(
            session.choose_walk_in(),
            Err(CheckoutError::SessionConfirmed)
        ));
        assert!(session.advance().is_err());
        assert!(session.back().is_err());

        // The snapshot is unchanged by the failed mutations.
        assert_eq!(
            session.finalized().unwrap().totals.grand_total_paise,
            29200
        );
    }

    #[test]
    fn test_round_off_toggle_recomputes() {
        let mut session = session_with(reference_cart());
        session.set_discount(Discount::Percentage(1000)).unwrap();
        assert_eq!(session.totals().grand_total_paise, 26300);

        session.set_round_off(false).unwrap();
        assert_eq!(session.totals().grand_total_paise, 26280);
        assert_eq!(session.totals().round_off_paise, 0);

        session.set_round_off(true).unwrap();
        assert_eq!(session.totals().grand_total_paise, 26300);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut session = session_with(reference_cart());
        session.set_discount(Discount::Percentage(1000)).unwrap();
        let first = session.totals().clone();
        session.set_discount(Discount::Percentage(1000)).unwrap();
        assert_eq!(&first, session.totals());
    }

    #[test]
    fn test_rejected_discount_leaves_session_untouched() {
        let mut session = session_with(reference_cart());
        session.set_discount(Discount::Percentage(1000)).unwrap();
        let before = session.totals().clone();

        assert!(session.set_discount(Discount::Percentage(20000)).is_err());
        assert_eq!(&before, session.totals());
        assert_eq!(session.discount(), Discount::Percentage(1000));
    }

    #[test]
    fn test_snapshot_serializes_camel_case_for_renderers() {
        let mut session = session_with(reference_cart());
        session.choose_walk_in().unwrap();
        session.advance().unwrap();
        session.set_payment_method(PaymentMethod::Upi).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        let json = serde_json::to_value(session.finalized().unwrap()).unwrap();
        assert!(json.get("invoiceNumber").is_some());
        assert!(json.get("hsnSummary").is_some());
        assert_eq!(json["storeName"], "SwiftBill Dev Store");
        assert_eq!(json["paymentMethod"], "upi");
        assert_eq!(json["customer"]["type"], "walkIn");
        assert_eq!(
            json["totals"]["grand_total_paise"].as_i64(),
            Some(29200)
        );
    }

    #[test]
    fn test_suggested_tenders() {
        let tenders = suggested_tenders(Money::from_paise(26300));
        let paise: Vec<i64> = tenders.iter().map(Money::paise).collect();
        assert_eq!(paise, vec![26300, 36300, 46300, 76300, 126300, 226300]);
    }

    #[test]
    fn test_invoice_number_shape() {
        let at = DateTime::parse_from_rfc3339("2026-08-07T14:35:22Z")
            .unwrap()
            .with_timezone(&Utc);
        let number = invoice_number("0a1b2c3d-0000-0000-0000-00000000f4e5", at);
        assert_eq!(number, "POS-260807-143522-5e4f");
    }
}
