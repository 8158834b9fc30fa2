//! # Checkout Stages and the Transition Table
//!
//! The wizard's sequencing logic as one pure function, instead of
//! conditionals scattered through UI handlers.
//!
//! ## The Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (stage, event)        guard                        result              │
//! │  ──────────────        ─────────────────────────    ─────────────       │
//! │  (Customer, Next)      customer chosen?             Payment / blocked   │
//! │  (Payment,  Next)      cash: received ≥ total       Summary / blocked   │
//! │                        others: always               Summary             │
//! │  (Summary,  Next)      none                         Confirmed           │
//! │  (Payment,  Back)      none                         Customer            │
//! │  (Summary,  Back)      none                         Payment             │
//! │  (Customer, Back)      —                            blocked (first)     │
//! │  (Confirmed, any)      —                            blocked (terminal)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cash guard is evaluated against the **current** grand total every
//! time it runs: the total depends on the discount, which the cashier can
//! still change at the summary stage, so nothing is cached.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use swiftbill_core::money::Money;
use swiftbill_core::settlement::Settlement;
use swiftbill_core::types::PaymentMethod;

// =============================================================================
// Stages
// =============================================================================

/// The four stages of checkout. Linear; no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Stage 1: pick a party or choose walk-in.
    Customer,
    /// Stage 2: payment method and (for cash) tendered amount.
    Payment,
    /// Stage 3: discount, round-off, and the bill summary.
    Summary,
    /// Stage 4: terminal. The settlement is frozen and handed off.
    Confirmed,
}

impl CheckoutStage {
    /// Get the stage number (1-indexed), as shown on the step indicator.
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStage::Customer => 1,
            CheckoutStage::Payment => 2,
            CheckoutStage::Summary => 3,
            CheckoutStage::Confirmed => 4,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Customer => "customer",
            CheckoutStage::Payment => "payment",
            CheckoutStage::Summary => "summary",
            CheckoutStage::Confirmed => "confirmed",
        }
    }

    /// True once no further transitions are possible.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStage::Confirmed)
    }
}

// =============================================================================
// Events
// =============================================================================

/// What the cashier can do to move between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutEvent {
    /// Advance to the next stage (the "Next" / "Receive Payment" button).
    Next,
    /// Return to the previous stage, preserving all entered values.
    Back,
}

// =============================================================================
// Guards
// =============================================================================

/// The slice of session state the guards read. Built fresh for every
/// transition attempt so a stale grand total can never leak in.
#[derive(Debug, Clone, Copy)]
pub struct GuardContext {
    /// A party was selected or walk-in mode was explicitly chosen.
    pub customer_chosen: bool,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Tendered amount in paise, if entered.
    pub received_paise: Option<i64>,
    /// Current payable total in paise (after discount and round-off).
    pub grand_total_paise: i64,
}

/// Why a transition was blocked. The UI stays on the current stage and
/// shows the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardReason {
    /// Stage 1 needs a party selected or walk-in explicitly chosen.
    #[error("select a customer or choose walk-in")]
    NoCustomerSelected,

    /// Cash must cover the payable total before the summary stage.
    #[error("cash received ({received_paise} paise) does not cover the payable total ({required_paise} paise)")]
    InsufficientCashTendered {
        required_paise: i64,
        received_paise: i64,
    },

    /// There is nothing before the customer stage.
    #[error("already at the first stage")]
    AtFirstStage,

    /// Confirmed is terminal; no event leaves it.
    #[error("checkout is confirmed and can no longer change")]
    Terminal,
}

// =============================================================================
// Transition Table
// =============================================================================

/// The entire wizard sequencing rule: `(stage, event) → stage | blocked`.
///
/// Pure function, so every guard is independently unit-testable without a
/// session.
///
/// ## Example
/// ```rust
/// use swiftbill_checkout::stage::{transition, CheckoutEvent, CheckoutStage, GuardContext};
/// use swiftbill_core::types::PaymentMethod;
///
/// let ctx = GuardContext {
///     customer_chosen: true,
///     payment_method: PaymentMethod::Cash,
///     received_paise: Some(118000),
///     grand_total_paise: 118000,
/// };
/// assert_eq!(
///     transition(CheckoutStage::Payment, CheckoutEvent::Next, &ctx),
///     Ok(CheckoutStage::Summary)
/// );
/// ```
pub fn transition(
    stage: CheckoutStage,
    event: CheckoutEvent,
    ctx: &GuardContext,
) -> Result<CheckoutStage, GuardReason> {
    use CheckoutEvent::*;
    use CheckoutStage::*;

    match (stage, event) {
        (Customer, Next) => {
            if ctx.customer_chosen {
                Ok(Payment)
            } else {
                Err(GuardReason::NoCustomerSelected)
            }
        }

        (Payment, Next) => {
            if ctx.payment_method.is_cash() {
                // The guard IS the settlement calculation: cash may only
                // proceed once nothing would remain outstanding.
                let settlement = Settlement::for_method(
                    ctx.payment_method,
                    Money::from_paise(ctx.grand_total_paise),
                    ctx.received_paise.map(Money::from_paise),
                );
                if settlement.is_settled() {
                    Ok(Summary)
                } else {
                    Err(GuardReason::InsufficientCashTendered {
                        required_paise: ctx.grand_total_paise,
                        received_paise: ctx.received_paise.unwrap_or(0),
                    })
                }
            } else {
                // Non-cash validation (transaction id format, bank choice)
                // is advisory only and never blocks the wizard.
                Ok(Summary)
            }
        }

        // Reaching the summary implies a valid settlement already exists.
        (Summary, Next) => Ok(Confirmed),

        (Payment, Back) => Ok(Customer),
        (Summary, Back) => Ok(Payment),
        (Customer, Back) => Err(GuardReason::AtFirstStage),

        (Confirmed, _) => Err(GuardReason::Terminal),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
