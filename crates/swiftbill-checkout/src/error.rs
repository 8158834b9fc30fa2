//! # Checkout Error Types
//!
//! What can go wrong while driving the wizard. A blocked transition keeps
//! the session exactly where it was; nothing is partially applied.

use thiserror::Error;

use swiftbill_core::error::CoreError;

use crate::stage::{CheckoutEvent, CheckoutStage, GuardReason};

/// Errors surfaced by the checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A stage transition was attempted without satisfying its guard.
    /// The UI stays on the current stage and shows the reason.
    #[error("cannot {event:?} from stage {}: {reason}", .stage.as_str())]
    GuardViolation {
        stage: CheckoutStage,
        event: CheckoutEvent,
        reason: GuardReason,
    },

    /// Checkout needs at least one cart line.
    #[error("cart is empty; nothing to check out")]
    EmptyCart,

    /// A mutation was attempted after confirmation. The session is frozen
    /// once stage 4 is reached; start a new checkout instead.
    #[error("checkout is confirmed; the session is frozen")]
    SessionConfirmed,

    /// A core computation rejected the input (invalid line item, bad
    /// discount) or failed its internal consistency check
    /// (reconciliation).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_violation_message_names_stage_and_reason() {
        let err = CheckoutError::GuardViolation {
            stage: CheckoutStage::Customer,
            event: CheckoutEvent::Next,
            reason: GuardReason::NoCustomerSelected,
        };
        let msg = err.to_string();
        assert!(msg.contains("customer"));
        assert!(msg.contains("walk-in"));
    }

    #[test]
    fn test_core_errors_pass_through_transparently() {
        let core = CoreError::InvalidLineItem {
            item_id: "x".to_string(),
            reason: "quantity must be positive".to_string(),
        };
        let err: CheckoutError = core.into();
        assert_eq!(
            err.to_string(),
            "Invalid line item x: quantity must be positive"
        );
    }
}
