//! # Settlement Calculator
//!
//! Given the grand total and what the customer tendered, computes the
//! change due (cash) or the outstanding balance (credit/partial payment).
//!
//! Exactly one of change/balance is non-zero at a time, and
//! `change − balance == received − grand_total` always.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::PaymentMethod;

// =============================================================================
// Settlement
// =============================================================================

/// The reconciled money movement of one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    /// Payable amount in paise.
    pub grand_total_paise: i64,

    /// Amount received from the customer in paise.
    pub received_paise: i64,

    /// Change due back to the customer in paise:
    /// `max(0, received − grand_total)`.
    pub change_paise: i64,

    /// Outstanding balance in paise: `max(0, grand_total − received)`.
    pub balance_paise: i64,
}

impl Settlement {
    /// Computes a settlement from the payable total and the received
    /// amount.
    ///
    /// ## Example
    /// ```rust
    /// use swiftbill_core::money::Money;
    /// use swiftbill_core::settlement::Settlement;
    ///
    /// let s = Settlement::compute(Money::from_paise(118000), Money::from_paise(120000));
    /// assert_eq!(s.change_paise, 2000);
    /// assert_eq!(s.balance_paise, 0);
    /// ```
    pub fn compute(grand_total: Money, received: Money) -> Settlement {
        Settlement {
            grand_total_paise: grand_total.paise(),
            received_paise: received.paise(),
            change_paise: (received - grand_total).paise().max(0),
            balance_paise: (grand_total - received).paise().max(0),
        }
    }

    /// Computes a settlement applying the per-method tender defaults.
    ///
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Method   Received when no tender entered                           │
    /// │  ──────   ─────────────────────────────────                         │
    /// │  cash     0 (cashier must enter the tendered notes)                 │
    /// │  upi      grand total (full settlement, no partial concept)         │
    /// │  card     grand total                                               │
    /// │  bank     grand total                                               │
    /// │  credit   0 — ALWAYS, even if a tender was entered: the sale is     │
    /// │           recorded as fully outstanding. Deliberate, not a bug.     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn for_method(
        method: PaymentMethod,
        grand_total: Money,
        received: Option<Money>,
    ) -> Settlement {
        let received = match method {
            PaymentMethod::Credit => Money::zero(),
            _ if method.settles_in_full() => received.unwrap_or(grand_total),
            _ => received.unwrap_or(Money::zero()),
        };
        Settlement::compute(grand_total, received)
    }

    /// True once the bill is fully covered (nothing outstanding).
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.balance_paise == 0
    }

    /// Returns the change as Money.
    #[inline]
    pub fn change(&self) -> Money {
        Money::from_paise(self.change_paise)
    }

    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_paise(self.balance_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tender_settles_with_no_change() {
        let s = Settlement::compute(Money::from_paise(118000), Money::from_paise(118000));
        assert_eq!(s.change_paise, 0);
        assert_eq!(s.balance_paise, 0);
        assert!(s.is_settled());
    }

    #[test]
    fn test_overpayment_returns_change() {
        let s = Settlement::compute(Money::from_paise(118000), Money::from_paise(120000));
        assert_eq!(s.change_paise, 2000);
        assert_eq!(s.balance_paise, 0);
    }

    #[test]
    fn test_underpayment_leaves_balance() {
        let s = Settlement::compute(Money::from_paise(118000), Money::from_paise(100000));
        assert_eq!(s.change_paise, 0);
        assert_eq!(s.balance_paise, 18000);
        assert!(!s.is_settled());
    }

    #[test]
    fn test_at_most_one_side_nonzero_and_delta_identity() {
        // change − balance == received − grand_total, for all received ≥ 0
        let grand = Money::from_paise(26300);
        for received in [0, 10000, 26299, 26300, 26301, 50000] {
            let s = Settlement::compute(grand, Money::from_paise(received));
            assert!(s.change_paise == 0 || s.balance_paise == 0);
            assert_eq!(
                s.change_paise - s.balance_paise,
                received - grand.paise()
            );
        }
    }

    #[test]
    fn test_electronic_methods_default_to_full_settlement() {
        for method in [PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::Bank] {
            let s = Settlement::for_method(method, Money::from_paise(26300), None);
            assert_eq!(s.received_paise, 26300);
            assert!(s.is_settled());
        }
    }

    #[test]
    fn test_cash_without_tender_is_fully_outstanding() {
        let s = Settlement::for_method(PaymentMethod::Cash, Money::from_paise(26300), None);
        assert_eq!(s.received_paise, 0);
        assert_eq!(s.balance_paise, 26300);
    }

    #[test]
    fn test_cash_tender_passes_through() {
        let s = Settlement::for_method(
            PaymentMethod::Cash,
            Money::from_paise(26300),
            Some(Money::from_paise(30000)),
        );
        assert_eq!(s.change_paise, 3700);
    }

    #[test]
    fn test_credit_records_full_balance_even_with_tender() {
        let s = Settlement::for_method(
            PaymentMethod::Credit,
            Money::from_paise(26300),
            Some(Money::from_paise(26300)),
        );
        assert_eq!(s.received_paise, 0);
        assert_eq!(s.balance_paise, 26300);
        assert_eq!(s.change_paise, 0);
    }

    #[test]
    fn test_zero_bill_settles_trivially() {
        let s = Settlement::compute(Money::zero(), Money::zero());
        assert_eq!(s.change_paise, 0);
        assert_eq!(s.balance_paise, 0);
        assert!(s.is_settled());
    }
}
