//! # Error Types
//!
//! Domain-specific error types for swiftbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swiftbill-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors (invalid lines, reconciliation)  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  swiftbill-checkout errors (separate crate)                            │
//! │  └── CheckoutError    - Blocked stage transitions, frozen sessions     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → caller/UI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item ID, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message — except
//!    `ReconciliationMismatch`, which is a programming error and must halt
//!    document generation instead of being shown as a retryable condition

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All variants are local and recoverable (rejected input) except
/// `ReconciliationMismatch`, which signals an internal inconsistency
/// between the resolver and the aggregator.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item failed resolution.
    ///
    /// ## When This Occurs
    /// - Non-positive quantity (never silently coerced to zero)
    /// - Malformed tax split: IGST combined with CGST/SGST on one line
    /// - Negative price or per-item discount
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 0)
    ///      │
    ///      ▼
    /// TaxResolver::resolve
    ///      │
    ///      ▼
    /// InvalidLineItem { item_id: "...", reason: "quantity must be positive" }
    ///      │
    ///      ▼
    /// UI keeps the line highlighted; nothing is billed
    /// ```
    #[error("Invalid line item {item_id}: {reason}")]
    InvalidLineItem { item_id: String, reason: String },

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// HSN bucket totals failed to reconstruct the pre-discount
    /// tax-inclusive total within tolerance.
    ///
    /// This is not a user-facing condition: it means the resolver and the
    /// aggregator disagree, i.e. a bug. Document generation must halt
    /// rather than emit an incorrect statutory summary.
    #[error(
        "HSN summary does not reconcile: buckets sum to {bucket_total_paise}, \
         expected {expected_paise} (tolerance {tolerance_paise})"
    )]
    ReconciliationMismatch {
        bucket_total_paise: i64,
        expected_paise: i64,
        tolerance_paise: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-numeric HSN code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidLineItem {
            item_id: "itm-42".to_string(),
            reason: "quantity must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item itm-42: quantity must be positive"
        );
    }

    #[test]
    fn test_reconciliation_message_carries_amounts() {
        let err = CoreError::ReconciliationMismatch {
            bucket_total_paise: 29100,
            expected_paise: 29200,
            tolerance_paise: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("29100"));
        assert!(msg.contains("29200"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "hsn_code".to_string(),
        };
        assert_eq!(err.to_string(), "hsn_code is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
