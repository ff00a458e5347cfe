//! # Error Types
//!
//! Domain errors for the ledger engine.
//!
//! Every ledger-mutation failure is synchronous and local: the operation
//! rejects, collections stay unchanged, the operator corrects the input and
//! resubmits. There is no retry and no partial-commit rollback because each
//! mutation is a single atomic in-memory update.

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Ledger engine errors: missing references, invariant violations, and
/// rejected input.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Referenced product id is not in inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Referenced sale invoice does not exist.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Referenced client tenant does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Sale quantity exceeds on-hand stock.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Return quantity exceeds the sale line's remaining returnable amount.
    #[error(
        "Return for {product} exceeds remaining returnable quantity: \
         remaining {remaining}, requested {requested}"
    )]
    ReturnExceedsRemaining {
        product: String,
        remaining: i64,
        requested: i64,
    },

    /// A cash session is already open for this shop.
    #[error("A cash session is already open")]
    SessionAlreadyOpen,

    /// The operation needs an open cash session.
    #[error("No open cash session")]
    SessionNotOpen,

    /// A sale needs at least one line item.
    #[error("Sale must contain at least one item")]
    EmptySale,

    /// Input validation failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (phone digits, numeric shape, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            product: "Rice".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rice: available 3, requested 5"
        );

        let err = LedgerError::SaleNotFound("SALE-2026-00007".to_string());
        assert_eq!(err.to_string(), "Sale not found: SALE-2026-00007");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let ledger_err: LedgerError = validation_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
    }
}
