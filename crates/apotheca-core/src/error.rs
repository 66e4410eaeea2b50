//! # Error Types
//!
//! Domain-specific error types for apotheca-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  apotheca-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Per-field input validation failures            │
//! │                                                                         │
//! │  apotheca-store errors (separate crate)                                │
//! │  └── StoreError       - Document read/write failures                   │
//! │                                                                         │
//! │  Command errors (terminal app)                                         │
//! │  └── CommandError     - What the menu shows (code + message)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CommandError → Menu               │
//! │                          StoreError ↗                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the failing action is aborted and the
//! in-memory state is left exactly as it was.

use thiserror::Error;

use crate::types::PeriodKey;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product with this code is already in the catalog.
    #[error("Product code '{0}' already exists")]
    DuplicateProductCode(String),

    /// A numeric field could not be parsed at all.
    ///
    /// ## When This Occurs
    /// - Price typed as "five"
    /// - Quantity typed as "3.5" or left blank
    #[error("Invalid {field}: '{input}' is not a valid number")]
    InvalidNumericInput { field: String, input: String },

    /// Product code is not in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Insufficient stock to fulfil a cart line.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (A100 × 25)
    ///      │
    ///      ▼
    /// Check stock: available=20
    ///      │
    ///      ▼
    /// InsufficientStock { code: "A100", available: 20, requested: 25 }
    ///      │
    ///      ▼
    /// Menu shows: "Insufficient stock for A100: available 20, requested 25"
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: u32,
        requested: u64,
    },

    /// Checkout was attempted with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A line amount, sale total or running total no longer fits in cents.
    ///
    /// ## When This Occurs
    /// - Price typed as "92233720368547758" and two units added to the cart
    /// - A month's revenue reaching the `i64` limit
    #[error("Total is too large to record")]
    TotalOverflow,

    /// No monthly aggregate exists for the requested period.
    #[error("No data available for {0}")]
    NoDataForPeriod(PeriodKey),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidNumericInput error.
    pub fn invalid_number(field: impl Into<String>, input: impl Into<String>) -> Self {
        CoreError::InvalidNumericInput {
            field: field.into(),
            input: input.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the offending field so the user is told exactly which
/// input to fix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. bad period, too many decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "A100".to_string(),
            available: 20,
            requested: 25,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for A100: available 20, requested 25"
        );

        let err = CoreError::NoDataForPeriod(PeriodKey::new(2026, 3).unwrap());
        assert_eq!(err.to_string(), "No data available for 2026-03");

        assert_eq!(CoreError::TotalOverflow.to_string(), "Total is too large to record");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");

        let err = ValidationError::Negative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
