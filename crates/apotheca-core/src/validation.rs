//! # Validation Module
//!
//! Field validation and parsing of user-typed numbers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu prompt (apps/terminal)                                  │
//! │  └── Raw text, trimmed                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_price / parse_integer  → InvalidNumericInput                │
//! │  └── validate_*                   → one ValidationError per field      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory                                                    │
//! │  ├── Duplicate codes                                                   │
//! │  └── Stock availability                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use apotheca_core::validation::{parse_price, validate_code};
//!
//! validate_code("A100").unwrap();
//! assert_eq!(parse_price("5.00").unwrap().cents(), 500);
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, ParseMoneyError};
use crate::{MAX_CODE_LENGTH, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, numbers, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use apotheca_core::validation::validate_code;
///
/// assert!(validate_code("A100").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("has space").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero and negative prices are rejected.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an on-hand stock level and narrows it to `u32`.
///
/// Zero is allowed: a product may be listed before any stock arrives.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: u32::MAX as i64,
    })
}

/// Validates a quantity being sold or received and narrows it to `u32`.
///
/// ## User Workflow
/// ```text
/// Make Sale: "Quantity: 0"
///      │
///      ▼
/// validate_quantity(0) ← THIS FUNCTION
///      │
///      ├── qty <= 0?        → "quantity must be positive"
///      ├── qty > u32::MAX?  → "quantity must be between 1 and ..."
///      └── OK               → Cart::add_line
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: u32::MAX as i64,
    })
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a typed price.
///
/// Text that is not a number at all becomes `InvalidNumericInput`; a number
/// with more than two decimals becomes a format error on `price`.
/// Positivity is left to [`validate_price`].
pub fn parse_price(input: &str) -> CoreResult<Money> {
    input.parse::<Money>().map_err(|e| match e {
        ParseMoneyError::NotANumber => CoreError::invalid_number("price", input.trim()),
        ParseMoneyError::TooManyDecimals => ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "at most 2 decimal places".to_string(),
        }
        .into(),
    })
}

/// Parses a typed whole number for `field`.
///
/// ```rust
/// use apotheca_core::validation::parse_integer;
///
/// assert_eq!(parse_integer("quantity", " 20 ").unwrap(), 20);
/// assert!(parse_integer("quantity", "2.5").is_err());
/// ```
pub fn parse_integer(field: &str, input: &str) -> CoreResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::invalid_number(field, input.trim()))
}

// =============================================================================
// Unit Tests
// =============================================================================
