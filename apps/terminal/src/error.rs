//! # Command Error Type
//!
//! Unified error type for the command layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Apotheca POS                           │
//! │                                                                         │
//! │  Menu / any front end          Command layer                            │
//! │  ────────────────────          ─────────────                            │
//! │                                                                         │
//! │  commands::sale::checkout(&mut state)                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, CommandError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Business rule? ─── CoreError::InsufficientStock ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Disk write? ───── StoreError::WriteFailed ──── CommandError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  In-memory state is unchanged whenever an error comes back.            │
//! │  The menu prints the message and returns to the main menu.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors carry a machine-readable `code` next to the human-readable
//! `message`, so a non-terminal front end can branch on the code.

use serde::Serialize;

use crate::config::ConfigError;
use apotheca_core::{CoreError, ValidationError};
use apotheca_store::StoreError;

/// Error returned from command functions.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for A100: available 20, requested 25"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product code already in the catalog
    DuplicateProductCode,

    /// Price or quantity text is not a number
    InvalidNumericInput,

    /// A field failed its validation rule
    ValidationError,

    /// Product code not in the catalog
    UnknownProduct,

    /// Not enough units on hand
    InsufficientStock,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// An amount or total too large to hold in cents
    TotalOverflow,

    /// Monthly report for a month without sales
    NoDataForPeriod,

    /// A document could not be written; data may not be saved
    PersistenceWriteFailure,

    /// Anything else (unreadable documents, internal faults)
    Internal,
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }

    /// True when the failure means data may not have reached disk.
    pub fn is_persistence_failure(&self) -> bool {
        self.code == ErrorCode::PersistenceWriteFailure
    }
}

/// Converts core errors to command errors.
impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::DuplicateProductCode(_) => ErrorCode::DuplicateProductCode,
            CoreError::InvalidNumericInput { .. } => ErrorCode::InvalidNumericInput,
            CoreError::UnknownProduct(_) => ErrorCode::UnknownProduct,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::TotalOverflow => ErrorCode::TotalOverflow,
            CoreError::NoDataForPeriod(_) => ErrorCode::NoDataForPeriod,
            CoreError::Validation(e) => return CommandError::validation(e.to_string()),
        };
        CommandError::new(code, message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

/// Converts store errors to command errors.
impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        if err.is_write_failure() {
            tracing::error!("Persistence failed: {}", err);
            CommandError::new(
                ErrorCode::PersistenceWriteFailure,
                format!("Data may not be saved: {}", err),
            )
        } else {
            tracing::error!("Store error: {}", err);
            CommandError::internal(err.to_string())
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

// =============================================================================
// Startup Errors
// =============================================================================

/// Errors that stop the application.
///
/// ## When This Occurs
/// - The config file is unreadable or holds an invalid value
/// - A data document is corrupt at startup
/// - The terminal itself fails (closed stdout)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not load data: {0}")]
    Store(#[from] StoreError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
