//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ├── at startup  ──► fatal, process exits with the message        │
//! │       │                                                                 │
//! │       └── after a sale ──► CommandError(PERSISTENCE_WRITE_FAILURE)     │
//! │                            "data may not be saved"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use apotheca_core::ValidationError;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document exists but could not be read.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Directory listed where a file was expected
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document or directory could not be written.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Data directory removed or made read-only while running
    /// - Rename of `<file>.tmp` over `<file>` refused
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document was read but is not valid JSON of the expected shape.
    #[error("Corrupt document {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document parsed but holds a value that breaks a domain rule.
    ///
    /// ## When This Occurs
    /// - A sale whose total is not the sum of its lines
    /// - A sale with no lines
    #[error("Invalid document {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    /// A value could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a ReadFailed error for `path`.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a WriteFailed error for `path`.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a Corrupt error for `path`.
    pub fn corrupt(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        StoreError::Corrupt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an Invalid error for `path`.
    pub fn invalid(path: impl AsRef<Path>, source: ValidationError) -> Self {
        StoreError::Invalid {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for failures that happened while saving.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            StoreError::WriteFailed { .. } | StoreError::Serialization(_)
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
