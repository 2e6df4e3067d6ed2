//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger and reporting layers.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Keep this focused on the failure classes callers can act on: bad input
/// (never retried), dangling references, store outages (retry-safe), and
/// sequence contention. Presentation concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A value failed validation. Carries the offending field so callers can
    /// render a specific message.
    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// A referenced entity does not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The entity store could not be reached. Safe to retry.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A concurrent writer won a compare-and-swap race and internal retries
    /// were exhausted.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl LedgerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
