//! Ticket store error types

use thiserror::Error;

/// Errors that can occur in the ticket store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No live ticket with this id (never created, deleted, or expired)
    #[error("Ticket not found: {0}")]
    NotFound(String),

    /// Request payload rejected
    #[error("Invalid ticket: {0}")]
    Validation(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
