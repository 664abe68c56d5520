//! Error types for BucketView
//!
//! Every store operation returns a typed failure; nothing in the library
//! terminates the process.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for BucketView operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Store Handle Errors
    // -------------------------------------------------------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    // -------------------------------------------------------------------------
    // Bucket / Entry Errors
    // -------------------------------------------------------------------------
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Bucket already exists: {0}")]
    BucketExists(String),

    #[error("Invalid bucket name: name must not be empty")]
    InvalidName,

    #[error("Invalid key: key must not be empty")]
    InvalidKey,

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("Transaction failed: {0}")]
    TxnFailed(String),

    // -------------------------------------------------------------------------
    // I/O, Network and Configuration Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Expected conditions a caller can act on, as opposed to store faults
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::BucketNotFound(_)
                | StoreError::BucketExists(_)
                | StoreError::InvalidName
                | StoreError::InvalidKey
        )
    }
}

// =============================================================================
// Engine Error Conversions
// =============================================================================

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::StoreUnavailable(err.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::TxnFailed(err.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::TxnFailed(err.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::TxnFailed(err.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::TxnFailed(err.to_string())
    }
}
