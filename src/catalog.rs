//! Bucket Catalog
//!
//! Enumerate, create and delete top-level buckets.

use redb::TableHandle;

use crate::error::{Result, StoreError};
use crate::store::{bucket_table, Store, Txn, TxnMode};

// =============================================================================
// Transaction-scoped accessors
// =============================================================================

impl Txn {
    /// Names of all buckets, in the engine's (lexicographic) order
    pub fn bucket_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = match self {
            Txn::Read(txn) => txn.list_tables()?.map(|t| t.name().to_string()).collect(),
            Txn::Write(txn) => txn.list_tables()?.map(|t| t.name().to_string()).collect(),
        };
        Ok(names)
    }

    /// Checks the listing rather than opening the table: opening a table
    /// inside a write transaction creates it.
    pub fn bucket_exists(&self, name: &str) -> Result<bool> {
        Ok(self.bucket_names()?.iter().any(|n| n == name))
    }

    pub(crate) fn require_bucket(&self, name: &str) -> Result<()> {
        if self.bucket_exists(name)? {
            Ok(())
        } else {
            Err(StoreError::BucketNotFound(name.to_string()))
        }
    }

    /// Allocate a new empty bucket
    pub fn create_bucket(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        let txn = self.writer()?;
        if self.bucket_exists(name)? {
            return Err(StoreError::BucketExists(name.to_string()));
        }
        txn.open_table(bucket_table(name)?)?;
        Ok(())
    }

    /// Remove a bucket together with all of its entries
    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        let txn = self.writer()?;
        if !txn.delete_table(bucket_table(name)?)? {
            return Err(StoreError::BucketNotFound(name.to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Operations
// =============================================================================

impl Store {
    /// List all bucket names (read-only transaction)
    pub fn list_buckets(&self) -> Result<Vec<String>> {
        self.with_transaction(TxnMode::ReadOnly, |txn| txn.bucket_names())
    }

    /// Create an empty bucket
    ///
    /// Fails with `BucketExists` if present, `InvalidName` if `name` is empty.
    pub fn create_bucket(&self, name: &str) -> Result<()> {
        tracing::debug!(bucket = name, "create bucket");
        self.with_transaction(TxnMode::ReadWrite, |txn| txn.create_bucket(name))
    }

    /// Delete a bucket and every entry in it. Irreversible.
    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        tracing::debug!(bucket = name, "delete bucket");
        self.with_transaction(TxnMode::ReadWrite, |txn| txn.delete_bucket(name))
    }
}
