//! Entry Operations
//!
//! Enumerate, write and delete key/value pairs inside a named bucket.
//! Values are only read through a full bucket scan.

use redb::{ReadableTable, TableError};

use crate::error::{Result, StoreError};
use crate::store::{bucket_table, Store, Txn, TxnMode};

/// A key/value pair read from a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Entry {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Scan a table in ascending key order
fn collect_entries<T>(table: &T) -> Result<Vec<Entry>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut entries = Vec::new();
    for item in table.iter()? {
        let (key, value) = item?;
        entries.push(Entry::new(key.value(), value.value()));
    }
    Ok(entries)
}

// =============================================================================
// Transaction-scoped accessors
// =============================================================================

impl Txn {
    /// All entries of `bucket`, ascending by key
    pub fn entries(&self, bucket: &str) -> Result<Vec<Entry>> {
        match self {
            Txn::Read(txn) => match txn.open_table(bucket_table(bucket)?) {
                Ok(table) => collect_entries(&table),
                Err(TableError::TableDoesNotExist(_)) => {
                    Err(StoreError::BucketNotFound(bucket.to_string()))
                }
                Err(e) => Err(e.into()),
            },
            Txn::Write(txn) => {
                self.require_bucket(bucket)?;
                let table = txn.open_table(bucket_table(bucket)?)?;
                collect_entries(&table)
            }
        }
    }

    /// Insert or overwrite `key` in an existing bucket
    pub fn put_entry(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }
        let txn = self.writer()?;
        self.require_bucket(bucket)?;

        let mut table = txn.open_table(bucket_table(bucket)?)?;
        table.insert(key, value)?;
        Ok(())
    }

    /// Remove `key` from an existing bucket; absent keys are not an error
    pub fn remove_entry(&self, bucket: &str, key: &[u8]) -> Result<()> {
        let txn = self.writer()?;
        self.require_bucket(bucket)?;

        let mut table = txn.open_table(bucket_table(bucket)?)?;
        table.remove(key)?;
        Ok(())
    }
}

// =============================================================================
// Operations
// =============================================================================

impl Store {
    /// List every entry in `bucket` (read-only transaction)
    ///
    /// Fails with `BucketNotFound` rather than returning an empty list.
    pub fn list_entries(&self, bucket: &str) -> Result<Vec<Entry>> {
        self.with_transaction(TxnMode::ReadOnly, |txn| txn.entries(bucket))
    }

    /// Upsert one entry
    pub fn set_entry(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<()> {
        tracing::debug!(bucket, key = %String::from_utf8_lossy(key), "set entry");
        self.with_transaction(TxnMode::ReadWrite, |txn| txn.put_entry(bucket, key, value))
    }

    /// Delete one entry (idempotent)
    pub fn delete_entry(&self, bucket: &str, key: &[u8]) -> Result<()> {
        tracing::debug!(bucket, key = %String::from_utf8_lossy(key), "delete entry");
        self.with_transaction(TxnMode::ReadWrite, |txn| txn.remove_entry(bucket, key))
    }
}
