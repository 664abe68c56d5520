//! Transaction Executor
//!
//! Wraps exactly one unit of work in one transaction: commit on success,
//! abort on failure. Nothing written inside a failed unit is ever visible.

use redb::{Database, ReadTransaction, TableDefinition, WriteTransaction};

use super::Store;
use crate::error::{Result, StoreError};

/// Table layout of every bucket: raw key bytes to raw value bytes
pub(crate) type BucketTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

/// Table definition for `name`
///
/// An empty name never names a bucket (the engine asserts on it).
pub(crate) fn bucket_table(name: &str) -> Result<BucketTable<'_>> {
    if name.is_empty() {
        return Err(StoreError::BucketNotFound(name.to_string()));
    }
    Ok(TableDefinition::new(name))
}

/// Transaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnMode {
    ReadOnly,
    ReadWrite,
}

/// Transaction-scoped accessor handed to a unit of work
///
/// Bucket and entry accessors live in `catalog` and `entries`.
pub enum Txn {
    Read(ReadTransaction),
    Write(WriteTransaction),
}

impl Txn {
    fn begin(db: &Database, mode: TxnMode) -> Result<Self> {
        Ok(match mode {
            TxnMode::ReadOnly => Txn::Read(db.begin_read()?),
            TxnMode::ReadWrite => Txn::Write(db.begin_write()?),
        })
    }

    pub fn mode(&self) -> TxnMode {
        match self {
            Txn::Read(_) => TxnMode::ReadOnly,
            Txn::Write(_) => TxnMode::ReadWrite,
        }
    }

    /// The write transaction, or `TxnFailed` inside a read-only unit
    pub(crate) fn writer(&self) -> Result<&WriteTransaction> {
        match self {
            Txn::Write(txn) => Ok(txn),
            Txn::Read(_) => Err(StoreError::TxnFailed(
                "write attempted in a read-only transaction".to_string(),
            )),
        }
    }

    /// Commit (read-write) or close (read-only)
    fn finish(self) -> Result<()> {
        match self {
            Txn::Read(txn) => drop(txn),
            Txn::Write(txn) => txn.commit()?,
        }
        Ok(())
    }

    /// Discard every write made in this transaction
    fn abort(self, cause: &StoreError) {
        match self {
            Txn::Read(txn) => drop(txn),
            Txn::Write(txn) => {
                tracing::warn!("Aborting write transaction: {}", cause);
                if let Err(e) = txn.abort() {
                    tracing::warn!("Abort reported an error: {}", e);
                }
            }
        }
    }
}

impl Store {
    /// Run `work` inside one transaction of the requested mode
    ///
    /// Acquires the store, opens the transaction, runs the unit of work, then
    /// commits/closes on `Ok` or aborts on `Err`. The store is released on
    /// every path before returning.
    pub fn with_transaction<R, F>(&self, mode: TxnMode, work: F) -> Result<R>
    where
        F: FnOnce(&Txn) -> Result<R>,
    {
        let store = self.handle.acquire()?;
        let txn = Txn::begin(store.database(), mode)?;
        tracing::trace!("Opened {:?} transaction", mode);

        let result = match work(&txn) {
            Ok(value) => txn.finish().map(|()| value),
            Err(err) => {
                txn.abort(&err);
                Err(err)
            }
        };

        self.handle.release(store);
        result
    }
}
