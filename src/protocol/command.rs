//! Operation definitions
//!
//! Represents requests from the admin surface and their dispatch.

use serde::Deserialize;

use crate::entries::Entry;
use crate::error::Result;
use crate::store::Store;

/// Operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    ListBuckets,
    ListEntries,
    CreateBucket,
    DeleteBucket,
    SetEntry,
    DeleteEntry,
}

/// A parsed administrative operation
#[derive(Debug, Clone)]
pub enum Operation {
    /// Enumerate bucket names
    ListBuckets,

    /// Enumerate entries of one bucket
    ListEntries { bucket: String },

    /// Create an empty bucket
    CreateBucket { bucket: String },

    /// Delete a bucket and its entries
    DeleteBucket { bucket: String },

    /// Upsert an entry
    SetEntry {
        bucket: String,
        key: Vec<u8>,
        value: Vec<u8>,
    },

    /// Delete an entry
    DeleteEntry { bucket: String, key: Vec<u8> },
}

impl Operation {
    /// Get the operation type
    pub fn operation_type(&self) -> OperationType {
        match self {
            Operation::ListBuckets => OperationType::ListBuckets,
            Operation::ListEntries { .. } => OperationType::ListEntries,
            Operation::CreateBucket { .. } => OperationType::CreateBucket,
            Operation::DeleteBucket { .. } => OperationType::DeleteBucket,
            Operation::SetEntry { .. } => OperationType::SetEntry,
            Operation::DeleteEntry { .. } => OperationType::DeleteEntry,
        }
    }
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Buckets(Vec<String>),
    Entries(Vec<Entry>),
    Done,
}

impl Store {
    /// Execute an operation
    ///
    /// Routes operations to the catalog and entry handlers; each runs in
    /// exactly one transaction.
    pub fn execute(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::ListBuckets => self.list_buckets().map(Outcome::Buckets),
            Operation::ListEntries { bucket } => self.list_entries(&bucket).map(Outcome::Entries),
            Operation::CreateBucket { bucket } => {
                self.create_bucket(&bucket)?;
                Ok(Outcome::Done)
            }
            Operation::DeleteBucket { bucket } => {
                self.delete_bucket(&bucket)?;
                Ok(Outcome::Done)
            }
            Operation::SetEntry { bucket, key, value } => {
                self.set_entry(&bucket, &key, &value)?;
                Ok(Outcome::Done)
            }
            Operation::DeleteEntry { bucket, key } => {
                self.delete_entry(&bucket, &key)?;
                Ok(Outcome::Done)
            }
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// `?buck=` for `/getEntries`
#[derive(Debug, Clone, Deserialize)]
pub struct EntriesQuery {
    #[serde(alias = "bucket")]
    pub buck: String,
}

/// `bucket` for `/setBucket` and `/delBucket`
#[derive(Debug, Clone, Deserialize)]
pub struct BucketParams {
    pub bucket: String,
}

/// `bucket`, `key`, `value` for `/setEntry`
#[derive(Debug, Clone, Deserialize)]
pub struct EntryParams {
    pub bucket: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// `bucket`, `key` for `/delEntry`
#[derive(Debug, Clone, Deserialize)]
pub struct KeyParams {
    pub bucket: String,
    pub key: String,
}

impl From<EntriesQuery> for Operation {
    fn from(q: EntriesQuery) -> Self {
        Operation::ListEntries { bucket: q.buck }
    }
}

impl From<EntryParams> for Operation {
    fn from(p: EntryParams) -> Self {
        Operation::SetEntry {
            bucket: p.bucket,
            key: p.key.into_bytes(),
            value: p.value.into_bytes(),
        }
    }
}

impl From<KeyParams> for Operation {
    fn from(p: KeyParams) -> Self {
        Operation::DeleteEntry {
            bucket: p.bucket,
            key: p.key.into_bytes(),
        }
    }
}
