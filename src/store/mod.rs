//! Store Module
//!
//! Store-access layer over the single store file.
//!
//! ## Components
//! - `StoreHandle`: acquire/release of the store file
//! - `Txn` / `with_transaction`: one transaction per operation
//! - Bucket catalog and entry operations are `impl Store` blocks in
//!   `crate::catalog` and `crate::entries`
//!
//! ## Flow
//! ```text
//! operation ──▶ with_transaction(mode) ──▶ acquire ──▶ begin
//!                     │                                   │
//!                     │            unit of work ◀─────────┘
//!                     ▼
//!              commit | abort ──▶ release ──▶ result
//! ```

mod handle;
mod txn;

pub use handle::{StoreHandle, StoreRef};
pub use txn::{Txn, TxnMode};
pub(crate) use txn::bucket_table;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Entry point to all administrative operations
#[derive(Debug)]
pub struct Store {
    handle: StoreHandle,
}

impl Store {
    /// Open a store as described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            handle: StoreHandle::new(config)?,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified store file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().db_path(path.as_ref()).build();
        Self::open(&config)
    }

    pub fn handle(&self) -> &StoreHandle {
        &self.handle
    }
}
