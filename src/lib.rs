//! # BucketView
//!
//! Administrative front end for a single-file, bucketed key-value store:
//! - List, create and delete buckets
//! - List, upsert and delete entries inside a bucket
//! - One transaction per operation, committed in full or not at all
//! - HTTP surface plus static assets for a browser UI
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              HTTP Server / CLI (adapters)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Operation
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Bucket Catalog  |  Entry Operations              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Transaction Executor                        │
//! │        (ReadOnly: snapshot | ReadWrite: single writer)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                ┌──────▼──────┐
//!                │ Store Handle│──▶ store file (redb)
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod catalog;
pub mod entries;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, ConnectionMode};
pub use entries::Entry;
pub use store::{Store, Txn, TxnMode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of BucketView
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
