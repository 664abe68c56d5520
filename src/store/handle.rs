//! Store Handle
//!
//! Owns the lifecycle of the connection to the store file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError};

use crate::config::{Config, ConnectionMode};
use crate::error::{Result, StoreError};

/// Acquires and releases the store file
///
/// ## Modes
/// - `PerOperation`: `acquire()` opens the file, dropping the `StoreRef`
///   closes it. The engine holds an exclusive file lock while open, so a
///   concurrent acquisition waits for the holder (up to `acquire_timeout`).
/// - `Shared`: the file is opened once in `new()`; every `acquire()` hands
///   out the same database and the engine arbitrates readers and writers.
pub struct StoreHandle {
    path: PathBuf,
    mode: ConnectionMode,
    acquire_timeout: Duration,

    /// Present only in `Shared` mode
    shared: Option<Arc<Database>>,
}

impl StoreHandle {
    /// Polling interval while another holder has the file open
    const RETRY_INTERVAL: Duration = Duration::from_millis(5);

    /// Create a handle for the store file named in `config`
    ///
    /// In `Shared` mode the file is opened (and created if absent) here.
    pub fn new(config: &Config) -> Result<Self> {
        let shared = match config.connection_mode {
            ConnectionMode::PerOperation => None,
            ConnectionMode::Shared => Some(Arc::new(Database::create(&config.db_path)?)),
        };

        Ok(Self {
            path: config.db_path.clone(),
            mode: config.connection_mode,
            acquire_timeout: config.acquire_timeout(),
            shared,
        })
    }

    /// Acquire the store for one operation
    pub fn acquire(&self) -> Result<StoreRef> {
        let db = match &self.shared {
            Some(db) => Arc::clone(db),
            None => Arc::new(self.open_exclusive()?),
        };

        tracing::trace!("Acquired store {}", self.path.display());
        Ok(StoreRef {
            db,
            path: self.path.clone(),
        })
    }

    /// Release a previously acquired store
    pub fn release(&self, store: StoreRef) {
        drop(store);
    }

    /// Open the file, waiting while another holder has it open
    fn open_exclusive(&self) -> Result<Database> {
        let deadline = Instant::now() + self.acquire_timeout;

        loop {
            match Database::create(&self.path) {
                Ok(db) => return Ok(db),
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    if Instant::now() >= deadline {
                        return Err(StoreError::StoreUnavailable(format!(
                            "timed out after {:?} waiting for {}",
                            self.acquire_timeout,
                            self.path.display()
                        )));
                    }
                    thread::sleep(Self::RETRY_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// An acquired store, valid for the duration of one operation
///
/// Released on drop, so every exit path of the enclosing operation
/// gives the file back.
pub struct StoreRef {
    db: Arc<Database>,
    path: PathBuf,
}

impl StoreRef {
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Drop for StoreRef {
    fn drop(&mut self) {
        tracing::trace!("Released store {}", self.path.display());
    }
}
