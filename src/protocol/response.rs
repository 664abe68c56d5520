//! Response definitions
//!
//! JSON shapes returned to clients.

use serde::{Deserialize, Serialize};

use crate::entries::Entry;
use crate::error::StoreError;

/// Bucket names, serialized as a bare JSON array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketList {
    pub names: Vec<String>,
}

impl From<Vec<String>> for BucketList {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

/// One entry as shown in the UI (bytes rendered as UTF-8, lossy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            key: String::from_utf8_lossy(&entry.key).into_owned(),
            value: String::from_utf8_lossy(&entry.value).into_owned(),
        }
    }
}

/// Entries of one bucket, serialized as a bare JSON array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList {
    pub entries: Vec<EntryView>,
}

impl From<Vec<Entry>> for EntryList {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            entries: entries.into_iter().map(EntryView::from).collect(),
        }
    }
}

/// Acknowledgement for mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error envelope: `{"error": {"code", "message"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Parameters could not be extracted from the request
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: "INVALID_REQUEST".to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<&StoreError> for ErrorResponse {
    fn from(err: &StoreError) -> Self {
        Self {
            error: ErrorBody {
                code: error_code(err).to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Stable error code for clients
fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::BucketNotFound(_) => "BUCKET_NOT_FOUND",
        StoreError::BucketExists(_) => "BUCKET_EXISTS",
        StoreError::InvalidName => "INVALID_NAME",
        StoreError::InvalidKey => "INVALID_KEY",
        StoreError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        StoreError::TxnFailed(_) => "TXN_FAILED",
        StoreError::Io(_) | StoreError::Config(_) | StoreError::Network(_) => "INTERNAL",
    }
}
