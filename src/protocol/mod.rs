//! Protocol Module
//!
//! Operations accepted by the admin surface and the shapes of their results.
//!
//! ## Routes
//! ```text
//! GET       /getBuckets                     -> ["name", ...]
//! GET       /getEntries?buck=B              -> [{"key":..,"value":..}, ...]
//! GET|POST  /setBucket   bucket             -> {"success":true}
//! GET|POST  /delBucket   bucket             -> {"success":true}
//! GET|POST  /setEntry    bucket,key,value   -> {"success":true}
//! GET|POST  /delEntry    bucket,key         -> {"success":true}
//! GET|POST  /exit                           -> {"success":true}
//! ```
//!
//! ### Error Body
//! ```text
//! {"error": {"code": "BUCKET_NOT_FOUND", "message": "..."}}
//! ```

mod command;
mod response;

pub use command::{
    BucketParams, EntriesQuery, EntryParams, KeyParams, Operation, OperationType, Outcome,
};
pub use response::{BucketList, EntryList, EntryView, ErrorBody, ErrorResponse, StatusResponse};
