//! Network Module
//!
//! HTTP front end for the admin UI.
//!
//! ## Architecture
//! - axum router on a tokio runtime
//! - Store calls run on the blocking pool (they may wait for the writer)
//! - Everything that is not an API route is served from the static directory

mod handlers;
mod server;

pub use handlers::ServerState;
pub use server::{router, Server};
