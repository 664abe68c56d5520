//! Request Handlers
//!
//! Extract parameters, run the operation on the blocking pool, serialize.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Extension, Form, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::sync::Notify;

use crate::error::{Result, StoreError};
use crate::protocol::{
    BucketList, BucketParams, EntriesQuery, EntryList, EntryParams, ErrorResponse, KeyParams,
    Operation, Outcome, StatusResponse,
};
use crate::store::Store;

/// State shared by all handlers
pub struct ServerState {
    pub store: Arc<Store>,

    /// Signalled by `/exit` to stop the server gracefully
    pub shutdown: Arc<Notify>,
}

impl ServerState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Execute an operation off the async runtime
    async fn run(&self, operation: Operation) -> Result<Outcome> {
        let store = Arc::clone(&self.store);
        let kind = operation.operation_type();

        match tokio::task::spawn_blocking(move || store.execute(operation)).await {
            Ok(result) => {
                if let Err(ref e) = result {
                    if e.is_recoverable() {
                        tracing::debug!("{:?} rejected: {}", kind, e);
                    } else {
                        tracing::error!("{:?} failed: {}", kind, e);
                    }
                }
                result
            }
            Err(e) => Err(StoreError::TxnFailed(format!("operation task failed: {}", e))),
        }
    }
}

/// HTTP status for a store failure
fn status_code(err: &StoreError) -> StatusCode {
    match err {
        StoreError::BucketNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::BucketExists(_) => StatusCode::CONFLICT,
        StoreError::InvalidName | StoreError::InvalidKey => StatusCode::BAD_REQUEST,
        StoreError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        StoreError::TxnFailed(_)
        | StoreError::Io(_)
        | StoreError::Config(_)
        | StoreError::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Missing or malformed request parameters
fn bad_request(rejection: impl std::fmt::Display) -> Response {
    tracing::debug!("Rejected request parameters: {}", rejection);
    let body = ErrorResponse::invalid_request(rejection.to_string());
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn respond(result: Result<Outcome>) -> Response {
    match result {
        Ok(Outcome::Buckets(names)) => Json(BucketList::from(names)).into_response(),
        Ok(Outcome::Entries(entries)) => Json(EntryList::from(entries)).into_response(),
        Ok(Outcome::Done) => Json(StatusResponse::ok()).into_response(),
        Err(e) => (status_code(&e), Json(ErrorResponse::from(&e))).into_response(),
    }
}

// =============================================================================
// Routes
// =============================================================================

pub async fn get_buckets(Extension(state): Extension<Arc<ServerState>>) -> Response {
    respond(state.run(Operation::ListBuckets).await)
}

pub async fn get_entries(
    Extension(state): Extension<Arc<ServerState>>,
    query: std::result::Result<Query<EntriesQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => respond(state.run(query.into()).await),
        Err(rejection) => bad_request(rejection),
    }
}

// `Form` reads the query string on GET and the url-encoded body on POST.

pub async fn set_bucket(
    Extension(state): Extension<Arc<ServerState>>,
    params: std::result::Result<Form<BucketParams>, FormRejection>,
) -> Response {
    match params {
        Ok(Form(params)) => {
            let op = Operation::CreateBucket {
                bucket: params.bucket,
            };
            respond(state.run(op).await)
        }
        Err(rejection) => bad_request(rejection),
    }
}

pub async fn del_bucket(
    Extension(state): Extension<Arc<ServerState>>,
    params: std::result::Result<Form<BucketParams>, FormRejection>,
) -> Response {
    match params {
        Ok(Form(params)) => {
            let op = Operation::DeleteBucket {
                bucket: params.bucket,
            };
            respond(state.run(op).await)
        }
        Err(rejection) => bad_request(rejection),
    }
}

pub async fn set_entry(
    Extension(state): Extension<Arc<ServerState>>,
    params: std::result::Result<Form<EntryParams>, FormRejection>,
) -> Response {
    match params {
        Ok(Form(params)) => respond(state.run(params.into()).await),
        Err(rejection) => bad_request(rejection),
    }
}

pub async fn del_entry(
    Extension(state): Extension<Arc<ServerState>>,
    params: std::result::Result<Form<KeyParams>, FormRejection>,
) -> Response {
    match params {
        Ok(Form(params)) => respond(state.run(params.into()).await),
        Err(rejection) => bad_request(rejection),
    }
}

pub async fn exit(Extension(state): Extension<Arc<ServerState>>) -> Response {
    tracing::info!("Shutdown requested via /exit");
    state.shutdown.notify_one();
    Json(StatusResponse::ok()).into_response()
}
