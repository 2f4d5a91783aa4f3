//! Client for the hosted data API.
//!
//! The platform backend exposes its tables and views over an HTTP
//! table-query surface plus named RPC functions and an object storage
//! service. This module wraps the small fixed vocabulary the console
//! needs: filtered/ordered/limited selects, single-row inserts and
//! updates, deletes, RPC calls, and image uploads.
//!
//! Every call is a single attempt. There is no retry, backoff, or
//! circuit-breaking layer anywhere; a failed call surfaces once and the
//! user decides whether to act again.

use serde::{Deserialize, Serialize};

pub mod client;
pub mod filter;
pub mod storage;

pub use client::ApiClient;
pub use filter::{Filter, SelectQuery};
pub use storage::ObjectStorage;

/// Common error type for data API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Parameters for the click-counter RPC.
#[derive(Clone, Debug, Serialize)]
pub struct IncrementClicksParams {
    pub event_id: uuid::Uuid,
}

/// Parameters for the mock-order bulk delete RPC.
#[derive(Clone, Debug, Serialize)]
pub struct DeleteMockOrdersParams {
    pub event_id: uuid::Uuid,
}

/// Row count returned by mutating RPCs.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct AffectedRows(pub i64);
