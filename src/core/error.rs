//! Classified errors for the external collaborators.

use thiserror::Error;

/// A CRUD call against the document store failed. In-memory state is left
/// unchanged by the caller; operations are not retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned HTTP {status} for {operation}")]
    Status { status: u16, operation: String },

    #[error("malformed record in '{collection}': {reason}")]
    MalformedRecord { collection: String, reason: String },
}

/// A price source failed or returned an unexpected shape. Each source fails
/// independently; the caller reports the other source's result regardless.
#[derive(Debug, Error)]
pub enum PriceFetchError {
    #[error("price request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("price source returned HTTP {0}")]
    Status(u16),

    #[error("malformed price response: {0}")]
    MalformedResponse(String),
}
