//! Error types
//!
//! The particle engine itself is infallible once constructed; the only fatal
//! condition is a missing drawing context. Storage errors are recoverable and
//! usually collapse to defaults at the call site.

use thiserror::Error;

/// Errors raised while binding the effects layer to the page
#[derive(Debug, Error)]
pub enum FxError {
    /// No 2D drawing context could be obtained for the overlay
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

/// Errors from a key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store does not exist (private browsing, native build)
    #[error("storage unavailable")]
    Unavailable,
    /// The backing store rejected the operation
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The record could not be encoded or decoded
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
