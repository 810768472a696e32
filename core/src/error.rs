//! Errors raised by this crate.
//!
//! Transport failures are not listed here: `Client::execute` returns the
//! transport's own error type untouched.

/// Errors returned by typed response access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The response body is not valid JSON for the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}
