//! Error types for the language-model layer.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The backend could not be constructed (bad URL, TLS setup, ...).
    #[error("failed to create client: {0}")]
    ClientCreate(String),

    /// The HTTP request did not complete.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered, but not with a completion payload.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
