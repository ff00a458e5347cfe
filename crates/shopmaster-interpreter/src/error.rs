//! # Interpreter Errors
//!
//! Failures of the external interpretation service. Callers map every
//! variant to the same user-visible outcome, "no draft available", and the
//! operator falls back to manual entry; nothing here reaches the ledger.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpreterError {
    /// No API key was configured.
    #[error("interpretation API key missing")]
    MissingApiKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("interpretation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("interpretation service returned status {status}")]
    Api { status: u16 },

    /// The service answered but produced no candidate text.
    #[error("interpretation service returned no output")]
    EmptyResponse,

    /// The candidate text was not a valid draft JSON document.
    #[error("could not parse interpretation output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias for Results with [`InterpreterError`].
pub type InterpreterResult<T> = Result<T, InterpreterError>;

// =============================================================================
// Unit Tests
// =============================================================================
