//! Error types for question answering.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Error type for all question-answering operations.
///
/// The orchestrator never lets one of these reach its caller; recoverable
/// variants trigger the keyword fallback, the rest are rendered as a message.
#[derive(Error, Debug)]
pub enum QaError {
    /// Missing credential or invalid setting
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// LLM call failed (transport, status, empty reply)
    #[error("Resolution failed: {0}")]
    ResolutionError(String),

    /// LLM reply was not a strict `{sql, explanation}` object
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// SQL failed to prepare or execute
    #[error("Query execution failed: {0}")]
    QueryExecutionError(String),

    /// Loader input could not be mapped onto the tables
    #[error("Ingest failed: {0}")]
    IngestError(String),

    /// Storage layer error (SQLite)
    #[error("Storage error: {0}")]
    StorageError(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP transport error talking to the LLM provider (connect, timeout, body)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Anything else (a blocking store task that panicked or was cancelled)
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl QaError {
    /// Create a query execution error with context.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryExecutionError(msg.into())
    }

    /// Create a resolution error with context.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::ResolutionError(msg.into())
    }

    /// Check if the orchestrator can recover from this error by falling back.
    ///
    /// # Returns
    ///
    /// `true` for model resolution failures and SQL execution failures
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ResolutionError(_)
                | Self::MalformedResponse(_)
                | Self::QueryExecutionError(_)
                | Self::HttpError(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QaError>;
