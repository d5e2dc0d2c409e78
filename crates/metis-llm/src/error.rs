//! Error types for metis-llm

use thiserror::Error;

/// Provider error type
#[derive(Debug, Error)]
pub enum Error {
    /// A backend failed to produce text
    #[error("provider '{provider}' failed: {message}")]
    Generation {
        /// Backend name
        provider: String,
        /// What went wrong
        message: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
