//! Error types for metis-core
//!
//! Not-found conditions are values consumed by the HTTP layer, never
//! panics; the dispatcher itself has no failure mode at all.

use thiserror::Error;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unknown agent name
    #[error("Agent {name} not found")]
    AgentNotFound {
        /// Requested agent name
        name: String,
    },

    /// Upgrade-request id out of range
    #[error("Request {id} not found")]
    RequestNotFound {
        /// Requested upgrade id
        id: usize,
    },

    /// Registry is full
    #[error("agent limit reached ({max} agents registered)")]
    AgentLimitReached {
        /// Configured registry capacity
        max: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
