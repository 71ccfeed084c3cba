//! Error handling for cns-core
//!
//! Every failure a CNS command can hit is one of these variants. The display
//! strings are what the user sees, so they stay short and lowercase.

use thiserror::Error;

/// Core error type for CNS operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CnsError {
    /// The context setting is empty
    #[error("no context")]
    MissingContext,

    /// Filtering left no connection rows to show
    #[error("no connections")]
    NoConnections,

    /// No profile id was given
    #[error("no profile")]
    NoProfile,

    /// Transport or sidecar failure, or a request that could not be built
    #[error("bad request")]
    BadRequest,

    /// Application error reported by the CNS service inside its response
    #[error("{0}")]
    Service(String),

    /// Settings could not be resolved
    #[error("configuration error: {0}")]
    Config(String),

    /// The subscription server failed to bind or stopped with an error
    #[error("server error: {0}")]
    Server(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CnsError>;

impl CnsError {
    /// Returns true for request failures, whether the transport or the
    /// service reported them
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, CnsError::BadRequest | CnsError::Service(_))
    }
}

impl From<::config::ConfigError> for CnsError {
    fn from(err: ::config::ConfigError) -> Self {
        CnsError::Config(err.to_string())
    }
}
