//! Error types for cnsctl

use cns_core::CnsError;
use colored::Colorize;
use thiserror::Error;

/// Main error type for the cnsctl application
#[derive(Error, Debug)]
pub enum CnsCtlError {
    #[error(transparent)]
    Cns(#[from] CnsError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Output formatting error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for cnsctl operations
pub type Result<T> = std::result::Result<T, CnsCtlError>;

impl CnsCtlError {
    /// The message reported to the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// True when the sidecar or the service rejected a request
    pub fn is_bad_request(&self) -> bool {
        matches!(self, CnsCtlError::Cns(e) if e.is_bad_request())
    }

    /// Single-line `Error: <message>` for stderr
    pub fn display_line(&self) -> String {
        format!("{} {}", "Error:".red().bold(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: CnsCtlError = CnsError::MissingContext.into();
        assert_eq!(err.message(), "no context");

        let err: CnsCtlError = CnsError::Service("profile not found".to_string()).into();
        assert_eq!(err.message(), "profile not found");
    }

    #[test]
    fn test_bad_request_kinds() {
        let err: CnsCtlError = CnsError::BadRequest.into();
        assert!(err.is_bad_request());

        let err: CnsCtlError = CnsError::Service("context not found".to_string()).into();
        assert!(err.is_bad_request());

        let err: CnsCtlError = CnsError::MissingContext.into();
        assert!(!err.is_bad_request());

        let err: CnsCtlError = std::io::Error::other("closed").into();
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_display_line() {
        colored::control::set_override(false);
        let err: CnsCtlError = CnsError::BadRequest.into();
        assert_eq!(err.display_line(), "Error: bad request");
    }
}
