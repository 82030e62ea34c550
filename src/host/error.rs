//! Errors reported by host services

use thiserror::Error;

/// Failure of a host collaborator call.
///
/// Cloneable so a completion can be both logged and kept on the controller
/// that surfaces it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("rejected by host: {0}")]
    Rejected(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e.to_string())
    }
}
