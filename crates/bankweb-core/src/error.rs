//! Error types for bankweb-core
//!
//! Views never show these to the user. Every failure collapses into the
//! generic message of the operation that hit it, and the detailed error
//! below only reaches the log.

use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No session of the required kind
    MissingSession,
    /// Bearer token absent from the token store
    MissingToken,
    /// Request never produced a response
    Transport,
    /// Backend answered with a non-success status
    HttpStatus,
    /// Response body did not match the expected shape
    Decode,
    /// HTTP client could not be built
    ClientSetup,
    /// Action not available in the view's current state
    InvalidState,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MissingSession => write!(f, "MISSING_SESSION"),
            ErrorCode::MissingToken => write!(f, "MISSING_TOKEN"),
            ErrorCode::Transport => write!(f, "TRANSPORT"),
            ErrorCode::HttpStatus => write!(f, "HTTP_STATUS"),
            ErrorCode::Decode => write!(f, "DECODE"),
            ErrorCode::ClientSetup => write!(f, "CLIENT_SETUP"),
            ErrorCode::InvalidState => write!(f, "INVALID_STATE"),
        }
    }
}

/// Failure talking to the banking backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {message}")]
    Decode { message: String },
}

impl BackendError {
    pub fn transport(message: impl Into<String>) -> Self {
        BackendError::Transport { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        BackendError::Decode { message: message.into() }
    }
}

/// Main error type for bankweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No {kind} session")]
    MissingSession { kind: &'static str },

    #[error("No token stored under '{key}'")]
    MissingToken { key: String },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to build HTTP client: {message}")]
    ClientSetup { message: String },

    #[error("Cannot {action} in the current state")]
    InvalidState { action: &'static str },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::MissingSession { .. } => ErrorCode::MissingSession,
            CoreError::MissingToken { .. } => ErrorCode::MissingToken,
            CoreError::Backend(BackendError::Transport { .. }) => ErrorCode::Transport,
            CoreError::Backend(BackendError::Status { .. }) => ErrorCode::HttpStatus,
            CoreError::Backend(BackendError::Decode { .. }) => ErrorCode::Decode,
            CoreError::ClientSetup { .. } => ErrorCode::ClientSetup,
            CoreError::InvalidState { .. } => ErrorCode::InvalidState,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
