use std::fmt;
use thiserror::Error;

/// The error type for ucare operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A signed upload was requested but no secret key is configured, or the
    /// service demands a signature the client cannot produce.
    MissingSecretKey,

    /// A secret key is configured but the caller did not pass `expire`.
    MissingExpire,

    /// A textual expiry could not be parsed into a point in time.
    InvalidDatetime,

    /// Input rejected before any request was sent (expiry in the past,
    /// target is neither a file nor a URL, unusable expire value).
    Validation,

    /// The service answered with a failure status, or a remote fetch ended
    /// in `error` / `unknown`. The message carries the raw response body.
    Protocol,

    /// The operation was cancelled by the caller.
    Cancelled,

    /// Unexpected errors (network, I/O, malformed payloads, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    ///
    /// For [`ErrorKind::Protocol`] this is the raw response body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this error is caused by how the client was configured or called.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingSecretKey | ErrorKind::MissingExpire
        )
    }

    /// Check if this error is caused by a bad input value.
    pub fn is_input_error(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidDatetime | ErrorKind::Validation)
    }

    /// Check if this error was reported by the remote service.
    pub fn is_remote_error(&self) -> bool {
        self.kind == ErrorKind::Protocol
    }
}

// Convenience constructors
impl Error {
    /// Create a missing secret key error
    pub fn missing_secret_key() -> Self {
        Self::new(
            ErrorKind::MissingSecretKey,
            "a secret key is required for secure uploads, configure the client with a secret key",
        )
    }

    /// Create a missing expire error
    pub fn missing_expire() -> Self {
        Self::new(
            ErrorKind::MissingExpire,
            "secure uploads are enabled, an `expire` value must be passed",
        )
    }

    /// Create an invalid datetime error for the given input
    pub fn invalid_datetime(input: &str) -> Self {
        Self::new(
            ErrorKind::InvalidDatetime,
            format!("`{input}` is not a recognizable date or time"),
        )
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a protocol error carrying the raw response body
    pub fn protocol(body: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, body)
    }

    /// Create a cancelled error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingSecretKey => write!(f, "missing secret key"),
            ErrorKind::MissingExpire => write!(f, "missing expire"),
            ErrorKind::InvalidDatetime => write!(f, "invalid datetime string"),
            ErrorKind::Validation => write!(f, "invalid input"),
            ErrorKind::Protocol => write!(f, "request failed"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::validation(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
