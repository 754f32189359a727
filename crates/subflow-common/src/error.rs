//! Error types shared by the job builder and its collaborators.
//!
//! Construction of job descriptors only ever fails with
//! [`Error::Configuration`] or [`Error::MalformedUri`]. Calls to external
//! services fail with [`Error::Collaborator`], which carries the service's own
//! error code so callers can report it unchanged.

/// Common error type for subflow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field could not be resolved after all fallbacks.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A location string is not a usable storage URI.
    #[error("Malformed storage URI '{uri}': {reason}")]
    MalformedUri {
        /// The offending input.
        uri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An external service call failed.
    #[error("{service} error [{code}]: {message}")]
    Collaborator {
        /// Which collaborator failed (e.g. "s3", "stepfunctions").
        service: String,
        /// The collaborator's error code.
        code: String,
        /// The collaborator's error message.
        message: String,
    },

    /// An incoming event is of a kind that is not handled.
    #[error("Unsupported event: {0}")]
    UnsupportedEvent(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new Configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new MalformedUri error.
    pub fn malformed_uri<U: Into<String>, R: Into<String>>(uri: U, reason: R) -> Self {
        Self::MalformedUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Collaborator error.
    pub fn collaborator<S, C, M>(service: S, code: C, message: M) -> Self
    where
        S: Into<String>,
        C: Into<String>,
        M: Into<String>,
    {
        Self::Collaborator {
            service: service.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new UnsupportedEvent error.
    pub fn unsupported_event<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedEvent(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
