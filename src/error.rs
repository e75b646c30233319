//! Error types for the naming-tool client and provider.
//!
//! [`ApiError`] covers everything the HTTP client can report. [`ProviderError`]
//! is what provider operations return; every `ApiError` converts into one.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors reported by the naming-service client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client could not be built from the supplied configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call was rejected before any network activity took place.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The request never produced an HTTP response.
    #[error("{context}: {source}")]
    Transport {
        /// What the client was doing when the transport failed.
        context: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a status code of 400 or above.
    ///
    /// The body is kept byte for byte so callers can surface the server's
    /// own message.
    #[error("received error status code {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: Vec<u8>,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The naming service processed the request but refused it.
    #[error("Request rejected: {message}")]
    Rejected {
        /// The message returned by the service.
        message: String,
    },

    /// The request queue worker is no longer running.
    #[error("request queue is closed")]
    QueueClosed,
}

impl ApiError {
    /// Wrap a transport failure with context.
    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    /// The HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Decode the body of an error response into `T`.
    ///
    /// Returns `None` for non-status errors or bodies that do not match `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Status { body, .. } => serde_json::from_slice(body).ok(),
            _ => None,
        }
    }

    /// The raw body of an error response.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The diagnostic message included in an error response body, if any.
    pub fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = self.payload()?;
        ["message", "Message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|m| m.as_str()))
            .map(str::to_string)
    }
}

/// Errors that can occur while serving provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal provider error occurred.
    #[error("Provider error: {0}")]
    Sdk(String),

    /// The provider is not configured, or its configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource or data source type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource already exists (create conflict).
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    /// Permission denied (bad API key or admin password).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The naming service is unreachable or failing.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The naming service did not answer in time.
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Operation failed due to current state (precondition not met).
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    /// Operation not supported by this resource.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// The service refused the request as invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) => msg,
            Self::Validation(msg) => msg,
            Self::Sdk(msg) => msg,
            Self::Configuration(msg) => msg,
            Self::UnknownResource(msg) => msg,
            Self::Serialization(_err) => "serialization error (see Debug output)",
            Self::AlreadyExists(msg) => msg,
            Self::PermissionDenied(msg) => msg,
            Self::Unavailable(msg) => msg,
            Self::DeadlineExceeded(msg) => msg,
            Self::FailedPrecondition(msg) => msg,
            Self::Unimplemented(msg) => msg,
            Self::InvalidRequest(msg) => msg,
        }
    }
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        // Prefer the server's own explanation when it sent one.
        let detail = match err.server_message() {
            Some(message) => format!("{}: {}", err, message),
            None => err.to_string(),
        };

        match err {
            ApiError::Configuration(msg) => ProviderError::Configuration(msg),
            ApiError::Precondition(_) | ApiError::QueueClosed => {
                ProviderError::FailedPrecondition(detail)
            },
            ApiError::Transport { ref source, .. } if source.is_timeout() => {
                ProviderError::DeadlineExceeded(detail)
            },
            ApiError::Transport { .. } => ProviderError::Unavailable(detail),
            ApiError::Status { status, .. } => match status {
                404 => ProviderError::NotFound(detail),
                401 | 403 => ProviderError::PermissionDenied(detail),
                409 => ProviderError::AlreadyExists(detail),
                s if s >= 500 => ProviderError::Unavailable(detail),
                _ => ProviderError::InvalidRequest(detail),
            },
            ApiError::Decode(e) | ApiError::Encode(e) => ProviderError::Serialization(e),
            ApiError::Rejected { message } => ProviderError::Validation(message),
        }
    }
}
