//! Connector error types
//!
//! Error definitions with transient/permanent classification for retry logic.

use thiserror::Error;

/// Error that can occur while delivering an event to a target system.
#[derive(Debug, Error)]
pub enum ConnectorError {
    // Configuration errors (permanent, detected before any network call)
    /// A required setting is missing or empty.
    #[error("missing required setting: {field}")]
    MissingSetting { field: &'static str },

    /// Configuration is structurally invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    // Remote errors
    /// The target API answered with a non-success status.
    #[error("target returned status {status}: {detail}")]
    Transport { status: u16, detail: String },

    /// Network failure before any HTTP status was received.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A success response whose body could not be deserialized.
    #[error("unparseable response: {message}")]
    Parse { message: String },
}

impl ConnectorError {
    /// Check if this error is transient and the operation may be retried.
    ///
    /// Transient errors are caused by temporary conditions that can resolve
    /// themselves: network failures, rate limiting, and server-side 5xx
    /// responses.
    pub fn is_transient(&self) -> bool {
        match self {
            ConnectorError::Network { .. } => true,
            ConnectorError::Transport { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConnectorError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    // Convenience constructors

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        ConnectorError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source.
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        ConnectorError::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        ConnectorError::Network {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;
