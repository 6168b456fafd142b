//! Connector configuration types
//!
//! Shared credential variants and the validation seam each integration's
//! settings type implements.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ConnectorError, ConnectorResult};

/// Trait for connector-specific configuration.
///
/// Each integration implements this trait on its settings type to define
/// its validation rules and how to present itself safely in logs.
pub trait ConnectorConfig: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Validate the configuration.
    ///
    /// Reports the **first** missing or invalid setting; validation runs
    /// before anything touches the network.
    fn validate(&self) -> ConnectorResult<()>;

    /// Create a redacted version of this config (for logging/display).
    fn redacted(&self) -> Self;
}

/// Check that a required setting is present and non-empty.
///
/// An empty (or whitespace-only) string is treated identically to an
/// absent value.
pub fn ensure(value: &str, field: &'static str) -> ConnectorResult<()> {
    if value.trim().is_empty() {
        return Err(ConnectorError::MissingSetting { field });
    }
    Ok(())
}

/// Credentials for a target system.
///
/// The [`Debug`] impl redacts secrets to prevent accidental credential
/// exposure in log output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Basic authentication (account email/password).
    Basic {
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },

    /// API key authentication.
    ApiKey {
        #[serde(default)]
        key: String,
    },
}

impl Credentials {
    /// Create basic authentication credentials.
    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Create API key credentials.
    pub fn api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey { key: key.into() }
    }

    /// Validate that every field the variant requires is present.
    ///
    /// Reports the first missing field.
    pub fn validate(&self) -> ConnectorResult<()> {
        match self {
            Credentials::Basic { email, password } => {
                ensure(email, "email")?;
                ensure(password, "password")
            }
            Credentials::ApiKey { key } => ensure(key, "apiKey"),
        }
    }

    /// Create a redacted version.
    pub fn redacted(&self) -> Self {
        match self {
            Credentials::Basic { email, .. } => Credentials::Basic {
                email: email.clone(),
                password: "***REDACTED***".to_string(),
            },
            Credentials::ApiKey { .. } => Credentials::ApiKey {
                key: "***REDACTED***".to_string(),
            },
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}
