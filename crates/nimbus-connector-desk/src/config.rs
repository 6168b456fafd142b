//! Desk connector configuration.

use serde::{Deserialize, Serialize};

use nimbus_connector::config::{ensure, ConnectorConfig, Credentials};
use nimbus_connector::error::{ConnectorError, ConnectorResult};

/// Base URL template; the site name replaces `<site>`.
const SITE_URL_TEMPLATE: &str = "https://<site>.desk.com/api/v2";

fn default_timeout_secs() -> u64 {
    30
}

/// How record documents are shaped in write responses.
///
/// The two Desk API generations differ: basic-auth deployments return the
/// record as the response body (with HAL-embedded search results), api-key
/// deployments wrap it under an `item` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    Embedded,
    Wrapped,
}

/// Settings for the Desk connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Site identifier, e.g. `acme` for `acme.desk.com`.
    #[serde(default)]
    pub site_name: String,

    /// Credentials; the variant also selects the response parsing style.
    pub credentials: Credentials,

    /// Explicit API root; overrides the site-derived URL when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_root: Option<String>,

    /// Request timeout handed to the transport.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl DeskConfig {
    /// Create a config with default timeout and no API root override.
    pub fn new(site_name: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            site_name: site_name.into(),
            credentials,
            api_root: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }

    /// Override the site-derived API root.
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    /// The API root all endpoints hang off.
    pub fn endpoint(&self) -> String {
        match &self.api_root {
            Some(root) => root.trim_end_matches('/').to_string(),
            None => SITE_URL_TEMPLATE.replace("<site>", &self.site_name),
        }
    }

    /// Which response parsing strategy the credential variant implies.
    pub fn response_style(&self) -> ResponseStyle {
        match self.credentials {
            Credentials::Basic { .. } => ResponseStyle::Embedded,
            Credentials::ApiKey { .. } => ResponseStyle::Wrapped,
        }
    }
}

impl ConnectorConfig for DeskConfig {
    fn validate(&self) -> ConnectorResult<()> {
        ensure(&self.site_name, "siteName")?;
        self.credentials.validate()?;

        let endpoint = self.endpoint();
        url::Url::parse(&endpoint).map_err(|e| {
            ConnectorError::invalid_configuration(format!("bad API root {endpoint:?}: {e}"))
        })?;
        Ok(())
    }

    fn redacted(&self) -> Self {
        Self {
            credentials: self.credentials.redacted(),
            ..self.clone()
        }
    }
}
