//! Desk HTTP API client.
//!
//! Typed operations over the injected [`Transport`]: customer search,
//! create, and update against the v2 customer endpoints.

use serde_json::Value;
use tracing::debug;

use nimbus_connector::error::{ConnectorError, ConnectorResult};
use nimbus_connector::transport::Transport;

use crate::config::{DeskConfig, ResponseStyle};
use crate::model::{Customer, CustomerId, CustomerPayload, SearchResponse};

/// A single-filter customer lookup.
///
/// The two keys are mutually exclusive; a search uses exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    ExternalId(String),
    Email(String),
}

impl LookupQuery {
    fn as_param(&self) -> (&'static str, &str) {
        match self {
            LookupQuery::ExternalId(id) => ("external_id", id),
            LookupQuery::Email(email) => ("email", email),
        }
    }
}

/// Typed client for the Desk customer API.
#[derive(Debug)]
pub struct DeskClient<T> {
    transport: T,
    base_url: String,
    response_style: ResponseStyle,
}

impl<T: Transport> DeskClient<T> {
    /// Create a client for the configured site over the given transport.
    pub fn new(config: &DeskConfig, transport: T) -> Self {
        Self {
            transport,
            base_url: config.endpoint(),
            response_style: config.response_style(),
        }
    }

    /// Search for at most one customer matching the query.
    ///
    /// A zero-entry result is `Ok(None)` — the signal to create instead of
    /// update, never an error. Transport and auth failures propagate.
    pub async fn search(&self, query: &LookupQuery) -> ConnectorResult<Option<Customer>> {
        let url = format!("{}/customers/search", self.base_url);
        let (key, value) = query.as_param();
        debug!(filter = key, "searching customers");

        let body = self.transport.get(&url, &[(key, value)]).await?;
        let response: SearchResponse = parse(body)?;
        if response.total_entries == 0 {
            return Ok(None);
        }
        Ok(response.embedded.entries.into_iter().next())
    }

    /// Create a customer (POST /customers).
    ///
    /// Platform-side duplicate conflicts surface as transport errors; they
    /// are not retried here.
    pub async fn create(&self, payload: &CustomerPayload) -> ConnectorResult<Customer> {
        let url = format!("{}/customers", self.base_url);
        debug!("creating customer");

        let body = self.transport.post(&url, &to_body(payload)?).await?;
        self.parse_record(body)
    }

    /// Update a customer addressed by its platform id (PATCH /customers/:id).
    pub async fn update(
        &self,
        id: &CustomerId,
        payload: &CustomerPayload,
    ) -> ConnectorResult<Customer> {
        let url = format!("{}/customers/{}", self.base_url, id);
        debug!(customer_id = %id, "updating customer");

        let body = self.transport.patch(&url, &to_body(payload)?).await?;
        self.parse_record(body)
    }

    /// Extract the record document from a write response, per the API
    /// generation the credential variant implies.
    fn parse_record(&self, body: Value) -> ConnectorResult<Customer> {
        let record = match self.response_style {
            ResponseStyle::Embedded => body,
            ResponseStyle::Wrapped => body
                .get("item")
                .cloned()
                .ok_or_else(|| ConnectorError::parse("response missing `item` field"))?,
        };
        parse(record)
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> ConnectorResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ConnectorError::parse(format!("unexpected response shape: {e}")))
}

fn to_body(payload: &CustomerPayload) -> ConnectorResult<Value> {
    serde_json::to_value(payload).map_err(|e| ConnectorError::parse(e.to_string()))
}
