//! Desk connector entry point.
//!
//! Gates inbound events, then reconciles identify events against the
//! remote customer store: locate by external id and email, update the
//! match or create a fresh record.

use std::time::Duration;
use tracing::{debug, error, info};

use nimbus_connector::config::ConnectorConfig;
use nimbus_connector::error::ConnectorResult;
use nimbus_connector::event::{Channel, Event, EventKind, IdentifyEvent};
use nimbus_connector::transport::{HttpTransport, Transport};

use crate::client::DeskClient;
use crate::config::DeskConfig;
use crate::locator::locate;
use crate::mapper::map_identify;
use crate::model::Customer;

/// Connector name used for per-event enable overrides.
pub const CONNECTOR_NAME: &str = "desk";

/// Outcome of delivering one event.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// A new customer was created.
    Created(Customer),
    /// An existing customer was updated in place.
    Updated(Customer),
    /// The event required no remote operation.
    Skipped,
}

/// Outbound Desk connector.
///
/// Holds only configuration and the transport: invocations share no
/// mutable state, and nothing is cached between them — every delivery
/// re-queries the remote store.
pub struct DeskConnector<T = HttpTransport> {
    config: DeskConfig,
    client: DeskClient<T>,
}

impl DeskConnector<HttpTransport> {
    /// Build a connector with the production HTTP transport.
    ///
    /// Validates the configuration before anything touches the network.
    pub fn new(config: DeskConfig) -> ConnectorResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(
            config.credentials.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> DeskConnector<T> {
    /// Build a connector over an injected transport.
    pub fn with_transport(config: DeskConfig, transport: T) -> Self {
        let client = DeskClient::new(&config, transport);
        Self { config, client }
    }

    /// The name dispatch frameworks address this connector by.
    pub fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    /// Whether this event should be delivered at all.
    ///
    /// Only server-side events are forwarded, and per-event integration
    /// overrides are honored.
    pub fn eligible(&self, event: &Event) -> bool {
        event.channel == Channel::Server && event.enabled_for(CONNECTOR_NAME)
    }

    /// Deliver one event.
    ///
    /// Identify events are reconciled against the remote store. Every
    /// other kind is accepted and skipped without a remote call — a
    /// deliberate pass-through, not an error.
    pub async fn deliver(&self, event: &Event) -> ConnectorResult<Delivery> {
        match &event.kind {
            EventKind::Identify(identify) => self.identify(identify).await,
            EventKind::Track(_) | EventKind::Alias(_) => {
                debug!("event carries no customer identity, skipping");
                Ok(Delivery::Skipped)
            }
        }
    }

    /// Reconcile one identify event.
    ///
    /// Locates the customer (external id first, then email), then either
    /// updates the match in place or creates a fresh record. The returned
    /// [`Delivery`] carries the platform's response document. Lookup and
    /// write failures abort the invocation and propagate unmodified.
    pub async fn identify(&self, identify: &IdentifyEvent) -> ConnectorResult<Delivery> {
        let existing = locate(&self.client, identify).await.inspect_err(|e| {
            error!(error = %e, "customer lookup failed");
        })?;

        let payload = map_identify(identify);

        match existing {
            Some(customer) => {
                let updated = self
                    .client
                    .update(&customer.id, &payload)
                    .await
                    .inspect_err(|e| {
                        error!(customer_id = %customer.id, error = %e, "customer update failed");
                    })?;
                info!(customer_id = %updated.id, "customer updated");
                Ok(Delivery::Updated(updated))
            }
            None => {
                let created = self.client.create(&payload).await.inspect_err(|e| {
                    error!(error = %e, "customer create failed");
                })?;
                info!(customer_id = %created.id, "customer created");
                Ok(Delivery::Created(created))
            }
        }
    }
}

impl<T> std::fmt::Debug for DeskConnector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskConnector")
            .field("config", &self.config.redacted())
            .finish()
    }
}
