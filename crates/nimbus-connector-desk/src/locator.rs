//! Two-stage customer lookup.

use tracing::debug;

use nimbus_connector::error::ConnectorResult;
use nimbus_connector::event::IdentifyEvent;
use nimbus_connector::transport::Transport;

use crate::client::{DeskClient, LookupQuery};
use crate::model::Customer;

/// Resolve an identify event to at most one existing customer.
///
/// The external-id lookup runs first, and only when the event carries a
/// non-empty external id; on a miss (or an absent id) the email lookup is
/// the fallback. The first match wins — a hit on external id means the
/// email query is never issued. Any lookup error aborts the whole
/// operation and propagates.
pub async fn locate<T: Transport>(
    client: &DeskClient<T>,
    identify: &IdentifyEvent,
) -> ConnectorResult<Option<Customer>> {
    if let Some(external_id) = identify.external_id() {
        if let Some(found) = client
            .search(&LookupQuery::ExternalId(external_id.to_string()))
            .await?
        {
            debug!(customer_id = %found.id, "matched customer by external id");
            return Ok(Some(found));
        }
    }

    let Some(email) = identify.email() else {
        return Ok(None);
    };

    let found = client.search(&LookupQuery::Email(email.to_string())).await?;
    if let Some(customer) = &found {
        debug!(customer_id = %customer.id, "matched customer by email");
    }
    Ok(found)
}
