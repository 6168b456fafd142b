//! Field mapping from identify events to Desk customer documents.

use nimbus_connector::event::IdentifyEvent;

use crate::model::{ContactEntry, CustomerPayload};

/// Map an identify event into a write-ready customer document.
///
/// Pure and deterministic. Absent traits become omitted scalar fields or
/// null list values, never errors; the three contact lists always carry
/// exactly one entry so an update replaces whatever the platform holds.
pub fn map_identify(identify: &IdentifyEvent) -> CustomerPayload {
    let owned = |value: &str| value.to_string();

    CustomerPayload {
        external_id: identify.trait_str("userId").map(owned),
        avatar: identify.trait_str("avatar").map(owned),
        title: identify.trait_str("title").map(owned),
        description: identify.trait_str("background").map(owned),
        first_name: identify.first_name.clone(),
        last_name: identify.last_name.clone(),
        emails: vec![ContactEntry::other(identify.email().map(owned))],
        addresses: vec![ContactEntry::other(identify.trait_str("address").map(owned))],
        phone_numbers: vec![ContactEntry::other(identify.trait_str("phone").map(owned))],
        emails_update_action: "replace",
        addresses_update_action: "replace",
        phone_numbers_update_action: "replace",
    }
}
