//! Inbound event model.
//!
//! Normalized events as handed over by the dispatch pipeline. Only the
//! fields connectors act on are typed; everything else rides along in the
//! free-form trait bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Origin channel of an event.
///
/// Outbound connectors only act on server-side events; anything raised
/// from a client runtime is filtered out at the eligibility gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Channel {
    Server,
    Client,
    #[default]
    Unknown,
}

impl From<String> for Channel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "server" => Channel::Server,
            "client" => Channel::Client,
            _ => Channel::Unknown,
        }
    }
}

/// A normalized inbound event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Origin channel.
    #[serde(default)]
    pub channel: Channel,

    /// Per-connector enable overrides, keyed by connector name.
    ///
    /// Absent keys default to enabled; the `"all"` key acts as a wildcard.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub integrations: HashMap<String, bool>,

    /// The event body.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Create an event with no integration overrides.
    pub fn new(channel: Channel, kind: EventKind) -> Self {
        Self {
            channel,
            integrations: HashMap::new(),
            kind,
        }
    }

    /// Whether the named connector is enabled for this event.
    ///
    /// An explicit per-connector flag wins over the `"all"` wildcard;
    /// with neither present the connector is enabled.
    pub fn enabled_for(&self, name: &str) -> bool {
        if let Some(flag) = self.integrations.get(name) {
            return *flag;
        }
        if let Some(flag) = self.integrations.get("all") {
            return *flag;
        }
        true
    }
}

/// The kinds of events the pipeline dispatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    /// A user identity snapshot.
    Identify(IdentifyEvent),
    /// A behavioral event; carries no identity to sync.
    Track(TrackEvent),
    /// An identity merge; carries no identity to sync.
    Alias(AliasEvent),
}

/// Normalized user data carried by an identify event.
///
/// An immutable snapshot per invocation; connectors never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Free-form traits (`avatar`, `title`, `background`, `address`,
    /// `phone`, ...).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub traits: HashMap<String, Value>,
}

impl IdentifyEvent {
    /// The external id used for remote correlation.
    ///
    /// Returns `None` when `user_id` is absent or empty so that callers
    /// branch explicitly instead of testing string truthiness; the email
    /// fallback is the locator's job, not an implicit substitution here.
    pub fn external_id(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// The event's email, when present and non-empty.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// A string-valued trait, when present and non-empty.
    ///
    /// Non-string trait values are ignored, not errors.
    pub fn trait_str(&self, key: &str) -> Option<&str> {
        self.traits
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// A behavioral event. Connectors that only sync identities skip these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    /// Name of the tracked action.
    pub event: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
}

/// An identity merge event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_id: Option<String>,
}
