//! Desk API wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform-assigned record identifier.
///
/// Desk assigns numeric ids but treats them as opaque in URLs, and some
/// API generations return them as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerId::Number(n) => write!(f, "{n}"),
            CustomerId::Text(s) => f.write_str(s),
        }
    }
}

/// A typed contact list entry (emails, addresses, phone numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub value: Option<String>,
}

impl ContactEntry {
    /// An `"other"`-typed entry, the shape identify payloads carry.
    pub fn other(value: Option<String>) -> Self {
        Self {
            entry_type: "other".to_string(),
            value,
        }
    }
}

/// A customer record as stored on the platform.
///
/// Only the fields reconciliation reads are typed; the rest of the
/// document is preserved untouched in `rest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ContactEntry>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Response body of `GET /customers/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_entries: i64,

    #[serde(default, rename = "_embedded")]
    pub embedded: Embedded,
}

/// HAL-style embedded result list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub entries: Vec<Customer>,
}

/// Write-ready customer document produced by the field mapper.
///
/// The three list-valued fields always carry exactly one entry plus a
/// sibling `*_update_action: "replace"` directive; the platform merges
/// list updates additively by default, and repeated syncs would
/// accumulate duplicate entries without it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    pub emails: Vec<ContactEntry>,
    pub addresses: Vec<ContactEntry>,
    pub phone_numbers: Vec<ContactEntry>,

    pub emails_update_action: &'static str,
    pub addresses_update_action: &'static str,
    pub phone_numbers_update_action: &'static str,
}
