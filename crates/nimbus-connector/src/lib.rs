//! # Connector Framework
//!
//! Core abstractions for delivering normalized events to third-party
//! systems.
//!
//! This crate provides the pieces every outbound connector shares:
//!
//! - [`event`] - the normalized inbound event model (identify/track/alias)
//! - [`config`] - credential variants and the configuration validation seam
//! - [`error`] - error types with transient/permanent classification
//! - [`transport`] - the HTTP capability connectors are written against,
//!   plus the reqwest-backed production implementation
//! - [`retry`] - bounded exponential backoff used by the transport
//!
//! Integrations (e.g. the Desk connector) depend on this crate and implement
//! their own mapping and reconciliation on top of [`transport::Transport`],
//! which keeps decision logic decoupled from any specific HTTP client.

pub mod config;
pub mod error;
pub mod event;
pub mod retry;
pub mod transport;

/// Prelude module for convenient imports.
///
/// ```
/// use nimbus_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ensure, ConnectorConfig, Credentials};
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::event::{
        AliasEvent, Channel, Event, EventKind, IdentifyEvent, TrackEvent,
    };
    pub use crate::retry::RetryPolicy;
    pub use crate::transport::{HttpTransport, Transport};
}

// Re-export async_trait for transport implementors
pub use async_trait::async_trait;
