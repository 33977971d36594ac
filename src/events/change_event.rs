//! # Change Event
//!
//! Wire-level event structures. A `ChangeEvent` is one state transition for a
//! monitored CI as emitted by the sensor; its optional `payload` carries the
//! serialized originating source event.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::states::{SourceKind, StateLabel};

/// One state transition for a monitored CI.
///
/// Constructed fresh per inbound message, enriched in place (cloud name,
/// component-state counters), consumed synchronously by the dispatcher, and
/// discarded after dispatch. Nothing is retained across messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// Identifier of the monitored component instance
    pub ci_id: i64,
    /// State before the transition
    #[serde(default)]
    pub old_state: Option<StateLabel>,
    /// State after the transition; may equal `old_state`
    #[serde(default)]
    pub new_state: Option<StateLabel>,
    /// Serialized source event; presence changes routing
    #[serde(default)]
    pub payload: Option<String>,
    /// Event time in epoch milliseconds
    #[serde(default)]
    pub timestamp: i64,
    /// Per-state counts of sibling components, attached during enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_state_counters: Option<HashMap<String, i64>>,
    /// Deployment location, attached during enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
}

impl ChangeEvent {
    /// Parse the payload into the originating source event, if present and
    /// well-formed. Malformed payloads are treated the same as absent ones;
    /// routing rules that need the payload simply will not match.
    pub fn source_event(&self) -> Option<SourceEvent> {
        self.payload
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// The originating monitor event carried inside a `ChangeEvent` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEvent {
    /// Logical group the CI belongs to; aggregates component-level counters
    pub manifest_id: i64,
    #[serde(default)]
    pub ci_id: i64,
    /// Open/close state of the alarm condition itself
    #[serde(default)]
    pub state: Option<StateLabel>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Monitor type that produced the event
    #[serde(rename = "type", default)]
    pub kind: Option<SourceKind>,
}
