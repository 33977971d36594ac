//! # Inbound Message Envelope
//!
//! Transport-agnostic view of one delivered message: a declared kind, a text
//! body, and a correlation id for tracing the delivery through the core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TransportError;
use crate::events::ChangeEvent;

/// Message kind carrying a serialized `ChangeEvent` body.
pub const CI_CHANGE_STATE_KIND: &str = "ci-change-state";

/// One inbound delivery from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Declared message kind; only recognized kinds are decoded
    pub kind: String,
    /// Raw text body
    pub body: String,
    /// Correlation id for tracking this delivery in logs
    pub delivery_id: String,
    /// When the transport handed the message to the core
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl EventEnvelope {
    /// Create a new envelope with a fresh correlation id
    pub fn new(kind: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            body: body.into(),
            delivery_id: Uuid::new_v4().to_string(),
            received_at: chrono::Utc::now(),
        }
    }

    /// Decode the body as a `ChangeEvent`.
    ///
    /// A failure here is a transport error: the delivery is left to the
    /// transport's redelivery semantics rather than acknowledged.
    pub fn decode_change_event(&self) -> Result<ChangeEvent, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::decode(e.to_string()))
    }
}

/// Acknowledges one delivery back to the transport.
///
/// The call is idempotent on the transport side and made exactly once per
/// delivered message, after processing reaches a terminal state.
#[async_trait]
pub trait Acknowledger: Send + Sync {
    async fn ack(&self) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StateLabel;

    #[test]
    fn test_envelope_decodes_change_event() {
        let envelope = EventEnvelope::new(
            CI_CHANGE_STATE_KIND,
            r#"{"ciId": 7, "oldState": "good", "newState": "notify"}"#,
        );

        let event = envelope.decode_change_event().unwrap();
        assert_eq!(event.ci_id, 7);
        assert_eq!(event.new_state, Some(StateLabel::Notify));
    }

    #[test]
    fn test_envelope_decode_failure_is_transport_error() {
        let envelope = EventEnvelope::new(CI_CHANGE_STATE_KIND, "{ truncated");
        let err = envelope.decode_change_event().unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }));
    }

    #[test]
    fn test_envelopes_get_distinct_delivery_ids() {
        let a = EventEnvelope::new(CI_CHANGE_STATE_KIND, "{}");
        let b = EventEnvelope::new(CI_CHANGE_STATE_KIND, "{}");
        assert_ne!(a.delivery_id, b.delivery_id);
    }
}
