//! # Ops Event Listener
//!
//! Entry point for one delivered message: global suspension check, kind
//! filter, decode, dispatch, acknowledge. The transport may invoke it from
//! multiple workers concurrently; the listener holds only shared immutable
//! handles.
//!
//! Acknowledgement discipline: every delivery the core understands is
//! acknowledged exactly once after processing reaches a terminal state,
//! including suspended drops, ignored kinds, and recognized domain failures.
//! Only decode and acknowledge failures surface, leaving redelivery to the
//! transport.

use std::sync::Arc;

use crate::config::DispatchConfig;
use crate::error::TransportError;
use crate::handlers::SuspensionOracle;
use crate::messaging::{Acknowledger, EventEnvelope};

use super::dispatcher::{Collaborators, DispatchOutcome, EventDispatcher};

/// What happened to one delivery, as seen from the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Processing is globally suspended; the delivery was dropped silently
    Suspended,
    /// The declared kind is not ours; other listeners may care, we do not
    IgnoredKind,
    /// The event went through classification and dispatch
    Dispatched(DispatchOutcome),
}

/// Listener for CI state-change events generated by the sensor pipeline.
///
/// Routes each event to at most one of notification, auto-repair, or
/// auto-scale. Redelivered events are processed again in full; deduplication
/// is a transport/collaborator responsibility.
pub struct OpsEventListener {
    recognized_kind: String,
    suspension: Arc<dyn SuspensionOracle>,
    dispatcher: EventDispatcher,
}

impl OpsEventListener {
    pub fn new(config: &DispatchConfig, collaborators: Collaborators) -> Self {
        let suspension = Arc::clone(&collaborators.suspension);
        Self {
            recognized_kind: config.recognized_kind.clone(),
            suspension,
            dispatcher: EventDispatcher::new(collaborators),
        }
    }

    /// Handle one delivery end to end.
    ///
    /// Returns a transport error only when the body cannot be decoded (the
    /// delivery is left unacknowledged for redelivery) or when the
    /// acknowledgement itself fails.
    pub async fn on_message(
        &self,
        envelope: &EventEnvelope,
        acknowledger: &dyn Acknowledger,
    ) -> Result<ListenOutcome, TransportError> {
        let outcome = match self.process(envelope).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    delivery_id = %envelope.delivery_id,
                    error = %err,
                    "failed to decode delivery, leaving unacknowledged for redelivery"
                );
                return Err(err);
            }
        };

        if let Err(err) = acknowledger.ack().await {
            tracing::error!(
                delivery_id = %envelope.delivery_id,
                error = %err,
                "failed to acknowledge delivery"
            );
            return Err(err);
        }

        Ok(outcome)
    }

    async fn process(&self, envelope: &EventEnvelope) -> Result<ListenOutcome, TransportError> {
        tracing::debug!(
            delivery_id = %envelope.delivery_id,
            kind = %envelope.kind,
            "received delivery"
        );

        if self.suspension.is_processing_suspended().await {
            tracing::debug!(
                delivery_id = %envelope.delivery_id,
                "processing suspended, dropping delivery"
            );
            return Ok(ListenOutcome::Suspended);
        }

        if envelope.kind != self.recognized_kind {
            tracing::debug!(
                delivery_id = %envelope.delivery_id,
                kind = %envelope.kind,
                "unrecognized message kind, passing through"
            );
            return Ok(ListenOutcome::IgnoredKind);
        }

        let event = envelope.decode_change_event()?;
        let outcome = self.dispatcher.classify_and_dispatch(event).await;
        Ok(ListenOutcome::Dispatched(outcome))
    }
}
