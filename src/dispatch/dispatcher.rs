//! # Event Dispatcher
//!
//! Runs the full per-event sequence: enrichment, heartbeat-suspension query,
//! rule classification, and the single handler invocation the matched rule
//! routes to. Recognized domain errors terminate processing for the event but
//! never escape to the caller; the listener acknowledges regardless.

use std::sync::Arc;

use crate::error::DomainError;
use crate::events::{ChangeEvent, SourceKind, StateLabel};
use crate::handlers::{
    BadStateHandler, CloudAnnotator, FlexStateHandler, Notifier, NotifyGate, StateCounterStore,
    SuspensionOracle,
};

use super::classifier::{classify, Classification, RuleInput};
use super::enrichment::EventEnricher;

/// All collaborator handles, wired once at startup.
///
/// The dispatcher holds these for the life of the process; there are no
/// optional set-later fields and no mutable wiring.
#[derive(Clone)]
pub struct Collaborators {
    pub suspension: Arc<dyn SuspensionOracle>,
    pub annotator: Arc<dyn CloudAnnotator>,
    pub counter_store: Arc<dyn StateCounterStore>,
    pub notifier: Arc<dyn Notifier>,
    pub bad_state: Arc<dyn BadStateHandler>,
    pub flex_state: Arc<dyn FlexStateHandler>,
    pub notify_gate: Arc<dyn NotifyGate>,
}

/// Terminal result of dispatching one event. Exactly one handler fires per
/// event, or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A notification was sent (closing, gated, or notify-recovery branch)
    Notified,
    /// Bad-state handler processed an unhealthy transition
    UnhealthyProcessed,
    /// Bad-state handler processed a recovery to good
    GoodProcessed,
    /// Flex-state handler processed an overutilized transition
    OverutilizedProcessed,
    /// Flex-state handler processed an underutilized transition
    UnderutilizedProcessed,
    /// Heartbeat alarms are suppressed; logged, nothing invoked
    HeartbeatSuppressed,
    /// The notify-worthiness gate declined the notification
    NotifySkipped,
    /// No rule matched; the event was enriched and dropped (expected)
    NoMatch,
    /// A collaborator raised a recognized domain error; terminal for this
    /// message, still acknowledged
    DomainFailure { message: String },
}

/// Stateless per-event dispatcher. Safe to share across transport workers.
pub struct EventDispatcher {
    enricher: EventEnricher,
    suspension: Arc<dyn SuspensionOracle>,
    notifier: Arc<dyn Notifier>,
    bad_state: Arc<dyn BadStateHandler>,
    flex_state: Arc<dyn FlexStateHandler>,
    notify_gate: Arc<dyn NotifyGate>,
}

impl EventDispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            enricher: EventEnricher::new(collaborators.annotator, collaborators.counter_store),
            suspension: collaborators.suspension,
            notifier: collaborators.notifier,
            bad_state: collaborators.bad_state,
            flex_state: collaborators.flex_state,
            notify_gate: collaborators.notify_gate,
        }
    }

    /// Classify one event and invoke the matching handler.
    ///
    /// Never returns an error for expected domain conditions; collaborator
    /// failures are logged here and folded into the outcome so the caller can
    /// acknowledge unconditionally.
    pub async fn classify_and_dispatch(&self, mut event: ChangeEvent) -> DispatchOutcome {
        let ci_id = event.ci_id;
        match self.dispatch_inner(&mut event).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    ci_id = ci_id,
                    old_state = ?event.old_state,
                    new_state = ?event.new_state,
                    error = %err,
                    "domain error while dispatching event, message will still be acknowledged"
                );
                DispatchOutcome::DomainFailure {
                    message: err.to_string(),
                }
            }
        }
    }

    async fn dispatch_inner(&self, event: &mut ChangeEvent) -> Result<DispatchOutcome, DomainError> {
        let context = self.enricher.enrich(event).await?;

        // Only consult the heartbeat oracle when the sub-rule could apply
        let heartbeat_candidate = event.new_state == Some(StateLabel::Unhealthy)
            && matches!(context.source_kind(), Some(SourceKind::Heartbeat));
        let heartbeat_alarms_suspended =
            heartbeat_candidate && self.suspension.is_heartbeat_alarm_suspended().await;

        let input = RuleInput {
            event,
            context: &context,
            heartbeat_alarms_suspended,
        };
        let Some(rule) = classify(&input) else {
            tracing::debug!(
                ci_id = event.ci_id,
                old_state = ?event.old_state,
                new_state = ?event.new_state,
                "no transition rule matched, dropping event"
            );
            return Ok(DispatchOutcome::NoMatch);
        };

        tracing::info!(
            ci_id = event.ci_id,
            rule = rule.name,
            source = context.source.as_ref().and_then(|s| s.source.as_deref()),
            status = context.source.as_ref().and_then(|s| s.status.as_deref()),
            old_state = ?event.old_state,
            new_state = ?event.new_state,
            "transition classified"
        );

        match rule.classification {
            Classification::ClosingNotification => {
                self.notifier.send_notification(event).await?;
                Ok(DispatchOutcome::Notified)
            }
            Classification::HeartbeatSuppressed => {
                tracing::warn!(
                    ci_id = event.ci_id,
                    "heartbeat alarms suppressed, no notification or auto-remediation for missing heartbeats"
                );
                Ok(DispatchOutcome::HeartbeatSuppressed)
            }
            Classification::Unhealthy => {
                self.bad_state.process_unhealthy(event).await?;
                Ok(DispatchOutcome::UnhealthyProcessed)
            }
            Classification::Overutilized => {
                self.flex_state
                    .process_overutilized(event, context.is_new_state)
                    .await?;
                Ok(DispatchOutcome::OverutilizedProcessed)
            }
            Classification::Underutilized => {
                self.flex_state
                    .process_underutilized(event, context.is_new_state, event.timestamp)
                    .await?;
                Ok(DispatchOutcome::UnderutilizedProcessed)
            }
            Classification::GatedNotification => {
                if self.notify_gate.should_notify(event, &context).await? {
                    self.notifier.send_notification(event).await?;
                    Ok(DispatchOutcome::Notified)
                } else {
                    tracing::debug!(
                        ci_id = event.ci_id,
                        "notify-worthiness gate declined, skipping notification"
                    );
                    Ok(DispatchOutcome::NotifySkipped)
                }
            }
            Classification::BadStateRecovery => {
                self.bad_state.process_good(event).await?;
                Ok(DispatchOutcome::GoodProcessed)
            }
            Classification::NotifyRecovery => {
                self.notifier.send_notification(event).await?;
                Ok(DispatchOutcome::Notified)
            }
        }
    }
}
