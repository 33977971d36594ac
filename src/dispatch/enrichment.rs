//! # Event Enrichment
//!
//! Attaches contextual data to an event ahead of classification: the cloud
//! the CI is deployed to, and component-level state counters aggregated per
//! manifest. Counter absence is expected and degrades to a warning.

use std::sync::Arc;

use crate::error::DomainError;
use crate::events::{ChangeEvent, DerivedContext};
use crate::handlers::{CloudAnnotator, StateCounterStore};

/// Orchestrates the enrichment sequence for one event.
pub struct EventEnricher {
    annotator: Arc<dyn CloudAnnotator>,
    counter_store: Arc<dyn StateCounterStore>,
}

impl EventEnricher {
    pub fn new(annotator: Arc<dyn CloudAnnotator>, counter_store: Arc<dyn StateCounterStore>) -> Self {
        Self {
            annotator,
            counter_store,
        }
    }

    /// Enrich the event in place and return its derived context.
    ///
    /// Runs the steps in order: cloud annotation, context derivation, counter
    /// fetch. Counters are attached at most once, and only when the store has
    /// data for the derived manifest id.
    pub async fn enrich(&self, event: &mut ChangeEvent) -> Result<DerivedContext, DomainError> {
        event.cloud_name = self.annotator.resolve_cloud_name(event.ci_id).await?;

        let context = DerivedContext::from_event(event);

        match context.manifest_id {
            Some(manifest_id) => {
                let mut counters = self
                    .counter_store
                    .fetch_state_counters(&[manifest_id])
                    .await?;
                match counters.remove(&manifest_id) {
                    Some(per_state) => {
                        tracing::info!(
                            ci_id = event.ci_id,
                            manifest_id = manifest_id,
                            counters = ?per_state,
                            "component level state counters attached"
                        );
                        event.component_state_counters = Some(per_state);
                    }
                    None => {
                        tracing::warn!(
                            ci_id = event.ci_id,
                            manifest_id = manifest_id,
                            "state counters found null, continuing without them"
                        );
                    }
                }
            }
            None => {
                tracing::warn!(
                    ci_id = event.ci_id,
                    "no manifest id derivable from payload, skipping counter fetch"
                );
            }
        }

        Ok(context)
    }
}
