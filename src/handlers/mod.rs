//! # Collaborator Contracts
//!
//! Trait seams for every external component the dispatch core talks to.
//! The core owns no shared mutable state; collaborators are responsible for
//! their own synchronization, retries, and deduplication. All traits are
//! object-safe and `Send + Sync` so the transport may run overlapping
//! deliveries on separate workers.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::DomainError;
use crate::events::{ChangeEvent, DerivedContext};

/// Reports whether processing is suspended, globally or for heartbeat alarms.
///
/// Queried per message so suspended/active behavior is deterministic in tests.
#[async_trait]
pub trait SuspensionOracle: Send + Sync {
    /// Whether all event processing is suspended for this environment
    async fn is_processing_suspended(&self) -> bool;

    /// Whether heartbeat-alarm processing specifically is suspended
    async fn is_heartbeat_alarm_suspended(&self) -> bool;
}

/// Resolves the deployment location of a CI from its deployed-to relations.
#[async_trait]
pub trait CloudAnnotator: Send + Sync {
    async fn resolve_cloud_name(&self, ci_id: i64) -> Result<Option<String>, DomainError>;
}

/// Returns per-state occurrence counts of the components under each manifest.
#[async_trait]
pub trait StateCounterStore: Send + Sync {
    async fn fetch_state_counters(
        &self,
        manifest_ids: &[i64],
    ) -> Result<HashMap<i64, HashMap<String, i64>>, DomainError>;
}

/// Sends the event notification for branches that only notify.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notification(&self, event: &ChangeEvent) -> Result<(), DomainError>;
}

/// Auto-repair side of remediation: unhealthy transitions and their recovery.
#[async_trait]
pub trait BadStateHandler: Send + Sync {
    async fn process_unhealthy(&self, event: &ChangeEvent) -> Result<(), DomainError>;

    async fn process_good(&self, event: &ChangeEvent) -> Result<(), DomainError>;
}

/// Auto-scale side of remediation: utilization transitions.
#[async_trait]
pub trait FlexStateHandler: Send + Sync {
    async fn process_overutilized(
        &self,
        event: &ChangeEvent,
        is_new_state: bool,
    ) -> Result<(), DomainError>;

    async fn process_underutilized(
        &self,
        event: &ChangeEvent,
        is_new_state: bool,
        timestamp: i64,
    ) -> Result<(), DomainError>;
}

/// Independent notify-worthiness check consulted before generic notifications.
#[async_trait]
pub trait NotifyGate: Send + Sync {
    async fn should_notify(
        &self,
        event: &ChangeEvent,
        context: &DerivedContext,
    ) -> Result<bool, DomainError>;
}
