//! Shared test fixtures: recording collaborator mocks and event builders.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use opsmon_core::error::{DomainError, TransportError};
use opsmon_core::events::{ChangeEvent, DerivedContext, StateLabel};
use opsmon_core::handlers::{
    BadStateHandler, CloudAnnotator, FlexStateHandler, Notifier, NotifyGate, StateCounterStore,
    SuspensionOracle,
};
use opsmon_core::messaging::Acknowledger;
use opsmon_core::Collaborators;

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Notify(i64),
    Unhealthy(i64),
    Good(i64),
    Overutilized { ci_id: i64, is_new_state: bool },
    Underutilized {
        ci_id: i64,
        is_new_state: bool,
        timestamp: i64,
    },
}

/// Shared invocation log all handler mocks append to.
#[derive(Default)]
pub struct Calls {
    invocations: Mutex<Vec<Invocation>>,
    pub gate_queries: AtomicUsize,
}

impl Calls {
    pub fn record(&self, invocation: Invocation) {
        self.invocations.lock().unwrap().push(invocation);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

pub struct StubOracle {
    pub processing_suspended: bool,
    pub heartbeat_suspended: bool,
}

#[async_trait]
impl SuspensionOracle for StubOracle {
    async fn is_processing_suspended(&self) -> bool {
        self.processing_suspended
    }

    async fn is_heartbeat_alarm_suspended(&self) -> bool {
        self.heartbeat_suspended
    }
}

pub struct StubAnnotator {
    pub cloud_name: Option<String>,
}

#[async_trait]
impl CloudAnnotator for StubAnnotator {
    async fn resolve_cloud_name(&self, _ci_id: i64) -> Result<Option<String>, DomainError> {
        Ok(self.cloud_name.clone())
    }
}

pub struct StubCounterStore {
    pub counters: HashMap<i64, HashMap<String, i64>>,
}

#[async_trait]
impl StateCounterStore for StubCounterStore {
    async fn fetch_state_counters(
        &self,
        manifest_ids: &[i64],
    ) -> Result<HashMap<i64, HashMap<String, i64>>, DomainError> {
        Ok(self
            .counters
            .iter()
            .filter(|(id, _)| manifest_ids.contains(id))
            .map(|(id, per_state)| (*id, per_state.clone()))
            .collect())
    }
}

/// Implements all three handler traits against the shared call log. Set
/// `fail` to make every handler raise a recognized domain error.
pub struct RecordingHandlers {
    pub calls: Arc<Calls>,
    pub fail: bool,
}

impl RecordingHandlers {
    fn check_failure(&self, ci_id: i64) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::collaborator("handler", ci_id, "induced failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Notifier for RecordingHandlers {
    async fn send_notification(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        self.check_failure(event.ci_id)?;
        self.calls.record(Invocation::Notify(event.ci_id));
        Ok(())
    }
}

#[async_trait]
impl BadStateHandler for RecordingHandlers {
    async fn process_unhealthy(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        self.check_failure(event.ci_id)?;
        self.calls.record(Invocation::Unhealthy(event.ci_id));
        Ok(())
    }

    async fn process_good(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        self.check_failure(event.ci_id)?;
        self.calls.record(Invocation::Good(event.ci_id));
        Ok(())
    }
}

#[async_trait]
impl FlexStateHandler for RecordingHandlers {
    async fn process_overutilized(
        &self,
        event: &ChangeEvent,
        is_new_state: bool,
    ) -> Result<(), DomainError> {
        self.check_failure(event.ci_id)?;
        self.calls.record(Invocation::Overutilized {
            ci_id: event.ci_id,
            is_new_state,
        });
        Ok(())
    }

    async fn process_underutilized(
        &self,
        event: &ChangeEvent,
        is_new_state: bool,
        timestamp: i64,
    ) -> Result<(), DomainError> {
        self.check_failure(event.ci_id)?;
        self.calls.record(Invocation::Underutilized {
            ci_id: event.ci_id,
            is_new_state,
            timestamp,
        });
        Ok(())
    }
}

pub struct StubGate {
    pub allow: bool,
    pub calls: Arc<Calls>,
}

#[async_trait]
impl NotifyGate for StubGate {
    async fn should_notify(
        &self,
        _event: &ChangeEvent,
        _context: &DerivedContext,
    ) -> Result<bool, DomainError> {
        self.calls.gate_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.allow)
    }
}

pub struct CountingAcknowledger {
    pub acks: AtomicUsize,
    pub fail: bool,
}

impl CountingAcknowledger {
    pub fn new() -> Self {
        Self {
            acks: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            acks: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.acks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Acknowledger for CountingAcknowledger {
    async fn ack(&self) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::acknowledge("test", "broker unreachable"));
        }
        self.acks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Wiring options for a test collaborator set.
pub struct Fixture {
    pub calls: Arc<Calls>,
    pub collaborators: Collaborators,
}

pub struct FixtureConfig {
    pub processing_suspended: bool,
    pub heartbeat_suspended: bool,
    pub gate_allows: bool,
    pub handlers_fail: bool,
    pub counters: HashMap<i64, HashMap<String, i64>>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            processing_suspended: false,
            heartbeat_suspended: false,
            gate_allows: true,
            handlers_fail: false,
            counters: HashMap::new(),
        }
    }
}

pub fn fixture(config: FixtureConfig) -> Fixture {
    let calls = Arc::new(Calls::default());
    let handlers = Arc::new(RecordingHandlers {
        calls: Arc::clone(&calls),
        fail: config.handlers_fail,
    });

    let collaborators = Collaborators {
        suspension: Arc::new(StubOracle {
            processing_suspended: config.processing_suspended,
            heartbeat_suspended: config.heartbeat_suspended,
        }),
        annotator: Arc::new(StubAnnotator {
            cloud_name: Some("east-1".to_string()),
        }),
        counter_store: Arc::new(StubCounterStore {
            counters: config.counters,
        }),
        notifier: Arc::clone(&handlers) as Arc<dyn Notifier>,
        bad_state: Arc::clone(&handlers) as Arc<dyn BadStateHandler>,
        flex_state: Arc::clone(&handlers) as Arc<dyn FlexStateHandler>,
        notify_gate: Arc::new(StubGate {
            allow: config.gate_allows,
            calls: Arc::clone(&calls),
        }),
    };

    Fixture {
        calls,
        collaborators,
    }
}

/// Build a `ChangeEvent` directly, bypassing the wire format.
pub fn change_event(
    ci_id: i64,
    old_state: Option<&str>,
    new_state: Option<&str>,
    payload: Option<&str>,
) -> ChangeEvent {
    ChangeEvent {
        ci_id,
        old_state: old_state.map(StateLabel::from),
        new_state: new_state.map(StateLabel::from),
        payload: payload.map(str::to_string),
        timestamp: 1714000000000,
        component_state_counters: None,
        cloud_name: None,
    }
}

pub const CLOSE_PAYLOAD: &str = r#"{"manifestId": 501, "state": "close", "source": "cpu-load", "status": "existing"}"#;
pub const OPEN_PAYLOAD: &str = r#"{"manifestId": 501, "state": "open", "source": "cpu-load", "status": "new"}"#;
pub const HEARTBEAT_PAYLOAD: &str =
    r#"{"manifestId": 501, "state": "open", "type": "heartbeat", "source": "heartbeat"}"#;
