//! # Opsmon Core
//!
//! Transition-classification and dispatch core of a monitoring and
//! auto-remediation pipeline. The core consumes state-change events for
//! monitored configuration items (CIs), enriches them with deployment
//! location and component-level state counters, classifies each transition
//! through an ordered first-match-wins rule table, and routes it to exactly
//! one downstream handler: notification, auto-repair (bad state), or
//! auto-scale (flex state).
//!
//! ## Architecture
//!
//! Everything outside the decision logic is an external collaborator behind a
//! narrow trait: the message transport, the suspension oracle, the cloud
//! annotator, the state-counter store, and the three handlers. Collaborators
//! are wired once at startup into a [`dispatch::Collaborators`] struct; the
//! listener and dispatcher themselves are stateless and safe to invoke
//! concurrently from multiple transport workers.
//!
//! ## Control flow
//!
//! Transport delivers a message → suspension check → kind filter → decode →
//! enrichment → classification → single handler call → acknowledge. The
//! acknowledgement fires for every delivery the core understands, including
//! recognized domain failures; only decode failures are left to transport
//! redelivery.
//!
//! ## Module Organization
//!
//! - [`events`] - Event data model and the closed state vocabulary
//! - [`dispatch`] - Rule table, enrichment, dispatcher, and listener
//! - [`handlers`] - Collaborator trait contracts
//! - [`messaging`] - Inbound envelope and acknowledgement contract
//! - [`config`] - Runtime configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup

pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod messaging;

pub use config::DispatchConfig;
pub use dispatch::{
    Collaborators, DispatchOutcome, EventDispatcher, ListenOutcome, OpsEventListener,
};
pub use error::{DomainError, TransportError};
pub use events::{ChangeEvent, DerivedContext, SourceEvent, SourceKind, StateLabel};
pub use messaging::{Acknowledger, EventEnvelope, CI_CHANGE_STATE_KIND};
