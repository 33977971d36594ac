//! Derived, per-event context computed before classification. Never persisted.

use super::change_event::{ChangeEvent, SourceEvent};
use super::states::{SourceKind, StateLabel};

/// Context derived from a `ChangeEvent` ahead of rule evaluation.
#[derive(Debug, Clone)]
pub struct DerivedContext {
    /// Logical group of the CI, taken from the parsed payload; `None` when
    /// the payload is absent or unparseable
    pub manifest_id: Option<i64>,
    /// Secondary classification of the originating event
    pub source: Option<SourceEvent>,
    /// True iff `new_state` is present and differs from `old_state`
    pub is_new_state: bool,
}

impl DerivedContext {
    /// Derive the context for one event.
    pub fn from_event(event: &ChangeEvent) -> Self {
        let source = event.source_event();
        let is_new_state = event.new_state.is_some() && event.new_state != event.old_state;

        Self {
            manifest_id: source.as_ref().map(|s| s.manifest_id),
            source,
            is_new_state,
        }
    }

    /// Open/close state of the originating alarm condition, if known.
    pub fn source_state(&self) -> Option<&StateLabel> {
        self.source.as_ref().and_then(|s| s.state.as_ref())
    }

    /// Monitor type that produced the originating event, if known.
    pub fn source_kind(&self) -> Option<&SourceKind> {
        self.source.as_ref().and_then(|s| s.kind.as_ref())
    }
}
