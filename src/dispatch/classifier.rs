//! # Transition Classification Rules
//!
//! The priority chain from the listener expressed as an explicit ordered rule
//! table: each rule pairs a predicate with a classification, evaluated
//! top-to-bottom with first-match-wins semantics. At most one rule fires per
//! event, which makes the one-handler-per-event invariant mechanically
//! checkable. Classification is a pure function of the event, its derived
//! context, and the heartbeat-suspension flag; it performs no I/O.

use crate::events::{ChangeEvent, DerivedContext, SourceKind, StateLabel};

/// Everything a rule predicate may look at.
#[derive(Debug)]
pub struct RuleInput<'a> {
    pub event: &'a ChangeEvent,
    pub context: &'a DerivedContext,
    /// Result of the heartbeat-alarm suspension query for this event
    pub heartbeat_alarms_suspended: bool,
}

/// Action class a matched rule routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A partial alarm condition cleared while another is still active; the
    /// CI state did not change but a notification must still fire
    ClosingNotification,
    /// Unhealthy via a missing heartbeat while heartbeat alarms are
    /// suppressed; log only, no remediation
    HeartbeatSuppressed,
    /// CI turned unhealthy; auto-repair path
    Unhealthy,
    /// CI over its utilization threshold; auto-scale path
    Overutilized,
    /// CI under its utilization threshold; auto-scale path
    Underutilized,
    /// Notification-only condition, subject to the notify-worthiness gate
    GatedNotification,
    /// Recovery from unhealthy back to good
    BadStateRecovery,
    /// Recovery from an active-notification condition back to good
    NotifyRecovery,
}

/// One entry of the ordered rule table.
pub struct TransitionRule {
    pub name: &'static str,
    pub applies: fn(&RuleInput<'_>) -> bool,
    pub classification: Classification,
}

fn new_state_is(input: &RuleInput<'_>, label: StateLabel) -> bool {
    input.event.new_state.as_ref() == Some(&label)
}

fn old_state_is(input: &RuleInput<'_>, label: StateLabel) -> bool {
    input.event.old_state.as_ref() == Some(&label)
}

fn closing_notification(input: &RuleInput<'_>) -> bool {
    input.event.payload.is_some()
        && input.event.new_state.is_some()
        && input.event.new_state == input.event.old_state
        && matches!(input.context.source_state(), Some(StateLabel::Close))
}

fn heartbeat_suppressed(input: &RuleInput<'_>) -> bool {
    new_state_is(input, StateLabel::Unhealthy)
        && matches!(input.context.source_kind(), Some(SourceKind::Heartbeat))
        && input.heartbeat_alarms_suspended
}

fn unhealthy(input: &RuleInput<'_>) -> bool {
    new_state_is(input, StateLabel::Unhealthy)
}

fn overutilized(input: &RuleInput<'_>) -> bool {
    new_state_is(input, StateLabel::Overutilized)
}

fn underutilized(input: &RuleInput<'_>) -> bool {
    new_state_is(input, StateLabel::Underutilized)
}

fn gated_notification(input: &RuleInput<'_>) -> bool {
    // No payload means nothing to notify about; the branch is skipped
    // entirely rather than falling through to a default.
    input.event.payload.is_some() && new_state_is(input, StateLabel::Notify)
}

fn bad_state_recovery(input: &RuleInput<'_>) -> bool {
    new_state_is(input, StateLabel::Good) && old_state_is(input, StateLabel::Unhealthy)
}

fn notify_recovery(input: &RuleInput<'_>) -> bool {
    input.event.payload.is_some()
        && new_state_is(input, StateLabel::Good)
        && old_state_is(input, StateLabel::Notify)
}

/// The ordered rule table. Order is load-bearing: the heartbeat-suppression
/// sub-rule must precede the general unhealthy rule, and the closing
/// notification outranks everything.
pub const TRANSITION_RULES: &[TransitionRule] = &[
    TransitionRule {
        name: "closing-notification",
        applies: closing_notification,
        classification: Classification::ClosingNotification,
    },
    TransitionRule {
        name: "heartbeat-suppressed",
        applies: heartbeat_suppressed,
        classification: Classification::HeartbeatSuppressed,
    },
    TransitionRule {
        name: "unhealthy",
        applies: unhealthy,
        classification: Classification::Unhealthy,
    },
    TransitionRule {
        name: "overutilized",
        applies: overutilized,
        classification: Classification::Overutilized,
    },
    TransitionRule {
        name: "underutilized",
        applies: underutilized,
        classification: Classification::Underutilized,
    },
    TransitionRule {
        name: "gated-notification",
        applies: gated_notification,
        classification: Classification::GatedNotification,
    },
    TransitionRule {
        name: "bad-state-recovery",
        applies: bad_state_recovery,
        classification: Classification::BadStateRecovery,
    },
    TransitionRule {
        name: "notify-recovery",
        applies: notify_recovery,
        classification: Classification::NotifyRecovery,
    },
];

/// Classify one transition. Returns the first matching rule, or `None` when
/// the event is not actionable (expected, not an error).
pub fn classify(input: &RuleInput<'_>) -> Option<&'static TransitionRule> {
    TRANSITION_RULES.iter().find(|rule| (rule.applies)(input))
}
