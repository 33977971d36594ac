//! # Error Types
//!
//! Structured error handling for the dispatch core using thiserror.
//! Two families matter at the acknowledgement boundary: recognized domain
//! errors (the message is still acknowledged, redelivery would not help) and
//! transport errors (decode/ack failures, left to transport redelivery).

use thiserror::Error;

/// Recognized failure raised by a collaborator while handling an event.
///
/// These are well-understood conditions (malformed downstream state, business
/// rule violations). They are caught at the dispatch boundary, logged with
/// full context, and treated as terminal for that message.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{component} failed for ci {ci_id}: {message}")]
    Collaborator {
        component: String,
        ci_id: i64,
        message: String,
    },

    #[error("malformed downstream state for ci {ci_id}: {message}")]
    MalformedDownstreamState { ci_id: i64, message: String },

    #[error("business rule violation: {message}")]
    RuleViolation { message: String },
}

impl DomainError {
    /// Create a collaborator failure error
    pub fn collaborator(
        component: impl Into<String>,
        ci_id: i64,
        message: impl Into<String>,
    ) -> Self {
        Self::Collaborator {
            component: component.into(),
            ci_id,
            message: message.into(),
        }
    }

    /// Create a malformed downstream state error
    pub fn malformed_downstream_state(ci_id: i64, message: impl Into<String>) -> Self {
        Self::MalformedDownstreamState {
            ci_id,
            message: message.into(),
        }
    }

    /// Create a business rule violation error
    pub fn rule_violation(message: impl Into<String>) -> Self {
        Self::RuleViolation {
            message: message.into(),
        }
    }
}

/// Failure while interacting with the message transport.
///
/// A decode failure means the delivery is left unacknowledged so the
/// transport's redelivery semantics apply. An acknowledge failure can only be
/// surfaced; nothing can be done about it locally.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to decode message body: {message}")]
    Decode { message: String },

    #[error("failed to acknowledge delivery {delivery_id}: {message}")]
    Acknowledge {
        delivery_id: String,
        message: String,
    },
}

impl TransportError {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an acknowledge error
    pub fn acknowledge(delivery_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Acknowledge {
            delivery_id: delivery_id.into(),
            message: message.into(),
        }
    }
}
