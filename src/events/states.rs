//! # State Vocabulary
//!
//! State labels arrive as free-form strings on the wire and are decoded once
//! at the boundary into closed enumerations, so classification rules match on
//! variants instead of string equality. Unknown labels are preserved in
//! `Other` rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic state of a monitored CI, or of the alarm condition carried in the
/// event payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateLabel {
    /// CI is healthy
    Good,
    /// CI violated a health threshold
    Unhealthy,
    /// CI is over its utilization threshold
    Overutilized,
    /// CI is under its utilization threshold
    Underutilized,
    /// An active notification-only condition
    Notify,
    /// The originating alarm condition cleared
    Close,
    /// Any label this core does not classify on
    Other(String),
}

impl StateLabel {
    fn as_str(&self) -> &str {
        match self {
            Self::Good => "good",
            Self::Unhealthy => "unhealthy",
            Self::Overutilized => "overutilized",
            Self::Underutilized => "underutilized",
            Self::Notify => "notify",
            Self::Close => "close",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for StateLabel {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "good" => Self::Good,
            "unhealthy" => Self::Unhealthy,
            "overutilized" => Self::Overutilized,
            "underutilized" => Self::Underutilized,
            "notify" => Self::Notify,
            "close" => Self::Close,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for StateLabel {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<StateLabel> for String {
    fn from(label: StateLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Originating monitor type carried in the event payload.
///
/// Heartbeat events drive the suppression sub-rule for unhealthy transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceKind {
    Heartbeat,
    Other(String),
}

impl SourceKind {
    fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "heartbeat",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for SourceKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "heartbeat" => Self::Heartbeat,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for SourceKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<SourceKind> for String {
    fn from(kind: SourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
