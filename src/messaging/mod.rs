pub mod envelope;

// Re-export key types for convenience
pub use envelope::{Acknowledger, EventEnvelope, CI_CHANGE_STATE_KIND};
