pub mod classifier;
pub mod dispatcher;
pub mod enrichment;
pub mod listener;

// Re-export key types for convenience
pub use classifier::{classify, Classification, RuleInput, TransitionRule, TRANSITION_RULES};
pub use dispatcher::{Collaborators, DispatchOutcome, EventDispatcher};
pub use enrichment::EventEnricher;
pub use listener::{ListenOutcome, OpsEventListener};
