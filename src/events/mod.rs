pub mod change_event;
pub mod context;
pub mod states;

// Re-export key types for convenience
pub use change_event::{ChangeEvent, SourceEvent};
pub use context::DerivedContext;
pub use states::{SourceKind, StateLabel};
