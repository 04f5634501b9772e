// ============================================================================
// spark-observable - Core Module
// Change events, bounds normalization and errors
// ============================================================================

pub mod bounds;
pub mod error;
pub mod event;

// Re-export commonly used items
pub use error::SequenceError;
pub use event::ChangeEvent;
