// ============================================================================
// spark-observable - An Observable Vec for Rust
// ============================================================================
//
// ObservableVec<T> reads like a slice and mutates like a native array
// (push/pop/shift/unshift/splice/fill/copy_within/reverse/sort), and reports
// every content change to its listeners as exactly one ChangeEvent, delivered
// synchronously before the mutating call returns.
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;
pub mod reactivity;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::SequenceError;
pub use crate::core::event::ChangeEvent;

// Re-export the container and its listener API
pub use collections::{is_observable, IsObservable, ObservableVec};
pub use reactivity::listeners::{listener, Listener, ListenerSet};

// =============================================================================
// TESTS
// =============================================================================
