// ============================================================================
// spark-observable - Reactivity Module
// Listener registration and synchronous dispatch
// ============================================================================

pub mod listeners;

pub use listeners::{listener, Listener, ListenerSet};
