// ============================================================================
// spark-observable - Collections
// ============================================================================
//
// ObservableVec is a Vec whose every content mutation is reported to its
// listeners as a single ChangeEvent. Mutations live in `vec`, the
// non-mutating constructors (slice, map, with, ...) in `derived`.
// ============================================================================

mod derived;
mod vec;

pub use vec::{is_observable, IsObservable, ObservableVec};
