// ============================================================================
// spark-observable - Errors
// ============================================================================

use thiserror::Error;

/// Errors returned by [`ObservableVec`](crate::collections::ObservableVec)
/// operations.
///
/// Almost every operation clamps out-of-range input instead of failing; the
/// one exception is [`with`](crate::collections::ObservableVec::with), which
/// has no sensible clamped meaning. Events read back from outside the crate
/// are checked with [`ChangeEvent::validate`](crate::core::event::ChangeEvent::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The resolved index is outside `[0, len)`.
    ///
    /// `index` is the value after negative indices were offset from the end,
    /// so `with(-6, _)` on three elements reports `-3`.
    #[error("0 <= {index} < {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// A [`ChangeEvent`](crate::core::event::ChangeEvent) whose positions
    /// disagree with its element lists.
    #[error("malformed change event: {0}")]
    MalformedEvent(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_bounds() {
        let err = SequenceError::IndexOutOfRange { index: -3, len: 3 };
        assert_eq!(err.to_string(), "0 <= -3 < 3");

        let err = SequenceError::IndexOutOfRange { index: 100, len: 3 };
        assert_eq!(err.to_string(), "0 <= 100 < 3");
    }

    #[test]
    fn display_names_malformed_event() {
        let err = SequenceError::MalformedEvent("removedAt must be -1 exactly when removed is empty");
        assert_eq!(
            err.to_string(),
            "malformed change event: removedAt must be -1 exactly when removed is empty"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SequenceError::IndexOutOfRange { index: 0, len: 0 });
    }
}
