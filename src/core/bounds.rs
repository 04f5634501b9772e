// ============================================================================
// spark-observable - Bounds Normalization
// Relative index resolution shared by every bounded operation
// ============================================================================

use std::ops::{Bound, Range, RangeBounds};

/// Resolve a relative position against a length.
///
/// Negative positions count back from the end. The result is clamped into
/// `[0, len]`, which is how native bounded array operations treat their
/// start/end/target arguments.
///
/// # Example
/// ```
/// use spark_observable::core::bounds::normalize;
///
/// assert_eq!(normalize(1, 6), 1);
/// assert_eq!(normalize(-2, 6), 4);
/// assert_eq!(normalize(-7, 6), 0);
/// assert_eq!(normalize(8, 6), 6);
/// ```
pub fn normalize(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(len)
    }
}

/// The position just past `index`, clamped into `[0, len]`.
///
/// Used for inclusive ends and exclusive starts, where `-1` must resolve to
/// `len` rather than wrapping around.
fn past(index: isize, len: usize) -> usize {
    let absolute = if index < 0 {
        index.saturating_add_unsigned(len)
    } else {
        index
    };
    let past = absolute.saturating_add(1);
    if past < 0 { 0 } else { past.unsigned_abs().min(len) }
}

/// Resolve a relative range against a length.
///
/// Unbounded sides become `0` and `len`. The returned range may be empty or
/// inverted (`start >= end`); callers treat that as nothing to do.
///
/// # Example
/// ```
/// use spark_observable::core::bounds::resolve_range;
///
/// assert_eq!(resolve_range(&(-4..-1), 3), 0..2);
/// assert_eq!(resolve_range(&(4..), 6), 4..6);
/// assert_eq!(resolve_range(&(..=-1), 6), 0..6);
/// ```
pub fn resolve_range<R: RangeBounds<isize>>(range: &R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => normalize(start, len),
        Bound::Excluded(&start) => past(start, len),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => past(end, len),
        Bound::Excluded(&end) => normalize(end, len),
        Bound::Unbounded => len,
    };
    start..end
}

/// Resolve a splice delete count for a normalized `start`.
///
/// Omitted with no items to insert deletes through the end; omitted with
/// items deletes nothing. Negative counts delete nothing, and the count never
/// reaches past the end.
pub fn delete_count(count: Option<isize>, has_items: bool, start: usize, len: usize) -> usize {
    let available = len.saturating_sub(start);
    match count {
        None if has_items => 0,
        None => available,
        Some(count) if count <= 0 => 0,
        Some(count) => count.unsigned_abs().min(available),
    }
}

/// Resolve an index for `with`: negative positions count from the end but
/// are not clamped, so an unreachable index stays reportable.
pub fn offset_from_end(index: isize, len: usize) -> isize {
    if index < 0 { index + len as isize } else { index }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_within_range_is_unchanged() {
        assert_eq!(normalize(0, 3), 0);
        assert_eq!(normalize(2, 3), 2);
        assert_eq!(normalize(3, 3), 3);
    }

    #[test]
    fn negative_counts_from_end() {
        assert_eq!(normalize(-1, 3), 2);
        assert_eq!(normalize(-3, 3), 0);
    }

    #[test]
    fn very_negative_clamps_to_zero() {
        assert_eq!(normalize(-4, 3), 0);
        assert_eq!(normalize(isize::MIN, 3), 0);
    }

    #[test]
    fn past_length_clamps_to_length() {
        assert_eq!(normalize(10, 3), 3);
        assert_eq!(normalize(isize::MAX, 3), 3);
    }

    #[test]
    fn empty_length() {
        assert_eq!(normalize(0, 0), 0);
        assert_eq!(normalize(-1, 0), 0);
        assert_eq!(normalize(1, 0), 0);
    }

    #[test]
    fn unbounded_sides() {
        assert_eq!(resolve_range(&(..), 6), 0..6);
        assert_eq!(resolve_range(&(2..), 6), 2..6);
        assert_eq!(resolve_range(&(..3), 6), 0..3);
    }

    #[test]
    fn negative_range_ends() {
        assert_eq!(resolve_range(&(3..-1), 6), 3..5);
        // very negative end lands before every start
        assert_eq!(resolve_range(&(0..-7), 6), 0..0);
        assert_eq!(resolve_range(&(-7..2), 6), 0..2);
    }

    #[test]
    fn inclusive_end_runs_through_index() {
        assert_eq!(resolve_range(&(1..=2), 6), 1..3);
        assert_eq!(resolve_range(&(0..=-1), 6), 0..6);
        assert_eq!(resolve_range(&(0..=-7), 6), 0..0);
        assert_eq!(resolve_range(&(0..=100), 6), 0..6);
    }

    #[test]
    fn excluded_start() {
        use std::ops::Bound;
        let range = (Bound::Excluded(1), Bound::Unbounded);
        assert_eq!(resolve_range(&range, 6), 2..6);
        let range = (Bound::Excluded(-1), Bound::Unbounded);
        assert_eq!(resolve_range(&range, 6), 6..6);
    }

    #[test]
    fn inverted_range_is_reported_as_is() {
        let r = resolve_range(&(4..2), 6);
        assert!(r.start >= r.end);
    }

    #[test]
    fn delete_count_resolution() {
        // omitted, no items: through the end
        assert_eq!(delete_count(None, false, 2, 6), 4);
        // omitted, with items: nothing
        assert_eq!(delete_count(None, true, 2, 6), 0);
        // negative: nothing
        assert_eq!(delete_count(Some(-100), true, 1, 6), 0);
        assert_eq!(delete_count(Some(-1), false, 1, 6), 0);
        // past the end: clamped
        assert_eq!(delete_count(Some(10), false, 4, 6), 2);
        assert_eq!(delete_count(Some(3), false, 2, 6), 3);
    }

    #[test]
    fn offset_from_end_does_not_clamp() {
        assert_eq!(offset_from_end(-2, 3), 1);
        assert_eq!(offset_from_end(-6, 3), -3);
        assert_eq!(offset_from_end(100, 3), 100);
    }
}
