// ============================================================================
// spark-observable - Ergonomic Macros
// ============================================================================

/// Create an [`ObservableVec`](crate::ObservableVec) with `vec!` syntax.
///
/// No event is fired; listeners attached afterwards get the contents in their
/// bootstrap event.
///
/// # Usage
///
/// ```rust
/// use spark_observable::observable_vec;
///
/// let letters = observable_vec!["A", "B", "C"];
/// assert_eq!(letters.len(), 3);
///
/// let zeros = observable_vec![0; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
///
/// let empty: spark_observable::ObservableVec<i32> = observable_vec![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! observable_vec {
    // Case 1: Empty
    () => {
        $crate::ObservableVec::new()
    };
    // Case 2: Repeated element
    ($elem:expr; $n:expr) => {
        $crate::ObservableVec::from_vec(::std::vec![$elem; $n])
    };
    // Case 3: List of elements
    ($($x:expr),+ $(,)?) => {
        $crate::ObservableVec::from_vec(::std::vec![$($x),+])
    };
}
