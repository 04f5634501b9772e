// ============================================================================
// spark-observable - Derived Construction
// Non-mutating operations that build a fresh ObservableVec
// ============================================================================
//
// Every method here leaves the source untouched, fires nothing on it, and
// returns a new container with an empty listener set.
// ============================================================================

use std::cmp::Ordering;
use std::ops::{Range, RangeBounds};

use crate::collections::vec::ObservableVec;
use crate::core::bounds::{offset_from_end, resolve_range};
use crate::core::error::SequenceError;

impl<T> ObservableVec<T> {
    /// A new vec holding `f` applied to each element.
    ///
    /// ```
    /// use spark_observable::ObservableVec;
    ///
    /// let v = ObservableVec::from_vec(vec![1, 2, 3]);
    /// assert_eq!(v.map(|x| x * 2), [2, 4, 6]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> ObservableVec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// A new vec holding every item `f` produces for each element, in order.
    pub fn flat_map<U, I, F>(&self, mut f: F) -> ObservableVec<U>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        self.iter().flat_map(|x| f(x)).collect()
    }
}

impl<T: Clone> ObservableVec<T> {
    /// A new vec holding the elements in `range`.
    ///
    /// The range is resolved like every other bounded operation; an empty or
    /// inverted range gives an empty vec.
    pub fn slice<R: RangeBounds<isize>>(&self, range: R) -> Self {
        let Range { start, end } = resolve_range(&range, self.len());
        if end <= start {
            return Self::new();
        }
        Self::from_vec(self[start..end].to_vec())
    }

    /// A new vec holding these elements followed by each of `others`.
    ///
    /// ```
    /// use spark_observable::ObservableVec;
    ///
    /// let v = ObservableVec::from_vec(vec!["A", "B", "C"]);
    /// assert_eq!(v.concat([["D"], ["E"]]), ["A", "B", "C", "D", "E"]);
    /// assert_eq!(v, ["A", "B", "C"]);
    /// ```
    pub fn concat<I, S>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[T]>,
    {
        let mut data = self.to_vec();
        for other in others {
            data.extend_from_slice(other.as_ref());
        }
        Self::from_vec(data)
    }

    /// A new vec holding the elements for which `predicate` returns true.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|x| predicate(x)).cloned().collect()
    }

    /// A new vec with one level of nesting removed.
    ///
    /// ```
    /// use spark_observable::ObservableVec;
    ///
    /// let nested = ObservableVec::from_vec(vec![vec![1], vec![2, 3], vec![]]);
    /// assert_eq!(nested.flat(), [1, 2, 3]);
    /// ```
    pub fn flat<U>(&self) -> ObservableVec<U>
    where
        T: IntoIterator<Item = U>,
    {
        self.iter().cloned().flatten().collect()
    }

    /// A reversed copy.
    pub fn to_reversed(&self) -> Self {
        self.iter().rev().cloned().collect()
    }

    /// A sorted copy (stable).
    pub fn to_sorted(&self) -> Self
    where
        T: Ord,
    {
        let mut data = self.to_vec();
        data.sort();
        Self::from_vec(data)
    }

    /// A copy sorted with a comparator (stable).
    pub fn to_sorted_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut data = self.to_vec();
        data.sort_by(compare);
        Self::from_vec(data)
    }

    /// A copy with [`splice`](Self::splice) applied.
    pub fn to_spliced<I>(&self, start: isize, delete_count: Option<isize>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        // The clone has no listeners, so splicing it reports to nobody.
        let mut copy = self.clone();
        copy.splice(start, delete_count, items);
        copy
    }

    /// A copy with the element at `index` replaced by `value`.
    ///
    /// Negative indices count from the end. Unlike the clamping operations,
    /// an index that still falls outside `[0, len)` is an error, reported with
    /// the offset index.
    ///
    /// ```
    /// use spark_observable::{ObservableVec, SequenceError};
    ///
    /// let v = ObservableVec::from_vec(vec!["A", "B", "C"]);
    /// assert_eq!(v.with(-2, "Q").unwrap(), ["A", "Q", "C"]);
    ///
    /// let err = v.with(-6, "Q").unwrap_err();
    /// assert_eq!(err, SequenceError::IndexOutOfRange { index: -3, len: 3 });
    /// assert_eq!(err.to_string(), "0 <= -3 < 3");
    /// ```
    pub fn with(&self, index: isize, value: T) -> Result<Self, SequenceError> {
        let len = self.len();
        let index = offset_from_end(index, len);
        if index < 0 || index.unsigned_abs() >= len {
            return Err(SequenceError::IndexOutOfRange { index, len });
        }
        let mut data = self.to_vec();
        data[index.unsigned_abs()] = value;
        Ok(Self::from_vec(data))
    }
}

// =============================================================================
// TESTS
// =============================================================================
