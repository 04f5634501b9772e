// ============================================================================
// spark-observable - ObservableVec
// A Vec that reports every content mutation to its listeners
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Index, Range, RangeBounds};
use std::slice::{Iter, SliceIndex};

use tracing::{debug, trace};

use crate::core::bounds::{self, normalize, resolve_range};
use crate::core::event::ChangeEvent;
use crate::reactivity::listeners::{Listener, ListenerSet};

// =============================================================================
// OBSERVABLE VEC
// =============================================================================

/// A Vec with synchronous change events.
///
/// Reads behave like a slice (the vec derefs to `[T]`). Writes go through the
/// methods below, each of which fires at most one [`ChangeEvent`] to every
/// registered listener before returning. Calls that change nothing fire
/// nothing.
///
/// Bounded operations (`fill`, `copy_within`, `splice`, `slice`, ...) take
/// `isize` positions: negative values count back from the end and anything
/// out of range is clamped, the way native array methods behave.
///
/// # Example
///
/// ```
/// use spark_observable::{listener, ChangeEvent, ObservableVec};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut letters = ObservableVec::from_vec(vec!["A", "B", "C", "D", "E", "F"]);
///
/// let events: Rc<RefCell<Vec<ChangeEvent<&str>>>> = Rc::default();
/// let log = events.clone();
/// letters.listen(listener(move |e: &ChangeEvent<&str>| log.borrow_mut().push(e.clone())));
/// events.borrow_mut().clear();
///
/// letters.copy_within(3..5, 1);
/// assert_eq!(letters, ["A", "D", "E", "D", "E", "F"]);
/// assert_eq!(
///     events.borrow()[0],
///     ChangeEvent::replace(1, vec!["B", "C"], vec!["D", "E"]),
/// );
/// ```
pub struct ObservableVec<T> {
    /// The underlying data
    data: Vec<T>,

    /// Who hears about changes
    listeners: ListenerSet<T>,
}

impl<T> ObservableVec<T> {
    /// Create a new empty observable vec.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create an observable vec with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Create an observable vec from an existing vec. No event is fired.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            listeners: ListenerSet::new(),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Returns the number of elements in the vec.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vec contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the vec.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a reference to the element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    /// Returns the contents as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Converts into the underlying Vec, dropping all listeners.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    /// Deregister `listener`. It receives nothing further, starting with the
    /// next event. Unknown listeners are ignored.
    pub fn stop_listening(&self, listener: &Listener<T>) {
        let removed = self.listeners.remove(listener);
        debug!(removed, listeners = self.listeners.len(), "stop_listening");
    }

    /// Whether `listener` is registered.
    pub fn is_listening(&self, listener: &Listener<T>) -> bool {
        self.listeners.contains(listener)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // STRUCTURAL
    // =========================================================================

    /// Shortens the vec to `len` elements without firing an event.
    ///
    /// This is the counterpart of assigning an array's `length`: a structural
    /// adjustment rather than a content mutation, so listeners are not told.
    /// Use [`splice`](Self::splice) for a reported removal.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Report `event` to every listener.
    fn fire(&self, op: &'static str, event: ChangeEvent<T>) {
        trace!(
            op,
            cleared = event.cleared,
            removed = event.removed.len(),
            removed_at = ?event.removed_at,
            inserted = event.inserted.len(),
            inserted_at = ?event.inserted_at,
            listeners = self.listeners.len(),
            "change"
        );
        self.listeners.dispatch(&event);
    }
}

impl<T: Clone> ObservableVec<T> {
    // =========================================================================
    // LISTENERS
    // =========================================================================

    /// Register `listener` and immediately send it the bootstrap event: the
    /// current contents as one insertion at 0.
    ///
    /// Registering the same `Rc` twice keeps a single membership (it still
    /// receives a second bootstrap event).
    pub fn listen(&self, listener: Listener<T>) {
        let added = self.listeners.insert(listener.clone());
        debug!(added, listeners = self.listeners.len(), "listen");
        listener(&ChangeEvent::insert(0, self.data.clone()));
    }

    // =========================================================================
    // SET
    // =========================================================================

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> T {
        let old = std::mem::replace(&mut self.data[index], value.clone());
        self.fire(
            "set",
            ChangeEvent::replace(index, vec![old.clone()], vec![value]),
        );
        old
    }

    /// Replaces the element at `index` if it exists.
    ///
    /// Returns the old value, or `None` (and fires nothing) when out of range.
    pub fn try_set(&mut self, index: usize, value: T) -> Option<T> {
        if index < self.data.len() {
            Some(self.set(index, value))
        } else {
            None
        }
    }

    // =========================================================================
    // PUSH / POP
    // =========================================================================

    /// Appends one element. Returns the new length.
    pub fn push(&mut self, value: T) -> usize {
        let at = self.data.len();
        self.data.push(value.clone());
        self.fire("push", ChangeEvent::insert(at, vec![value]));
        self.data.len()
    }

    /// Appends every item as one insertion. Returns the new length.
    ///
    /// No items, no event.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return self.data.len();
        }
        let at = self.data.len();
        self.data.extend_from_slice(&items);
        self.fire("push", ChangeEvent::insert(at, items));
        self.data.len()
    }

    /// Removes the last element and returns it, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.data.pop()?;
        self.fire("pop", ChangeEvent::remove(self.data.len(), vec![value.clone()]));
        Some(value)
    }

    // =========================================================================
    // SHIFT / UNSHIFT
    // =========================================================================

    /// Removes the first element and returns it, or `None` if empty.
    pub fn shift(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let value = self.data.remove(0);
        self.fire("shift", ChangeEvent::remove(0, vec![value.clone()]));
        Some(value)
    }

    /// Prepends every item, keeping their order. Returns the new length.
    pub fn unshift<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return self.data.len();
        }
        self.data.splice(0..0, items.iter().cloned());
        self.fire("unshift", ChangeEvent::insert(0, items));
        self.data.len()
    }

    // =========================================================================
    // INSERT / REMOVE
    // =========================================================================

    /// Inserts an element at position `index`, shifting later elements right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.data.insert(index, value.clone());
        self.fire("insert", ChangeEvent::insert(index, vec![value]));
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let value = self.data.remove(index);
        self.fire("remove", ChangeEvent::remove(index, vec![value.clone()]));
        value
    }

    /// Removes and returns the element at `index` if it exists.
    pub fn try_remove(&mut self, index: usize) -> Option<T> {
        if index < self.data.len() {
            Some(self.remove(index))
        } else {
            None
        }
    }

    /// Removes every element as one removal at 0.
    pub fn clear(&mut self) {
        if self.data.is_empty() {
            return;
        }
        let removed: Vec<T> = self.data.drain(..).collect();
        self.fire("clear", ChangeEvent::remove(0, removed));
    }

    // =========================================================================
    // REVERSE / SORT
    // =========================================================================

    /// Reverses the order of elements.
    ///
    /// Always fires a cleared event carrying the new contents, even when the
    /// order did not change.
    pub fn reverse(&mut self) -> &mut Self {
        self.data.reverse();
        self.fire_cleared("reverse");
        self
    }

    /// Sorts the vec (stable). Always fires a cleared event.
    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.data.sort();
        self.fire_cleared("sort");
        self
    }

    /// Sorts the vec with a comparator (stable). Always fires a cleared event.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data.sort_by(compare);
        self.fire_cleared("sort");
        self
    }

    /// Sorts the vec by a key function (stable). Always fires a cleared event.
    pub fn sort_by_key<K, F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.data.sort_by_key(f);
        self.fire_cleared("sort");
        self
    }

    fn fire_cleared(&self, op: &'static str) {
        self.fire(op, ChangeEvent::cleared(self.data.clone()));
    }

    // =========================================================================
    // FILL / COPY WITHIN
    // =========================================================================

    /// Overwrites `range` with clones of `value`.
    ///
    /// The range is resolved relative to the length; nothing happens when it
    /// starts at or past the end or is empty.
    ///
    /// ```
    /// use spark_observable::ObservableVec;
    ///
    /// let mut v = ObservableVec::from_vec(vec!["A", "B", "C"]);
    /// v.fill("Z", -4..-1);
    /// assert_eq!(v, ["Z", "Z", "C"]);
    /// ```
    pub fn fill<R: RangeBounds<isize>>(&mut self, value: T, range: R) -> &mut Self {
        let len = self.data.len();
        let Range { start, end } = resolve_range(&range, len);
        if start >= len || end <= start {
            return self;
        }
        let removed = self.data[start..end].to_vec();
        self.data[start..end].fill(value);
        let inserted = self.data[start..end].to_vec();
        self.fire("fill", ChangeEvent::replace(start, removed, inserted));
        self
    }

    /// Copies the elements in `src` over the elements starting at `dest`.
    ///
    /// Both are resolved relative to the length. The copy is shortened so it
    /// stays inside the vec; nothing happens when `src` is empty or `dest` is
    /// at or past the end. Overlapping ranges copy as if through a buffer.
    pub fn copy_within<R: RangeBounds<isize>>(&mut self, src: R, dest: isize) -> &mut Self {
        let len = self.data.len();
        let Range { start, end } = resolve_range(&src, len);
        if end <= start {
            return self;
        }
        let target = normalize(dest, len);
        if target >= len {
            return self;
        }
        let count = (end - start).min(len - target);
        let inserted = self.data[start..start + count].to_vec();
        let removed = self.data[target..target + count].to_vec();
        self.data[target..target + count].clone_from_slice(&inserted);
        self.fire("copy_within", ChangeEvent::replace(target, removed, inserted));
        self
    }

    // =========================================================================
    // SPLICE
    // =========================================================================

    /// Removes a run of elements and inserts `items` in their place.
    ///
    /// `start` is resolved relative to the length; at or past the end the call
    /// degrades to [`push_all`](Self::push_all). `delete_count` follows native
    /// splice rules: `None` deletes through the end when there are no items
    /// and nothing when there are; negative deletes nothing; large values stop
    /// at the end.
    ///
    /// Returns the removed elements.
    ///
    /// ```
    /// use spark_observable::ObservableVec;
    ///
    /// let mut v = ObservableVec::from_vec(vec!["A", "B", "C", "D", "E", "F"]);
    /// let removed = v.splice(0, Some(3), ["a", "b", "c"]);
    /// assert_eq!(removed, vec!["A", "B", "C"]);
    /// assert_eq!(v, ["a", "b", "c", "D", "E", "F"]);
    /// ```
    pub fn splice<I>(&mut self, start: isize, delete_count: Option<isize>, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let len = self.data.len();
        let start = normalize(start, len);
        if start >= len {
            self.push_all(items);
            return Vec::new();
        }
        let count = bounds::delete_count(delete_count, !items.is_empty(), start, len);
        if count == 0 && items.is_empty() {
            return Vec::new();
        }
        let removed: Vec<T> = self
            .data
            .splice(start..start + count, items.iter().cloned())
            .collect();
        self.fire(
            "splice",
            ChangeEvent::replace(start, removed.clone(), items),
        );
        removed
    }
}

// =============================================================================
// TYPE CHECKS
// =============================================================================

/// Marker for observable containers.
pub trait IsObservable {}

impl<T> IsObservable for ObservableVec<T> {}

/// Check if a value implements [`IsObservable`].
pub fn is_observable<T: IsObservable>(_: &T) -> bool {
    true
}

// =============================================================================
// STD TRAITS
// =============================================================================

impl<T> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ObservableVec<T> {
    /// Same data, no listeners.
    fn clone(&self) -> Self {
        Self::from_vec(self.data.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableVec")
            .field("data", &self.data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Deref for ObservableVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsRef<[T]> for ObservableVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> std::borrow::Borrow<[T]> for ObservableVec<T> {
    fn borrow(&self) -> &[T] {
        &self.data
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for ObservableVec<T> {
    type Output = I::Output;

    /// Read access. There is no `IndexMut`; write through [`ObservableVec::set`].
    fn index(&self, index: I) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> From<Vec<T>> for ObservableVec<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T, const N: usize> From<[T; N]> for ObservableVec<T> {
    fn from(data: [T; N]) -> Self {
        Self::from_vec(Vec::from(data))
    }
}

impl<T> From<ObservableVec<T>> for Vec<T> {
    fn from(vec: ObservableVec<T>) -> Self {
        vec.data
    }
}

impl<T> FromIterator<T> for ObservableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> Extend<T> for ObservableVec<T> {
    /// Appends as one insertion, like [`ObservableVec::push_all`].
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<T> IntoIterator for ObservableVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObservableVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: PartialEq<U>, U> PartialEq<ObservableVec<U>> for ObservableVec<T> {
    fn eq(&self, other: &ObservableVec<U>) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for ObservableVec<T> {}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for ObservableVec<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.data == *other
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for ObservableVec<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.data == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for ObservableVec<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.data == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for ObservableVec<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.data == other
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ObservableVec<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for ObservableVec<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_vec)
    }
}

// =============================================================================
// TESTS
// =============================================================================
