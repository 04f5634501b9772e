// ============================================================================
// spark-observable - Change Events
// The immutable record delivered to listeners for every content mutation
// ============================================================================

use crate::core::error::SequenceError;

// =============================================================================
// CHANGE EVENT
// =============================================================================

/// Describes one content mutation of an [`ObservableVec`].
///
/// `removed` holds the elements that left the vec in their pre-removal order,
/// `inserted` the elements that entered it in their final order. Positions are
/// absolute: `removed_at` is relative to the contents before the mutation,
/// `inserted_at` to the contents after it. A position is `None` exactly when
/// its sequence is empty.
///
/// `cleared` marks events that replace the entire visible contents (reverse,
/// sort): `inserted` then carries everything, starting at 0.
///
/// Cleared events and the bootstrap event a listener receives on registration
/// always report `inserted_at == Some(0)`, even when there is nothing to insert.
///
/// # Example
///
/// ```
/// use spark_observable::{listener, ChangeEvent, ObservableVec};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut letters = ObservableVec::from_vec(vec!["A", "B"]);
/// let seen: Rc<RefCell<Vec<ChangeEvent<&str>>>> = Rc::default();
///
/// let log = seen.clone();
/// letters.listen(listener(move |e: &ChangeEvent<&str>| log.borrow_mut().push(e.clone())));
/// letters.push("C");
///
/// let seen = seen.borrow();
/// assert_eq!(seen[0], ChangeEvent::insert(0, vec!["A", "B"]));
/// assert_eq!(seen[1], ChangeEvent::insert(2, vec!["C"]));
/// ```
///
/// [`ObservableVec`]: crate::collections::ObservableVec
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChangeEvent<T> {
    /// The whole contents were replaced
    pub cleared: bool,

    /// Elements that left the vec
    pub removed: Vec<T>,

    /// Where the removal started
    #[cfg_attr(feature = "serde", serde(serialize_with = "sentinel::serialize"))]
    pub removed_at: Option<usize>,

    /// Elements that entered the vec
    pub inserted: Vec<T>,

    /// Where the insertion started
    #[cfg_attr(feature = "serde", serde(serialize_with = "sentinel::serialize"))]
    pub inserted_at: Option<usize>,
}

impl<T> ChangeEvent<T> {
    /// Elements entered at `at`.
    pub fn insert(at: usize, inserted: Vec<T>) -> Self {
        Self {
            cleared: false,
            removed: Vec::new(),
            removed_at: None,
            inserted_at: Some(at),
            inserted,
        }
    }

    /// Elements left from `at`.
    pub fn remove(at: usize, removed: Vec<T>) -> Self {
        Self {
            cleared: false,
            removed_at: Some(at),
            removed,
            inserted: Vec::new(),
            inserted_at: None,
        }
    }

    /// A range starting at `at` was overwritten.
    ///
    /// Either side may be empty, in which case its position collapses to `None`.
    pub fn replace(at: usize, removed: Vec<T>, inserted: Vec<T>) -> Self {
        Self {
            cleared: false,
            removed_at: (!removed.is_empty()).then_some(at),
            removed,
            inserted_at: (!inserted.is_empty()).then_some(at),
            inserted,
        }
    }

    /// The whole contents were replaced by `contents`.
    pub fn cleared(contents: Vec<T>) -> Self {
        Self {
            cleared: true,
            removed: Vec::new(),
            removed_at: None,
            inserted: contents,
            inserted_at: Some(0),
        }
    }

    /// Number of elements this event removes, minus the number it inserts.
    ///
    /// Cleared events report zero: they restate the contents without changing
    /// the length.
    pub fn len_delta(&self) -> isize {
        if self.cleared {
            return 0;
        }
        self.inserted.len() as isize - self.removed.len() as isize
    }

    /// Check that positions agree with the element lists.
    ///
    /// A position is `None` exactly when its list is empty, with one
    /// exception: an event that inserts nothing and removes nothing may report
    /// `inserted_at == Some(0)` (the bootstrap event of an empty vec). A
    /// cleared event removes nothing and inserts at 0.
    pub fn validate(&self) -> Result<(), SequenceError> {
        if self.cleared {
            if !self.removed.is_empty() || self.removed_at.is_some() {
                return Err(SequenceError::MalformedEvent("cleared event must not remove"));
            }
            if self.inserted_at != Some(0) {
                return Err(SequenceError::MalformedEvent("cleared event must insert at 0"));
            }
            return Ok(());
        }
        if self.removed_at.is_none() != self.removed.is_empty() {
            return Err(SequenceError::MalformedEvent(
                "removedAt must be -1 exactly when removed is empty",
            ));
        }
        let empty_bootstrap =
            self.inserted.is_empty() && self.removed.is_empty() && self.inserted_at == Some(0);
        if self.inserted_at.is_none() != self.inserted.is_empty() && !empty_bootstrap {
            return Err(SequenceError::MalformedEvent(
                "insertedAt must be -1 exactly when inserted is empty",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// SENTINEL ENCODING
// =============================================================================

/// `None` positions travel as `-1`, the shape consumers of the flat record expect.
#[cfg(feature = "serde")]
mod sentinel {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match at {
            Some(at) => s.serialize_i64(*at as i64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        match i64::deserialize(d)? {
            -1 => Ok(None),
            raw if raw < -1 => Err(D::Error::custom(format_args!(
                "position {raw} is below the -1 sentinel"
            ))),
            raw => usize::try_from(raw).map(Some).map_err(D::Error::custom),
        }
    }
}

/// Wire shape of a [`ChangeEvent`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChangeEvent<T> {
    cleared: bool,
    removed: Vec<T>,
    #[serde(deserialize_with = "sentinel::deserialize")]
    removed_at: Option<usize>,
    inserted: Vec<T>,
    #[serde(deserialize_with = "sentinel::deserialize")]
    inserted_at: Option<usize>,
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for ChangeEvent<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawChangeEvent::<T>::deserialize(deserializer)?;
        let event = ChangeEvent {
            cleared: raw.cleared,
            removed: raw.removed,
            removed_at: raw.removed_at,
            inserted: raw.inserted,
            inserted_at: raw.inserted_at,
        };
        event
            .validate()
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(event)
    }
}

// =============================================================================
// TESTS
// =============================================================================
