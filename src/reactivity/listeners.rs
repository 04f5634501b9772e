// ============================================================================
// spark-observable - Listener Registry
// Identity-keyed listener membership and synchronous event dispatch
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::event::ChangeEvent;

// =============================================================================
// LISTENER
// =============================================================================

/// A change listener.
///
/// Membership is by identity: two listeners are the same member when they
/// share an allocation, so keep a clone of the `Rc` to deregister later.
pub type Listener<T> = Rc<dyn Fn(&ChangeEvent<T>)>;

/// Wrap a closure into a [`Listener`].
///
/// # Example
/// ```
/// use spark_observable::{listener, ChangeEvent, ObservableVec};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let count = Rc::new(Cell::new(0));
/// let hits = count.clone();
/// let ear = listener(move |_: &ChangeEvent<i32>| hits.set(hits.get() + 1));
///
/// let mut numbers = ObservableVec::from_vec(vec![1, 2, 3]);
/// numbers.listen(ear.clone());
/// numbers.pop();
/// numbers.stop_listening(&ear);
/// numbers.pop();
///
/// // bootstrap + one pop
/// assert_eq!(count.get(), 2);
/// ```
pub fn listener<T, F>(f: F) -> Listener<T>
where
    F: Fn(&ChangeEvent<T>) + 'static,
{
    Rc::new(f)
}

/// Identity of a listener, ignoring the vtable half of the fat pointer.
fn identity<T>(listener: &Listener<T>) -> *const () {
    Rc::as_ptr(listener) as *const ()
}

// =============================================================================
// LISTENER SET
// =============================================================================

/// The set of listeners registered on one container.
///
/// All methods take `&self`. The inner borrow is never held while a listener
/// runs: [`dispatch`](Self::dispatch) snapshots the members first, so a
/// listener may add or remove members (itself included). A member added
/// mid-dispatch hears from the next event on; a member removed mid-dispatch
/// is skipped if its turn has not come yet.
pub struct ListenerSet<T> {
    members: RefCell<Vec<Listener<T>>>,
}

impl<T> ListenerSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            members: RefCell::new(Vec::new()),
        }
    }

    /// Add a listener. Returns false if it was already a member.
    pub fn insert(&self, listener: Listener<T>) -> bool {
        let mut members = self.members.borrow_mut();
        let id = identity(&listener);
        if members.iter().any(|m| identity(m) == id) {
            return false;
        }
        members.push(listener);
        true
    }

    /// Remove a listener. Returns false if it was not a member.
    pub fn remove(&self, listener: &Listener<T>) -> bool {
        let mut members = self.members.borrow_mut();
        let id = identity(listener);
        let before = members.len();
        members.retain(|m| identity(m) != id);
        members.len() != before
    }

    /// Whether `listener` is currently a member.
    pub fn contains(&self, listener: &Listener<T>) -> bool {
        let id = identity(listener);
        self.members.borrow().iter().any(|m| identity(m) == id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Deliver `event` once to every member present when dispatch started
    /// and still present when its turn comes.
    pub fn dispatch(&self, event: &ChangeEvent<T>) {
        // Collect-then-call: cloning the Rcs releases the borrow before any
        // listener can reenter the set.
        let snapshot: Vec<Listener<T>> = self.members.borrow().iter().cloned().collect();
        for member in snapshot {
            if !self.contains(&member) {
                continue;
            }
            member(event);
        }
    }
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListenerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting() -> (Listener<i32>, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let hits = count.clone();
        (listener(move |_: &ChangeEvent<i32>| hits.set(hits.get() + 1)), count)
    }

    #[test]
    fn insert_is_idempotent_by_identity() {
        let set = ListenerSet::new();
        let (ear, _) = counting();

        assert!(set.insert(ear.clone()));
        assert!(!set.insert(ear.clone()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&ear));
    }

    #[test]
    fn structurally_equal_closures_are_distinct() {
        let set = ListenerSet::new();
        let a = listener(|_: &ChangeEvent<i32>| {});
        let b = listener(|_: &ChangeEvent<i32>| {});

        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_missing_is_noop() {
        let set = ListenerSet::new();
        let (ear, _) = counting();
        assert!(!set.remove(&ear));
        assert!(set.is_empty());
    }

    #[test]
    fn dispatch_reaches_every_member_once() {
        let set = ListenerSet::new();
        let (a, a_count) = counting();
        let (b, b_count) = counting();
        set.insert(a.clone());
        set.insert(a);
        set.insert(b);

        set.dispatch(&ChangeEvent::insert(0, vec![1]));
        assert_eq!(a_count.get(), 1);
        assert_eq!(b_count.get(), 1);
    }

    #[test]
    fn removed_member_gets_nothing() {
        let set = ListenerSet::new();
        let (ear, count) = counting();
        set.insert(ear.clone());
        set.remove(&ear);

        set.dispatch(&ChangeEvent::insert(0, vec![1]));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn self_removal_during_dispatch_applies_next_time() {
        let set: Rc<ListenerSet<i32>> = Rc::new(ListenerSet::new());
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Listener<i32>>>> = Rc::new(RefCell::new(None));

        let ear = {
            let set = set.clone();
            let count = count.clone();
            let slot = slot.clone();
            listener(move |_: &ChangeEvent<i32>| {
                count.set(count.get() + 1);
                if let Some(me) = slot.borrow().as_ref() {
                    set.remove(me);
                }
            })
        };
        *slot.borrow_mut() = Some(ear.clone());
        set.insert(ear);

        set.dispatch(&ChangeEvent::insert(0, vec![1]));
        set.dispatch(&ChangeEvent::insert(1, vec![2]));

        assert_eq!(count.get(), 1);
        assert!(set.is_empty());

        // break the Rc cycle
        slot.borrow_mut().take();
    }

    #[test]
    fn member_removed_by_earlier_member_is_skipped() {
        let set: Rc<ListenerSet<i32>> = Rc::new(ListenerSet::new());
        let (victim, victim_count) = counting();

        let remover = {
            let set = set.clone();
            let victim = victim.clone();
            listener(move |_: &ChangeEvent<i32>| {
                set.remove(&victim);
            })
        };
        set.insert(remover);
        set.insert(victim.clone());

        set.dispatch(&ChangeEvent::insert(0, vec![1]));
        assert_eq!(victim_count.get(), 0);
        assert!(!set.contains(&victim));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn member_added_during_dispatch_waits_for_next_event() {
        let set: Rc<ListenerSet<i32>> = Rc::new(ListenerSet::new());
        let (late, late_count) = counting();

        let adder = {
            let set = set.clone();
            let late = late.clone();
            listener(move |_: &ChangeEvent<i32>| {
                set.insert(late.clone());
            })
        };
        set.insert(adder);

        set.dispatch(&ChangeEvent::insert(0, vec![1]));
        assert_eq!(late_count.get(), 0);

        set.dispatch(&ChangeEvent::insert(1, vec![2]));
        assert_eq!(late_count.get(), 1);
    }
}
