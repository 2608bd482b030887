//! # Emitter: reentrancy-safe synchronous notification.
//!
//! [`Emitter`] delivers to a **fixed snapshot** of the subscriber list, so
//! listeners may freely subscribe, unsubscribe, and even call
//! [`Emitter::notify`] again while a pass is running.
//!
//! ## What it guarantees
//! - `notify()` delivers to exactly the entries captured when the pass began,
//!   in registration order.
//! - Mutations during a pass go to a lazily-created "next" list
//!   (copy-on-first-write) and take effect from the next pass.
//! - A nested `notify()` runs a full pass over the latest list, including
//!   mutations the enclosing pass has already accumulated.
//!
//! ## What it does **not** guarantee
//! - No isolation: a panicking listener unwinds out of `notify()` and the
//!   remaining snapshot entries do not run.
//! - No cross-thread use: the emitter is `!Send`; "concurrency" here means
//!   reentrancy on one thread.
//!
//! ## Diagram
//! ```text
//!    notify()                         subscribe / unsubscribe during the pass
//!        │                                        │
//!        ├─► snapshot of current ─► f1() f2() …   └─► next = copy of current,
//!        │                          (iterated as captured)   then mutated
//!        └─► pass ends (depth 0): current ◄── next
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use super::entry::{EntryId, Listener, ListenerEntry};
use super::handle::Subscription;

/// Shared emitter state. Handles hold a `Weak` to this; the emitter and its
/// clones hold strong references.
pub(crate) struct Inner {
    /// List delivered to during an ongoing or most recently completed pass.
    current: Vec<ListenerEntry>,
    /// Live set as of "right now"; exists only while a pass is active and a
    /// mutation has occurred (copy-on-first-write from `current`).
    next: Option<Vec<ListenerEntry>>,
    /// Number of in-progress (possibly nested) `notify()` calls.
    depth: usize,
    /// Id sequence for new entries; never reused.
    id_seq: u64,
}

impl Inner {
    fn new() -> Self {
        Self {
            current: Vec::new(),
            next: None,
            depth: 0,
            id_seq: 0,
        }
    }

    fn alloc_id(&mut self) -> EntryId {
        let id = EntryId(self.id_seq);
        self.id_seq += 1;
        id
    }

    /// Returns the list future passes will deliver to.
    ///
    /// Inside a pass this is the "next" list, created on first mutation as a
    /// copy of `current` so the snapshot being iterated is never touched.
    /// Outside a pass, `next` is `None` and `current` is mutated directly.
    fn live_mut(&mut self) -> &mut Vec<ListenerEntry> {
        if self.depth > 0 && self.next.is_none() {
            self.next = Some(self.current.clone());
        }
        match self.next.as_mut() {
            Some(next) => next,
            None => &mut self.current,
        }
    }

    fn live(&self) -> &[ListenerEntry] {
        self.next.as_deref().unwrap_or(&self.current)
    }

    /// Removes the entry with the given id from the live list.
    ///
    /// Idempotent: returns `false` when the entry is already gone.
    pub(crate) fn remove(&mut self, id: EntryId) -> bool {
        let live = self.live_mut();
        match live.iter().position(|e| e.id == id) {
            Some(idx) => {
                live.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, id: EntryId) -> bool {
        self.live().iter().any(|e| e.id == id)
    }
}

/// Synchronous listener registry with snapshot delivery.
///
/// Cheap to clone (clones share one registry, the way a channel sender is
/// cloned). Not `Send`: the contract is single-threaded, cooperative use, so
/// interior state lives in `Rc<RefCell<_>>` and no locking is involved even
/// though arbitrary reentrancy is supported.
///
/// ### Properties
/// - **Snapshot delivery**: `notify()` iterates the list as captured at pass
///   start; mutations during the pass take effect from the next pass.
/// - **Identity-based entries**: each `subscribe` creates an independent
///   entry, even for an identical callable.
/// - **Infallible API**: no operation returns an error; double unsubscribe
///   and notify-with-no-subscribers are defined no-ops.
#[derive(Clone)]
pub struct Emitter {
    inner: Rc<RefCell<Inner>>,
}

impl Emitter {
    /// Creates a fresh, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::new())),
        }
    }

    /// Registers a listener; the returned [`Subscription`] removes it.
    ///
    /// If a pass is active, the listener lands on the "next" list and is first
    /// delivered to on the next pass, never the in-flight one.
    ///
    /// No uniqueness constraint: subscribing the same callable twice creates
    /// two independent entries with independent handles.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let listener: Listener = Rc::new(listener);
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.alloc_id();
            inner.live_mut().push(ListenerEntry { id, listener });
            trace!(id = id.0, in_pass = (inner.depth > 0), "listener subscribed");
            id
        };
        Subscription::new(Rc::downgrade(&self.inner), id)
    }

    /// Notifies every listener registered as of the start of this pass.
    ///
    /// Listeners run synchronously, in registration order. Reentrant
    /// `subscribe`/`unsubscribe`/`notify` calls from inside a listener are
    /// fully supported: mutations are deferred to the next pass, and a nested
    /// `notify()` runs its own pass over the latest list.
    ///
    /// A panicking listener unwinds out of this call; the remaining snapshot
    /// entries are skipped, but the emitter stays consistent and usable.
    pub fn notify(&self) {
        let snapshot: Vec<ListenerEntry> = {
            let mut inner = self.inner.borrow_mut();
            inner.depth += 1;
            trace!(
                depth = inner.depth,
                listeners = inner.live().len(),
                "notification pass started"
            );
            // A nested pass observes the live list, including mutations the
            // enclosing pass already accumulated; the outermost pass sees
            // `current` (next cannot exist at depth 0).
            inner.live().to_vec()
        };

        // Borrow released above: listeners may reenter the emitter freely.
        // The guard closes the pass even if a listener panics.
        let _pass = PassGuard {
            inner: Rc::clone(&self.inner),
        };
        for entry in &snapshot {
            (entry.listener)();
        }
    }

    /// Number of live entries (reflects in-pass mutations immediately).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().live().len()
    }

    /// True if there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().live().is_empty()
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Emitter")
            .field("listeners", &inner.live().len())
            .field("depth", &inner.depth)
            .finish()
    }
}

/// Closes a notification pass on drop.
///
/// Runs on both the normal and the unwinding path, so the depth counter and
/// promotion stay consistent when a listener panics. Only the outermost pass
/// promotes: an inner pass must not flip a half-finished accumulation out from
/// under the pass that owns it.
struct PassGuard {
    inner: Rc<RefCell<Inner>>,
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.depth -= 1;
        if inner.depth == 0 {
            if let Some(next) = inner.next.take() {
                trace!(listeners = next.len(), "promoted pending subscriber list");
                inner.current = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    /// Invocation counter plus a cloneable listener that bumps it.
    fn counted() -> (Rc<Cell<u32>>, impl Fn() + Clone + 'static) {
        let hits = Rc::new(Cell::new(0u32));
        let h = Rc::clone(&hits);
        (hits, move || h.set(h.get() + 1))
    }

    #[test]
    fn test_notify_without_subscribers_is_noop() {
        let emitter = Emitter::new();
        emitter.notify();
        assert!(emitter.is_empty());
        assert_eq!(emitter.len(), 0);
    }

    #[test]
    fn test_delivers_in_registration_order() {
        let emitter = Emitter::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            emitter.subscribe(move || order.borrow_mut().push(name));
        }

        emitter.notify();
        emitter.notify();
        assert_eq!(*order.borrow(), ["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_supports_multiple_subscriptions() {
        let emitter = Emitter::new();
        let (hits_a, listener_a) = counted();
        let (hits_b, listener_b) = counted();

        let sub_a = emitter.subscribe(listener_a.clone());
        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (1, 0));

        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (2, 0));

        let sub_b = emitter.subscribe(listener_b);
        assert_eq!((hits_a.get(), hits_b.get()), (2, 0));

        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (3, 1));

        sub_a.unsubscribe();
        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (3, 2));

        sub_b.unsubscribe();
        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (3, 2));

        emitter.subscribe(listener_a);
        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (4, 2));
    }

    #[test]
    fn test_unsubscribe_between_passes() {
        let emitter = Emitter::new();
        let (hits_a, listener_a) = counted();
        let (hits_b, listener_b) = counted();

        let sub_a = emitter.subscribe(listener_a);
        emitter.subscribe(listener_b);

        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (1, 1));

        sub_a.unsubscribe();
        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (1, 2));
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let emitter = Emitter::new();
        let (hits_a, listener_a) = counted();
        let (hits_b, listener_b) = counted();

        let sub_a = emitter.subscribe(listener_a);
        emitter.subscribe(listener_b);

        sub_a.unsubscribe();
        sub_a.unsubscribe();

        emitter.notify();
        assert_eq!((hits_a.get(), hits_b.get()), (0, 1));
    }

    #[test]
    fn test_duplicate_listener_entries_are_independent() {
        let emitter = Emitter::new();
        let (hits, listener) = counted();

        emitter.subscribe(listener.clone());
        let sub_second = emitter.subscribe(listener);
        assert_eq!(emitter.len(), 2);

        sub_second.unsubscribe();
        sub_second.unsubscribe();

        emitter.notify();
        assert_eq!(hits.get(), 1);
        assert_eq!(emitter.len(), 1);
    }

    #[test]
    fn test_self_unsubscribe_takes_effect_next_pass() {
        let emitter = Emitter::new();
        let (hits_a, listener_a) = counted();
        let (hits_b, listener_b) = counted();
        let (hits_c, listener_c) = counted();

        emitter.subscribe(listener_a);
        let sub_b = Rc::new(RefCell::new(None::<Subscription>));
        let handle = emitter.subscribe({
            let sub_b = Rc::clone(&sub_b);
            move || {
                listener_b();
                if let Some(sub) = sub_b.borrow().as_ref() {
                    sub.unsubscribe();
                }
            }
        });
        *sub_b.borrow_mut() = Some(handle);
        emitter.subscribe(listener_c);

        // First pass still delivers to all three; the removal lands on "next".
        emitter.notify();
        emitter.notify();

        assert_eq!(hits_a.get(), 2);
        assert_eq!(hits_b.get(), 1);
        assert_eq!(hits_c.get(), 2);
    }

    #[test]
    fn test_in_pass_unsubscribe_all_defers_to_next_pass() {
        let emitter = Emitter::new();
        let handles: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let (hits_1, listener_1) = counted();
        let (hits_2, listener_2) = counted();
        let (hits_3, listener_3) = counted();

        handles.borrow_mut().push(emitter.subscribe(listener_1));
        handles.borrow_mut().push(emitter.subscribe({
            let handles = Rc::clone(&handles);
            move || {
                listener_2();
                for sub in handles.borrow().iter() {
                    sub.unsubscribe();
                }
            }
        }));
        handles.borrow_mut().push(emitter.subscribe(listener_3));

        emitter.notify();
        assert_eq!((hits_1.get(), hits_2.get(), hits_3.get()), (1, 1, 1));

        emitter.notify();
        assert_eq!((hits_1.get(), hits_2.get(), hits_3.get()), (1, 1, 1));
    }

    #[test]
    fn test_in_pass_subscribe_defers_to_next_pass() {
        let emitter = Emitter::new();

        let (hits_1, listener_1) = counted();
        let (hits_2, listener_2) = counted();
        let (hits_3, listener_3) = counted();

        emitter.subscribe(listener_1);
        emitter.subscribe({
            let emitter = emitter.clone();
            let added = Cell::new(false);
            move || {
                listener_2();
                if !added.get() {
                    added.set(true);
                    emitter.subscribe(listener_3.clone());
                }
            }
        });

        emitter.notify();
        assert_eq!((hits_1.get(), hits_2.get(), hits_3.get()), (1, 1, 0));

        emitter.notify();
        assert_eq!((hits_1.get(), hits_2.get(), hits_3.get()), (2, 2, 1));
    }

    #[test]
    fn test_nested_notify_uses_latest_list() {
        let emitter = Emitter::new();

        let (hits_1, listener_1) = counted();
        let (hits_2, listener_2) = counted();
        let (hits_3, listener_3) = counted();
        let (hits_4, listener_4) = counted();

        let sub_1 = Rc::new(RefCell::new(None::<Subscription>));
        let sub_4 = Rc::new(RefCell::new(None::<Subscription>));

        let handle = emitter.subscribe({
            let emitter = emitter.clone();
            let sub_1 = Rc::clone(&sub_1);
            let sub_4 = Rc::clone(&sub_4);
            let hits_1 = Rc::clone(&hits_1);
            let hits_2 = Rc::clone(&hits_2);
            let hits_3 = Rc::clone(&hits_3);
            let hits_4 = Rc::clone(&hits_4);
            let listener_4 = listener_4.clone();
            move || {
                listener_1();
                assert_eq!(
                    (hits_1.get(), hits_2.get(), hits_3.get(), hits_4.get()),
                    (1, 0, 0, 0),
                    "first entry must run before the rest of the snapshot"
                );

                if let Some(sub) = sub_1.borrow().as_ref() {
                    sub.unsubscribe();
                }
                *sub_4.borrow_mut() = Some(emitter.subscribe(listener_4.clone()));
                emitter.notify();

                assert_eq!(
                    (hits_1.get(), hits_2.get(), hits_3.get(), hits_4.get()),
                    (1, 1, 1, 1),
                    "nested pass must see the accumulated mutations"
                );
            }
        });
        *sub_1.borrow_mut() = Some(handle);
        emitter.subscribe(listener_2);
        emitter.subscribe(listener_3);

        emitter.notify();
        assert_eq!(
            (hits_1.get(), hits_2.get(), hits_3.get(), hits_4.get()),
            (1, 2, 2, 1),
            "outer pass must finish its own snapshot after the nested one"
        );

        sub_4.borrow().as_ref().unwrap().unsubscribe();
        emitter.notify();
        assert_eq!(
            (hits_1.get(), hits_2.get(), hits_3.get(), hits_4.get()),
            (1, 3, 3, 1)
        );
    }

    #[test]
    fn test_len_tracks_in_pass_mutations_immediately() {
        let emitter = Emitter::new();
        let (_, listener_a) = counted();
        let (_, listener_b) = counted();

        let sub_a = Rc::new(RefCell::new(None::<Subscription>));
        let observed_len = Rc::new(Cell::new(usize::MAX));

        let handle = emitter.subscribe({
            let emitter = emitter.clone();
            let sub_a = Rc::clone(&sub_a);
            let observed_len = Rc::clone(&observed_len);
            move || {
                if let Some(sub) = sub_a.borrow().as_ref() {
                    sub.unsubscribe();
                }
                observed_len.set(emitter.len());
            }
        });
        *sub_a.borrow_mut() = Some(handle);
        emitter.subscribe(listener_a);
        emitter.subscribe(listener_b);

        assert_eq!(emitter.len(), 3);
        emitter.notify();
        assert_eq!(observed_len.get(), 2, "len must reflect the live list mid-pass");
        assert_eq!(emitter.len(), 2);
    }

    #[test]
    fn test_unsubscribe_outside_pass_applies_directly() {
        let emitter = Emitter::new();
        let (hits, listener) = counted();
        let sub = emitter.subscribe(listener);

        emitter.notify();
        assert_eq!(hits.get(), 1);

        // Mutations outside a pass apply to "current" directly; the next pass
        // picks them up without any promotion step.
        sub.unsubscribe();
        emitter.notify();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_emitter_usable_after_listener_panic() {
        let emitter = Emitter::new();
        let (hits, listener) = counted();

        let panicker = emitter.subscribe(|| panic!("listener failure"));
        emitter.subscribe(listener);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            emitter.notify();
        }));
        assert!(result.is_err());
        // The panicker ran first, so the second entry was skipped: no isolation.
        assert_eq!(hits.get(), 0);

        // The pass guard closed the pass; the emitter keeps working.
        panicker.unsubscribe();
        emitter.notify();
        assert_eq!(hits.get(), 1);
        assert_eq!(emitter.len(), 1);
    }

    #[test]
    fn test_debug_reports_live_count() {
        let emitter = Emitter::new();
        emitter.subscribe(|| {});
        let rendered = format!("{emitter:?}");
        assert!(rendered.contains("listeners: 1"), "got: {rendered}");
        assert!(rendered.contains("depth: 0"), "got: {rendered}");
    }
}
