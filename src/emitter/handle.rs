//! # Unsubscribe handles.
//!
//! [`Subscription`] is the token returned by [`Emitter::subscribe`](crate::Emitter::subscribe).
//! It is bound to exactly one subscriber-list entry and removes exactly that
//! entry, even when the same callable was registered several times.
//!
//! ## Rules
//! - **Idempotent**: calling [`Subscription::unsubscribe`] again after the
//!   entry is gone does nothing.
//! - **Deferred inside a pass**: removal during an active notification pass
//!   lands on the pending list and takes effect from the next pass.
//! - **Outlives the emitter safely**: the handle holds a weak reference, so
//!   unsubscribing after the emitter was dropped is a defined no-op and the
//!   handle never keeps the registry alive on its own.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::trace;

use super::core::Inner;
use super::entry::EntryId;

/// Removes one subscriber-list entry; see the module docs for the rules.
#[derive(Debug)]
pub struct Subscription {
    inner: Weak<RefCell<Inner>>,
    id: EntryId,
}

impl Subscription {
    pub(crate) fn new(inner: Weak<RefCell<Inner>>, id: EntryId) -> Self {
        Self { inner, id }
    }

    /// Removes the bound entry from the live list.
    ///
    /// No-op when the entry was already removed or the emitter no longer
    /// exists. During an active pass the removal is deferred: the current
    /// pass still delivers to its snapshot.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            if inner.borrow_mut().remove(self.id) {
                trace!(id = self.id.0, "listener unsubscribed");
            }
        }
    }

    /// True while the bound entry is still on the live list.
    ///
    /// Reflects in-pass mutations immediately: a deferred removal reports
    /// inactive even though the in-flight pass may still deliver to the entry.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner
            .upgrade()
            .map_or(false, |inner| inner.borrow().contains(self.id))
    }
}
