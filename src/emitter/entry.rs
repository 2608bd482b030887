//! Listener entries and their identity.
//!
//! Each subscription stores a [`Listener`] paired with an [`EntryId`] assigned
//! from a per-emitter sequence. Entries are distinguished by id, never by
//! comparing listener values: registering the same callable twice creates two
//! independent, separately-unsubscribable entries.

use std::rc::Rc;

/// A registered callable.
///
/// Listeners take no arguments and return nothing; anything they need is
/// captured in the closure. Stored behind `Rc` so that snapshots taken by
/// [`Emitter::notify`](crate::Emitter::notify) are cheap reference bumps
/// rather than deep copies.
pub type Listener = Rc<dyn Fn()>;

/// Identity of one subscriber-list entry.
///
/// Ids are assigned from a monotonically increasing per-emitter sequence and
/// are never reused, so a stale handle can never remove a later entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct EntryId(pub(crate) u64);

/// One slot in a subscriber list: a listener plus its identity.
#[derive(Clone)]
pub(crate) struct ListenerEntry {
    pub(crate) id: EntryId,
    pub(crate) listener: Listener,
}
