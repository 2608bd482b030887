//! # sync-emitter
//!
//! **sync-emitter** is a minimal synchronous publish/subscribe registry for Rust.
//!
//! Callers register zero-argument listeners, trigger notification of all
//! currently-registered listeners, and may unsubscribe at any time — including
//! from inside a listener invoked during an in-progress notification. The crate
//! is designed as a leaf primitive for higher-level code (state containers,
//! change trackers, invalidation chains).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  subscribe(f) ────► current list [A, B, C]
//!                          │
//!                          │  notify() takes a snapshot of the list
//!                          ▼
//!                 ┌── pass (snapshot [A, B, C]) ──┐
//!                 │  A()                          │
//!                 │  B() ── unsubscribe(B) ───────┼──► next list [A, C]
//!                 │  C()                          │    (copy-on-first-write,
//!                 └───────────────────────────────┘     created lazily)
//!                          │
//!                          ▼
//!            pass ends: promotion — current ◄── next
//! ```
//!
//! ### Lifecycle of a pass
//! ```text
//! notify()
//!   ├─► depth += 1
//!   ├─► snapshot = next list if an enclosing pass created one, else current
//!   ├─► invoke each snapshot entry, in registration order
//!   │     ├─ subscribe/unsubscribe here ──► applied to "next", never to
//!   │     │                                 the snapshot being iterated
//!   │     └─ nested notify() here ────────► full inner pass over the
//!   │                                       latest list (own depth +1/-1)
//!   └─► depth -= 1; at depth 0, promote "next" to "current"
//! ```
//!
//! ## Guarantees
//! - A pass delivers to exactly the entries captured in its snapshot, in
//!   registration order; mutations during the pass never skip, re-enter, or
//!   reorder already-captured entries.
//! - A listener subscribed during a pass is first delivered to on the *next*
//!   pass; a listener unsubscribed during a pass still receives the current
//!   one (unless it already ran).
//! - Unsubscribe handles are idempotent, and remain safe to invoke after the
//!   emitter itself was dropped.
//! - Registering the same callable twice creates two independent entries;
//!   entries are identified by handle, never by comparing listener values.
//!
//! ## Non-guarantees
//! - No payloads, no async or cross-thread delivery: listeners are `Fn()` and
//!   run synchronously on the calling thread ([`Emitter`] is `!Send`).
//! - No isolation between listeners: a panicking listener unwinds out of
//!   [`Emitter::notify`] and the remaining snapshot entries do not run. The
//!   emitter itself stays consistent and usable afterwards.
//!
//! ## Features
//! | Area           | Description                                              | Key types        |
//! |----------------|----------------------------------------------------------|------------------|
//! | **Registry**   | Subscribe listeners, notify them, inspect the live set.  | [`Emitter`]      |
//! | **Handles**    | Idempotent per-entry unsubscription and liveness checks. | [`Subscription`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`TraceListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use sync_emitter::Emitter;
//!
//! let emitter = Emitter::new();
//!
//! let hits = Rc::new(Cell::new(0u32));
//! let h = Rc::clone(&hits);
//! let sub = emitter.subscribe(move || h.set(h.get() + 1));
//!
//! emitter.notify();
//! assert_eq!(hits.get(), 1);
//!
//! sub.unsubscribe();
//! emitter.notify();
//! assert_eq!(hits.get(), 1); // no longer delivered to
//! ```
mod emitter;

// ---- Public re-exports ----

pub use emitter::{Emitter, Listener, Subscription};

// Optional: expose a simple tracing-backed listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod listeners;
#[cfg(feature = "logging")]
pub use listeners::TraceListener;
