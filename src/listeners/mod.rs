//! # Simple tracing-backed listener for debugging and demos.
//!
//! [`TraceListener`] emits a `tracing` event every time it is notified,
//! carrying a static label and a running invocation count. This is primarily
//! useful for development, debugging, and examples.
//!
//! ## Output format (with a `tracing` subscriber installed)
//! ```text
//! INFO listener notified label="autosave" hits=1
//! INFO listener notified label="autosave" hits=2
//! ```
//!
//! ## Example
//! ```rust
//! use sync_emitter::{Emitter, TraceListener};
//!
//! let emitter = Emitter::new();
//! let probe = TraceListener::new("autosave");
//! emitter.subscribe(probe.listener());
//!
//! emitter.notify();
//! assert_eq!(probe.hits(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use tracing::info;

/// Counting listener that logs each delivery.
///
/// Enabled via the `logging` feature. Emits an `info`-level `tracing` event
/// per notification and keeps a running hit count readable from outside the
/// emitter.
///
/// Not intended for production use - register your own closure for anything
/// beyond debugging and demos.
#[derive(Clone)]
pub struct TraceListener {
    label: &'static str,
    hits: Rc<Cell<u64>>,
}

impl TraceListener {
    /// Creates a probe with the given label (shown in every log line).
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            hits: Rc::new(Cell::new(0)),
        }
    }

    /// Number of times the probe has been notified so far.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Returns the closure to pass to [`Emitter::subscribe`](crate::Emitter::subscribe).
    ///
    /// May be called more than once; all returned closures share the same hit
    /// counter (they are separate entries with separate handles).
    #[must_use]
    pub fn listener(&self) -> impl Fn() + 'static {
        let probe = self.clone();
        move || {
            let hits = probe.hits.get() + 1;
            probe.hits.set(hits);
            info!(label = probe.label, hits, "listener notified");
        }
    }
}
