//! # Example: basic
//!
//! Subscribe, notify, unsubscribe — the whole surface in one sitting.
//!
//! Demonstrates how to:
//! - Create an [`Emitter`] and register a couple of listeners.
//! - Trigger delivery with `notify()` (registration order).
//! - Stop delivery for one entry via its `Subscription` handle.
//!
//! ## Run
//! ```bash
//! RUST_LOG=trace cargo run --example basic
//! ```

use std::{cell::Cell, rc::Rc};

use sync_emitter::Emitter;
use tracing_subscriber::EnvFilter;

fn main() {
    // Surface the emitter's trace-level events when RUST_LOG asks for them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter = Emitter::new();

    // 1) Two independent listeners sharing nothing but the emitter
    let saves = Rc::new(Cell::new(0u32));
    let saves_handle = {
        let saves = Rc::clone(&saves);
        emitter.subscribe(move || {
            saves.set(saves.get() + 1);
            println!("[autosave] run #{}", saves.get());
        })
    };
    emitter.subscribe(|| println!("[audit] state changed"));

    // 2) Both run on every pass, in registration order
    emitter.notify();
    emitter.notify();

    // 3) Unsubscribe the first entry; only the audit listener remains
    saves_handle.unsubscribe();
    emitter.notify();

    println!("autosave ran {} times, {} listener(s) left", saves.get(), emitter.len());
}
