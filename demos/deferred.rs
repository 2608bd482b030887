//! # Example: deferred
//!
//! Mutations issued during a pass take effect from the *next* pass.
//!
//! Demonstrates how to:
//! - Unsubscribe an entry from inside its own listener (it still receives the
//!   current pass, then disappears).
//! - Subscribe a new listener from inside a pass (it is first delivered to on
//!   the following pass).
//!
//! ## Flow
//! ```text
//! pass 1: greeter ── unsubscribes itself, subscribes "late"
//!         (snapshot unaffected: greeter still completes this pass)
//! pass 2: late only
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example deferred
//! ```

use std::{cell::RefCell, rc::Rc};

use sync_emitter::{Emitter, Subscription};

fn main() {
    let emitter = Emitter::new();

    let greeter = Rc::new(RefCell::new(None::<Subscription>));
    let handle = emitter.subscribe({
        let emitter = emitter.clone();
        let greeter = Rc::clone(&greeter);
        move || {
            println!("[greeter] hello — handing over from now on");
            if let Some(sub) = greeter.borrow().as_ref() {
                sub.unsubscribe();
            }
            emitter.subscribe(|| println!("[late] taking it from here"));
        }
    });
    *greeter.borrow_mut() = Some(handle);

    println!("-- pass 1 (greeter only; its replacement is deferred)");
    emitter.notify();

    println!("-- pass 2 (the late listener, subscribed mid-pass, now runs)");
    emitter.notify();
}
