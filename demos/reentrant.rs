//! # Example: reentrant
//!
//! A listener calls `notify()` again before the outer pass has finished.
//!
//! Demonstrates how to:
//! - Mutate the subscriber set from inside a pass (self-unsubscribe + add).
//! - Trigger a nested pass that observes the *latest* list — excluding the
//!   caller, including the listener it just added.
//! - Watch the outer pass resume and finish its own original snapshot.
//!
//! ## Flow
//! ```text
//! outer pass (snapshot: [bootstrap, worker])
//!   bootstrap:
//!     ├─► unsubscribe(bootstrap)      deferred: lands on "next"
//!     ├─► subscribe(cleanup)          deferred: lands on "next"
//!     └─► notify()                    nested pass over [worker, cleanup]
//!   worker:                           outer snapshot continues unchanged
//! promotion: current = [worker, cleanup]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example reentrant
//! ```

use std::{cell::RefCell, rc::Rc};

use sync_emitter::{Emitter, Subscription};

fn main() {
    let emitter = Emitter::new();

    let bootstrap = Rc::new(RefCell::new(None::<Subscription>));
    let handle = emitter.subscribe({
        let emitter = emitter.clone();
        let bootstrap = Rc::clone(&bootstrap);
        move || {
            println!("[bootstrap] first pass only; rewiring and re-notifying");
            if let Some(sub) = bootstrap.borrow().as_ref() {
                sub.unsubscribe();
            }
            emitter.subscribe(|| println!("[cleanup] tidy up"));

            println!("[bootstrap] -- nested pass begins");
            emitter.notify();
            println!("[bootstrap] -- nested pass done, outer pass resumes");
        }
    });
    *bootstrap.borrow_mut() = Some(handle);
    emitter.subscribe(|| println!("[worker] do the work"));

    println!("== outer pass");
    emitter.notify();

    println!("== steady state ({} listeners)", emitter.len());
    emitter.notify();
}
