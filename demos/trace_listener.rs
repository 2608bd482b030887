//! # Example: trace_listener
//!
//! The built-in [`TraceListener`] probe from the `logging` feature.
//!
//! Demonstrates how to:
//! - Install a `tracing` subscriber so the probe's log lines are visible.
//! - Register the same probe twice (two entries, one shared hit counter).
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example trace_listener --features logging
//! ```

use sync_emitter::{Emitter, TraceListener};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter = Emitter::new();
    let probe = TraceListener::new("invalidation");

    emitter.subscribe(probe.listener());
    let extra = emitter.subscribe(probe.listener());

    emitter.notify(); // two entries -> two hits
    extra.unsubscribe();
    emitter.notify(); // one entry left

    println!("probe observed {} deliveries", probe.hits());
}
