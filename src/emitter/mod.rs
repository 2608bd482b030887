//! Listener registry: entries, handles, and the notification core.
//!
//! This module contains the embedded implementation of the emitter. The public
//! API is [`Emitter`] (subscribe/notify) and [`Subscription`] (per-entry
//! unsubscription), plus the [`Listener`] alias for stored callables.
//!
//! Internal modules:
//! - `entry`: listener entries and their identity;
//! - `core`: the emitter state machine (snapshots, copy-on-first-write, promotion);
//! - `handle`: idempotent unsubscribe handles.

mod core;
mod entry;
mod handle;

pub use core::Emitter;
pub use entry::Listener;
pub use handle::Subscription;
