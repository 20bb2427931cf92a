//! Core systems for Combokit.
//!
//! This crate provides the foundational components of the Combokit widget kit:
//!
//! - **Signal/Slot System**: Type-safe inter-component communication
//! - **Connection Management**: Ids, RAII guards, and emission blocking
//! - **Logging Targets**: Stable `tracing` target names per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use combokit_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};

use static_assertions::assert_impl_all;

assert_impl_all!(Signal<i32>: Send, Sync, Clone);
assert_impl_all!(ConnectionGuard<i32>: Send, Sync);
