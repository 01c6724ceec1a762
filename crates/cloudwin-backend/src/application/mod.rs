//! Application layer of the backend.
//!
//! - **`device_slots`** – Fixed-capacity tables of attached mice and keyboards,
//!   filled and emptied by hotplug events.
//!
//! - **`modifiers`** – Per-window Control/Shift/Alt cache fed by the six
//!   physical modifier keys.
//!
//! - **`consume_input`** – Turns one remote input event into zero or more
//!   canonical callbacks on an [`consume_input::InputSink`].
//!
//! - **`window_registry`** – Weak references to every open window's close
//!   signal, shared with the lifecycle monitor.
//!
//! - **`lifecycle`** – The background thread that watches the stream state
//!   and the termination latch that stops it.
//!
//! Nothing in this layer talks to the streaming service directly; it only
//! sees events that infrastructure has already dequeued.

pub mod consume_input;
pub mod device_slots;
pub mod lifecycle;
pub mod modifiers;
pub mod window_registry;
