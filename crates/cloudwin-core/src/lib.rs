//! # cloudwin-core
//!
//! Shared vocabulary for the cloudwin streaming window backend: canonical
//! keys, modifier flags and mouse buttons, library error codes, the remote
//! key-code translation table, and the event types the streaming service
//! delivers.
//!
//! This crate has no threads, no I/O and no dependency on the streaming
//! service itself.  Both the backend and the application wrapper build on it.
//!
//! - **`keymap`** – Remote (USB HID usage) key codes, canonical keys, and the
//!   [`KeycodeTable`] that translates between them.
//!
//! - **`domain`** – Values the windowing API hands to application code:
//!   [`Action`], [`Modifiers`], [`MouseButton`], [`ErrorCode`], [`WindowId`].
//!
//! - **`events`** – Input and lifecycle events exactly as the streaming
//!   service reports them, before any translation.

pub mod domain;
pub mod events;
pub mod keymap;

pub use domain::error::ErrorCode;
pub use domain::input::{Action, Modifiers, MouseButton};
pub use domain::window::WindowId;
pub use events::{LifecycleEvent, RemoteInputEvent, StreamState};
pub use keymap::{Key, KeycodeTable, RemoteKeyCode};
