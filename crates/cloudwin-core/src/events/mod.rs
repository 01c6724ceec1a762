//! Event types produced by the remote streaming service.
//!
//! Input events arrive on a per-window queue; lifecycle events arrive on the
//! process-wide lifecycle subscription.

pub mod input;
pub mod lifecycle;

pub use input::{
    ButtonSnapshot, CoordinateMode, CursorActionModifier, DeviceHandle, KeyboardEventKind,
    KeyboardHotplugEvent, KeyboardInputEvent, MouseEventKind, MouseHotplugEvent,
    MouseInputEvent, RemoteMouseButton, RemoteInputEvent, HotplugKind, TextAction, TextEvent,
};
pub use lifecycle::{LifecycleEvent, StreamState};
