//! Remote input events as delivered on a window's input queue.
//!
//! These mirror what the streaming service reports: device-addressed mouse
//! and keyboard events, hotplug notifications, and text-entry events coming
//! from the client's on-screen keyboard or IME.  Sub-types the backend does
//! not understand are carried as `Other(raw)` so they can be logged and
//! skipped rather than rejected at the boundary.

use serde::{Deserialize, Serialize};

use crate::keymap::RemoteKeyCode;

// ── Devices ──────────────────────────────────────────────────────────────────

/// Service-assigned handle for one physical input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceHandle(pub u64);

impl DeviceHandle {
    /// Sentinel marking a free device slot.
    pub const INVALID: DeviceHandle = DeviceHandle(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for DeviceHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Direction of a hotplug notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HotplugKind {
    Attached,
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseHotplugEvent {
    pub mouse: DeviceHandle,
    pub kind: HotplugKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardHotplugEvent {
    pub keyboard: DeviceHandle,
    pub kind: HotplugKind,
}

// ── Mouse ────────────────────────────────────────────────────────────────────

/// Button identifier as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteMouseButton {
    Left,
    Middle,
    Right,
    Button4,
    Button5,
    Other(u32),
}

/// Full pressed/released state of every button at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    pub button4: bool,
    pub button5: bool,
}

impl ButtonSnapshot {
    /// Returns a copy with `button` set to `pressed`.  `Other` buttons leave
    /// the snapshot unchanged.
    pub fn with(mut self, button: RemoteMouseButton, pressed: bool) -> Self {
        match button {
            RemoteMouseButton::Left => self.left = pressed,
            RemoteMouseButton::Middle => self.middle = pressed,
            RemoteMouseButton::Right => self.right = pressed,
            RemoteMouseButton::Button4 => self.button4 = pressed,
            RemoteMouseButton::Button5 => self.button5 = pressed,
            RemoteMouseButton::Other(_) => {}
        }
        self
    }

    /// Whether `button` is down in this snapshot.  `Other` buttons are never
    /// reported as down.
    pub fn is_pressed(&self, button: RemoteMouseButton) -> bool {
        match button {
            RemoteMouseButton::Left => self.left,
            RemoteMouseButton::Middle => self.middle,
            RemoteMouseButton::Right => self.right,
            RemoteMouseButton::Button4 => self.button4,
            RemoteMouseButton::Button5 => self.button5,
            RemoteMouseButton::Other(_) => false,
        }
    }
}

/// How the `x`/`y` of a move event should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateMode {
    Absolute,
    Relative,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseEventKind {
    Wheel {
        dx: i32,
        dy: i32,
    },
    ButtonDown {
        changed: RemoteMouseButton,
        state: ButtonSnapshot,
    },
    ButtonUp {
        changed: RemoteMouseButton,
        state: ButtonSnapshot,
    },
    Move {
        mode: CoordinateMode,
        x: i32,
        y: i32,
    },
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseInputEvent {
    pub mouse: DeviceHandle,
    pub kind: MouseEventKind,
}

impl MouseInputEvent {
    pub fn wheel(mouse: DeviceHandle, dx: i32, dy: i32) -> Self {
        Self {
            mouse,
            kind: MouseEventKind::Wheel { dx, dy },
        }
    }

    /// Button transition with the snapshot the service would report after it.
    pub fn button(
        mouse: DeviceHandle,
        changed: RemoteMouseButton,
        pressed: bool,
        before: ButtonSnapshot,
    ) -> Self {
        let state = before.with(changed, pressed);
        let kind = if pressed {
            MouseEventKind::ButtonDown { changed, state }
        } else {
            MouseEventKind::ButtonUp { changed, state }
        };
        Self { mouse, kind }
    }

    pub fn move_absolute(mouse: DeviceHandle, x: i32, y: i32) -> Self {
        Self {
            mouse,
            kind: MouseEventKind::Move {
                mode: CoordinateMode::Absolute,
                x,
                y,
            },
        }
    }

    pub fn move_relative(mouse: DeviceHandle, dx: i32, dy: i32) -> Self {
        Self {
            mouse,
            kind: MouseEventKind::Move {
                mode: CoordinateMode::Relative,
                x: dx,
                y: dy,
            },
        }
    }
}

// ── Keyboard ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardEventKind {
    KeyDown,
    KeyUp,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardInputEvent {
    pub keyboard: DeviceHandle,
    pub kind: KeyboardEventKind,
    pub code: RemoteKeyCode,
}

impl KeyboardInputEvent {
    pub fn down(keyboard: DeviceHandle, code: RemoteKeyCode) -> Self {
        Self {
            keyboard,
            kind: KeyboardEventKind::KeyDown,
            code,
        }
    }

    pub fn up(keyboard: DeviceHandle, code: RemoteKeyCode) -> Self {
        Self {
            keyboard,
            kind: KeyboardEventKind::KeyUp,
            code,
        }
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

/// Editing action requested by a text-entry client.
///
/// `None` means the event carries literal text instead of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAction {
    None,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Backspace,
    Next,
    Prev,
    Finish,
    Abort,
    Undo,
    Redo,
    Other(u32),
}

/// Qualifier on cursor-movement text actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorActionModifier {
    #[default]
    None,
    ByWord,
    Select,
    SelectByWord,
}

impl CursorActionModifier {
    pub fn by_word(self) -> bool {
        matches!(self, Self::ByWord | Self::SelectByWord)
    }

    pub fn selects(self) -> bool {
        matches!(self, Self::Select | Self::SelectByWord)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvent {
    pub action: TextAction,
    pub cursor_action_modifier: CursorActionModifier,
    pub text: String,
}

impl TextEvent {
    /// Literal text entry.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            action: TextAction::None,
            cursor_action_modifier: CursorActionModifier::None,
            text: text.into(),
        }
    }

    /// Editing action with no accompanying text.
    pub fn action(action: TextAction, cursor_action_modifier: CursorActionModifier) -> Self {
        Self {
            action,
            cursor_action_modifier,
            text: String::new(),
        }
    }
}

// ── Envelope ─────────────────────────────────────────────────────────────────

/// One entry on a window's input queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteInputEvent {
    Mouse(MouseInputEvent),
    MouseHotplug(MouseHotplugEvent),
    Keyboard(KeyboardInputEvent),
    KeyboardHotplug(KeyboardHotplugEvent),
    Text(TextEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handle_is_default_and_not_valid() {
        assert_eq!(DeviceHandle::default(), DeviceHandle::INVALID);
        assert!(!DeviceHandle::INVALID.is_valid());
        assert!(DeviceHandle(7).is_valid());
    }

    #[test]
    fn test_snapshot_is_pressed_reads_each_button() {
        let snapshot = ButtonSnapshot::default()
            .with(RemoteMouseButton::Middle, true)
            .with(RemoteMouseButton::Button5, true);

        assert!(snapshot.is_pressed(RemoteMouseButton::Middle));
        assert!(snapshot.is_pressed(RemoteMouseButton::Button5));
        assert!(!snapshot.is_pressed(RemoteMouseButton::Left));
        assert!(!snapshot.is_pressed(RemoteMouseButton::Other(9)));
    }

    #[test]
    fn test_button_constructor_updates_snapshot_and_kind() {
        // Arrange
        let before = ButtonSnapshot {
            right: true,
            ..ButtonSnapshot::default()
        };

        // Act
        let event = MouseInputEvent::button(DeviceHandle(1), RemoteMouseButton::Left, true, before);

        // Assert
        match event.kind {
            MouseEventKind::ButtonDown { changed, state } => {
                assert_eq!(changed, RemoteMouseButton::Left);
                assert!(state.left);
                assert!(state.right, "other buttons must be preserved");
            }
            other => panic!("expected ButtonDown, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_with_other_button_is_unchanged() {
        let snap = ButtonSnapshot::default().with(RemoteMouseButton::Other(9), true);
        assert_eq!(snap, ButtonSnapshot::default());
    }

    #[test]
    fn test_cursor_action_modifier_flags() {
        assert!(!CursorActionModifier::None.by_word());
        assert!(!CursorActionModifier::None.selects());
        assert!(CursorActionModifier::ByWord.by_word());
        assert!(!CursorActionModifier::ByWord.selects());
        assert!(CursorActionModifier::Select.selects());
        assert!(CursorActionModifier::SelectByWord.by_word());
        assert!(CursorActionModifier::SelectByWord.selects());
    }

    #[test]
    fn test_text_constructor_has_no_action() {
        let ev = TextEvent::text("hi");
        assert_eq!(ev.action, TextAction::None);
        assert_eq!(ev.text, "hi");
    }
}
