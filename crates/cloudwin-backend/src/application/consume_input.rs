//! Per-window input consumer: remote input events to canonical callbacks.
//!
//! Each window owns one [`WindowInput`].  The platform dequeues events from
//! the window's input queue and hands them to [`WindowInput::consume`] one at
//! a time, strictly in queue order.  The consumer keeps the small amount of
//! state needed to present the remote devices as an ordinary local keyboard
//! and mouse:
//!
//! - which mice and keyboards are attached (see [`DeviceSlots`]),
//! - the cursor position and button state of each mouse,
//! - the pressed state of every key, used to suppress duplicate transitions,
//! - the Control/Shift/Alt modifier cache (see [`ModifierCache`]).
//!
//! Events that cannot be attributed to an attached device, and sub-types the
//! backend does not understand, are dropped with a `debug!` line.  Nothing in
//! here returns an error: a malformed remote event never stops the poll loop.

use cloudwin_core::events::{
    ButtonSnapshot, CoordinateMode, CursorActionModifier, HotplugKind, KeyboardEventKind,
    KeyboardHotplugEvent, KeyboardInputEvent, MouseEventKind, MouseHotplugEvent,
    MouseInputEvent, RemoteInputEvent, RemoteMouseButton, TextAction, TextEvent,
};
use cloudwin_core::keymap::REMOTE_KEY_COUNT;
use cloudwin_core::{Action, Key, KeycodeTable, Modifiers, MouseButton, RemoteKeyCode, WindowId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::device_slots::{Attach, DeviceSlots, MAX_CONNECTED_KEYBOARDS, MAX_CONNECTED_MICE};
use super::modifiers::ModifierCache;

/// Receiver of canonical input callbacks (the generic windowing layer).
///
/// Every method takes the id of the window the input belongs to.
pub trait InputSink {
    /// A key changed state.  `scancode` is the raw remote key code.
    fn key(&mut self, window: WindowId, key: Key, scancode: i32, action: Action, mods: Modifiers);

    /// A Unicode character was entered.  `plain` is `false` when Control or
    /// Alt was part of the input.
    fn char(&mut self, window: WindowId, codepoint: char, mods: Modifiers, plain: bool);

    fn mouse_button(&mut self, window: WindowId, button: MouseButton, action: Action, mods: Modifiers);

    fn cursor_pos(&mut self, window: WindowId, x: f64, y: f64);

    fn scroll(&mut self, window: WindowId, dx: f64, dy: f64);

    /// The window has been asked to close.
    fn window_close_request(&mut self, window: WindowId);
}

/// How literal text from a text-entry event is turned into char callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoding {
    /// One callback per Unicode scalar value of the UTF-8 text.
    #[default]
    Utf8,
    /// One callback per ASCII byte; text containing anything else is dropped.
    AsciiOnly,
}

// ── Per-device state ─────────────────────────────────────────────────────────

/// Cached position and button state of one attached mouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: ButtonSnapshot,
}

/// Pressed state of every remote key code of one attached keyboard.
///
/// A held code remembers the canonical key it was reported as, so state
/// queries by [`Key`] agree with the callbacks already delivered.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    pressed: [Option<Key>; REMOTE_KEY_COUNT],
}

impl KeyboardState {
    pub fn is_pressed(&self, code: RemoteKeyCode) -> bool {
        code.index().is_some_and(|idx| self.pressed[idx].is_some())
    }

    /// Whether any held code was reported as `key`.  Never true for
    /// [`Key::Unknown`].
    pub fn is_key_down(&self, key: Key) -> bool {
        key != Key::Unknown && self.pressed.iter().any(|held| *held == Some(key))
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            pressed: [None; REMOTE_KEY_COUNT],
        }
    }
}

fn canonical_button(button: RemoteMouseButton) -> Option<MouseButton> {
    match button {
        RemoteMouseButton::Left => Some(MouseButton::Left),
        RemoteMouseButton::Middle => Some(MouseButton::Middle),
        RemoteMouseButton::Right => Some(MouseButton::Right),
        RemoteMouseButton::Button4 => Some(MouseButton::Button4),
        RemoteMouseButton::Button5 => Some(MouseButton::Button5),
        RemoteMouseButton::Other(_) => None,
    }
}

fn remote_button(button: MouseButton) -> RemoteMouseButton {
    match button {
        MouseButton::Left => RemoteMouseButton::Left,
        MouseButton::Middle => RemoteMouseButton::Middle,
        MouseButton::Right => RemoteMouseButton::Right,
        MouseButton::Button4 => RemoteMouseButton::Button4,
        MouseButton::Button5 => RemoteMouseButton::Button5,
    }
}

/// Converts an application cursor coordinate to the cached whole-pixel
/// form.  Fractions truncate toward zero, values outside the `i32` range
/// clamp to its bounds and NaN becomes 0.
fn device_coord(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Key and modifiers synthesized for a text-entry editing action.
fn text_action_keypress(
    action: TextAction,
    cursor: CursorActionModifier,
) -> Option<(RemoteKeyCode, Modifiers)> {
    let mut cursor_mods = Modifiers::NONE;
    if cursor.by_word() {
        cursor_mods |= Modifiers::CONTROL;
    }
    if cursor.selects() {
        cursor_mods |= Modifiers::SHIFT;
    }

    let keypress = match action {
        TextAction::Up => (RemoteKeyCode::UP, cursor_mods),
        TextAction::Down => (RemoteKeyCode::DOWN, cursor_mods),
        TextAction::Left => (RemoteKeyCode::LEFT, cursor_mods),
        TextAction::Right => (RemoteKeyCode::RIGHT, cursor_mods),
        TextAction::PageUp => (RemoteKeyCode::PAGE_UP, cursor_mods),
        TextAction::PageDown => (RemoteKeyCode::PAGE_DOWN, cursor_mods),
        TextAction::Home => (RemoteKeyCode::HOME, cursor_mods),
        TextAction::End => (RemoteKeyCode::END, cursor_mods),
        TextAction::Delete => (RemoteKeyCode::DELETE_FORWARD, Modifiers::NONE),
        TextAction::Backspace => (RemoteKeyCode::BACKSPACE, Modifiers::NONE),
        TextAction::Next => (RemoteKeyCode::TAB, Modifiers::NONE),
        TextAction::Prev => (RemoteKeyCode::TAB, Modifiers::SHIFT),
        TextAction::Finish => (RemoteKeyCode::ENTER, Modifiers::NONE),
        TextAction::Abort => (RemoteKeyCode::ESCAPE, Modifiers::NONE),
        TextAction::Undo => (RemoteKeyCode::Z, Modifiers::CONTROL),
        TextAction::Redo => (RemoteKeyCode::Z, Modifiers::CONTROL | Modifiers::SHIFT),
        TextAction::None | TextAction::Other(_) => return None,
    };
    Some(keypress)
}

// ── Consumer ─────────────────────────────────────────────────────────────────

/// Input state and event dispatch for one window.
#[derive(Debug, Clone)]
pub struct WindowInput {
    window: WindowId,
    mice: DeviceSlots<MouseState, MAX_CONNECTED_MICE>,
    keyboards: DeviceSlots<KeyboardState, MAX_CONNECTED_KEYBOARDS>,
    modifiers: ModifierCache,
    text_decoding: TextDecoding,
}

impl WindowInput {
    pub fn new(window: WindowId, text_decoding: TextDecoding) -> Self {
        Self {
            window,
            mice: DeviceSlots::new(),
            keyboards: DeviceSlots::new(),
            modifiers: ModifierCache::new(),
            text_decoding,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Processes one dequeued event, emitting zero or more callbacks.
    pub fn consume(&mut self, table: &KeycodeTable, event: RemoteInputEvent, sink: &mut dyn InputSink) {
        match event {
            RemoteInputEvent::Mouse(ev) => self.on_mouse(ev, sink),
            RemoteInputEvent::MouseHotplug(ev) => self.on_mouse_hotplug(ev),
            RemoteInputEvent::Keyboard(ev) => self.on_keyboard(table, ev, sink),
            RemoteInputEvent::KeyboardHotplug(ev) => self.on_keyboard_hotplug(ev),
            RemoteInputEvent::Text(ev) => self.on_text(table, ev, sink),
        }
    }

    /// Modifiers currently held on this window's keyboard.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers.current()
    }

    /// Cached position of the first attached mouse, or the origin when no
    /// mouse is attached.
    pub fn cursor_pos(&self) -> (f64, f64) {
        self.mice
            .iter_attached()
            .next()
            .map(|(_, m)| (f64::from(m.x), f64::from(m.y)))
            .unwrap_or((0.0, 0.0))
    }

    /// Overwrites the cached position of every attached mouse.  No callback
    /// is emitted.  Values are truncated and clamped to whole pixels.
    pub fn set_cursor_pos(&mut self, x: f64, y: f64) {
        let (x, y) = (device_coord(x), device_coord(y));
        for (_, mouse) in self.mice.iter_attached_mut() {
            mouse.x = x;
            mouse.y = y;
        }
    }

    /// Last reported state of `key` on any attached keyboard.
    pub fn key(&self, key: Key) -> Action {
        let down = self.keyboards.iter_attached().any(|(_, kb)| kb.is_key_down(key));
        Action::from_pressed(down)
    }

    /// Last button snapshot adopted for `button` on any attached mouse.
    /// Snapshots count even when their event produced no callback.
    pub fn mouse_button(&self, button: MouseButton) -> Action {
        let remote = remote_button(button);
        let down = self
            .mice
            .iter_attached()
            .any(|(_, mouse)| mouse.buttons.is_pressed(remote));
        Action::from_pressed(down)
    }

    pub fn mice(&self) -> &DeviceSlots<MouseState, MAX_CONNECTED_MICE> {
        &self.mice
    }

    pub fn keyboards(&self) -> &DeviceSlots<KeyboardState, MAX_CONNECTED_KEYBOARDS> {
        &self.keyboards
    }

    // ── Mouse ────────────────────────────────────────────────────────────────

    fn on_mouse(&mut self, event: MouseInputEvent, sink: &mut dyn InputSink) {
        let window = self.window;
        let mods = self.modifiers.current();
        let Some(mouse) = self.mice.get_mut(event.mouse) else {
            debug!(%window, handle = event.mouse.0, "mouse event from unattached device dropped");
            return;
        };

        match event.kind {
            MouseEventKind::Wheel { dx, dy } => {
                sink.scroll(window, f64::from(dx), f64::from(dy));
            }
            MouseEventKind::ButtonDown { changed, state } => {
                mouse.buttons = state;
                emit_button(sink, window, changed, Action::Press, mods);
            }
            MouseEventKind::ButtonUp { changed, state } => {
                mouse.buttons = state;
                emit_button(sink, window, changed, Action::Release, mods);
            }
            MouseEventKind::Move { mode, x, y } => match mode {
                CoordinateMode::Absolute => {
                    mouse.x = x;
                    mouse.y = y;
                    sink.cursor_pos(window, f64::from(mouse.x), f64::from(mouse.y));
                }
                CoordinateMode::Relative => {
                    mouse.x = mouse.x.saturating_add(x);
                    mouse.y = mouse.y.saturating_add(y);
                    sink.cursor_pos(window, f64::from(mouse.x), f64::from(mouse.y));
                }
                CoordinateMode::Unknown => {
                    debug!(%window, "move with unknown coordinate mode ignored");
                }
            },
            MouseEventKind::Other(raw) => {
                debug!(%window, raw, "unknown mouse event type ignored");
            }
        }
    }

    fn on_mouse_hotplug(&mut self, event: MouseHotplugEvent) {
        match event.kind {
            HotplugKind::Attached => {
                self.mice.on_attach(event.mouse);
            }
            HotplugKind::Detached => {
                self.mice.on_detach(event.mouse);
            }
        }
    }

    // ── Keyboard ─────────────────────────────────────────────────────────────

    fn on_keyboard(&mut self, table: &KeycodeTable, event: KeyboardInputEvent, sink: &mut dyn InputSink) {
        let window = self.window;
        let pressed = match event.kind {
            KeyboardEventKind::KeyDown => true,
            KeyboardEventKind::KeyUp => false,
            KeyboardEventKind::Other(raw) => {
                debug!(%window, raw, "unknown keyboard event type ignored");
                return;
            }
        };
        let Some(keyboard) = self.keyboards.get_mut(event.keyboard) else {
            debug!(%window, handle = event.keyboard.0, "key event from unattached device dropped");
            return;
        };
        let Some(idx) = event.code.index() else {
            debug!(%window, code = event.code.0, "key code out of range dropped");
            return;
        };
        if keyboard.pressed[idx].is_some() == pressed {
            return;
        }

        let key = table.translate(event.code);
        let action = Action::from_pressed(pressed);
        sink.key(window, key, i32::from(event.code.0), action, self.modifiers.current());

        keyboard.pressed[idx] = pressed.then_some(key);
        self.modifiers.update(event.code, pressed);
    }

    fn on_keyboard_hotplug(&mut self, event: KeyboardHotplugEvent) {
        let slot_reset = match event.kind {
            HotplugKind::Attached => matches!(self.keyboards.on_attach(event.keyboard), Attach::New(_)),
            HotplugKind::Detached => self.keyboards.on_detach(event.keyboard).is_some(),
        };
        // Modifier state belongs to the keyboard that produced it.  A repeated
        // attach keeps the key cache, so it keeps the modifiers too.
        if slot_reset {
            self.modifiers.reset();
        }
    }

    // ── Text ─────────────────────────────────────────────────────────────────

    fn on_text(&mut self, table: &KeycodeTable, event: TextEvent, sink: &mut dyn InputSink) {
        let window = self.window;
        if event.action == TextAction::None {
            self.emit_text(&event.text, sink);
            return;
        }

        let Some((code, mods)) = text_action_keypress(event.action, event.cursor_action_modifier) else {
            debug!(%window, action = ?event.action, "unknown text action ignored");
            return;
        };
        let key = table.translate(code);
        let scancode = i32::from(code.0);
        sink.key(window, key, scancode, Action::Press, mods);
        sink.key(window, key, scancode, Action::Release, mods);
    }

    fn emit_text(&self, text: &str, sink: &mut dyn InputSink) {
        let window = self.window;
        match self.text_decoding {
            TextDecoding::Utf8 => {
                for ch in text.chars() {
                    sink.char(window, ch, Modifiers::NONE, true);
                }
            }
            TextDecoding::AsciiOnly => {
                if !text.is_ascii() {
                    warn!(%window, len = text.len(), "non-ASCII text input dropped");
                    return;
                }
                for ch in text.chars() {
                    sink.char(window, ch, Modifiers::NONE, true);
                }
            }
        }
    }
}

fn emit_button(
    sink: &mut dyn InputSink,
    window: WindowId,
    changed: RemoteMouseButton,
    action: Action,
    mods: Modifiers,
) {
    match canonical_button(changed) {
        Some(button) => sink.mouse_button(window, button, action, mods),
        None => debug!(%window, ?changed, "unrecognized mouse button, snapshot adopted"),
    }
}

// ── Recording sink ───────────────────────────────────────────────────────────

/// One callback captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Key {
        window: WindowId,
        key: Key,
        scancode: i32,
        action: Action,
        mods: Modifiers,
    },
    Char {
        window: WindowId,
        codepoint: char,
        mods: Modifiers,
        plain: bool,
    },
    MouseButton {
        window: WindowId,
        button: MouseButton,
        action: Action,
        mods: Modifiers,
    },
    CursorPos {
        window: WindowId,
        x: f64,
        y: f64,
    },
    Scroll {
        window: WindowId,
        dx: f64,
        dy: f64,
    },
    CloseRequest {
        window: WindowId,
    },
}

/// [`InputSink`] that records every callback in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InputSink for RecordingSink {
    fn key(&mut self, window: WindowId, key: Key, scancode: i32, action: Action, mods: Modifiers) {
        self.events.push(SinkEvent::Key {
            window,
            key,
            scancode,
            action,
            mods,
        });
    }

    fn char(&mut self, window: WindowId, codepoint: char, mods: Modifiers, plain: bool) {
        self.events.push(SinkEvent::Char {
            window,
            codepoint,
            mods,
            plain,
        });
    }

    fn mouse_button(&mut self, window: WindowId, button: MouseButton, action: Action, mods: Modifiers) {
        self.events.push(SinkEvent::MouseButton {
            window,
            button,
            action,
            mods,
        });
    }

    fn cursor_pos(&mut self, window: WindowId, x: f64, y: f64) {
        self.events.push(SinkEvent::CursorPos { window, x, y });
    }

    fn scroll(&mut self, window: WindowId, dx: f64, dy: f64) {
        self.events.push(SinkEvent::Scroll { window, dx, dy });
    }

    fn window_close_request(&mut self, window: WindowId) {
        self.events.push(SinkEvent::CloseRequest { window });
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
