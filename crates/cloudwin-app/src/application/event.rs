//! Window events as the application sees them.

use cloudwin_backend::InputSink;
use cloudwin_core::{Action, Key, Modifiers, MouseButton, WindowId};

/// One event delivered to [`EventHandler::on_event`].
///
/// [`EventHandler::on_event`]: super::run_loop::EventHandler::on_event
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Key {
        key: Key,
        scancode: i32,
        action: Action,
        mods: Modifiers,
    },
    Char {
        codepoint: char,
        mods: Modifiers,
        /// `false` when the character came with Control or Alt held.
        plain: bool,
    },
    MouseButton {
        button: MouseButton,
        action: Action,
        mods: Modifiers,
    },
    CursorPos {
        x: f64,
        y: f64,
    },
    Scroll {
        dx: f64,
        dy: f64,
    },
    Size {
        width: i32,
        height: i32,
    },
    CloseRequested,
}

/// [`InputSink`] that buffers callbacks as `(window, event)` pairs in
/// arrival order.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<(WindowId, WindowEvent)>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, window: WindowId, event: WindowEvent) {
        self.events.push((window, event));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&mut self) -> std::vec::Drain<'_, (WindowId, WindowEvent)> {
        self.events.drain(..)
    }
}

impl InputSink for EventCollector {
    fn key(&mut self, window: WindowId, key: Key, scancode: i32, action: Action, mods: Modifiers) {
        self.push(
            window,
            WindowEvent::Key {
                key,
                scancode,
                action,
                mods,
            },
        );
    }

    fn char(&mut self, window: WindowId, codepoint: char, mods: Modifiers, plain: bool) {
        self.push(window, WindowEvent::Char { codepoint, mods, plain });
    }

    fn mouse_button(&mut self, window: WindowId, button: MouseButton, action: Action, mods: Modifiers) {
        self.push(window, WindowEvent::MouseButton { button, action, mods });
    }

    fn cursor_pos(&mut self, window: WindowId, x: f64, y: f64) {
        self.push(window, WindowEvent::CursorPos { x, y });
    }

    fn scroll(&mut self, window: WindowId, dx: f64, dy: f64) {
        self.push(window, WindowEvent::Scroll { dx, dy });
    }

    fn window_close_request(&mut self, window: WindowId) {
        self.push(window, WindowEvent::CloseRequested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_preserves_callback_order() {
        // Arrange
        let mut collector = EventCollector::new();
        let w = WindowId::new();

        // Act
        collector.mouse_button(w, MouseButton::Left, Action::Press, Modifiers::NONE);
        collector.cursor_pos(w, 10.0, 10.0);
        collector.window_close_request(w);

        // Assert
        let events: Vec<_> = collector.drain().collect();
        assert_eq!(
            events,
            vec![
                (
                    w,
                    WindowEvent::MouseButton {
                        button: MouseButton::Left,
                        action: Action::Press,
                        mods: Modifiers::NONE,
                    }
                ),
                (w, WindowEvent::CursorPos { x: 10.0, y: 10.0 }),
                (w, WindowEvent::CloseRequested),
            ]
        );
        assert!(collector.is_empty());
    }

    #[test]
    fn test_key_and_char_fields_pass_through() {
        let mut collector = EventCollector::new();
        let w = WindowId::new();

        collector.key(w, Key::A, 4, Action::Repeat, Modifiers::CONTROL);
        collector.char(w, 'a', Modifiers::NONE, true);

        assert_eq!(collector.len(), 2);
        let events: Vec<_> = collector.drain().map(|(_, e)| e).collect();
        assert_eq!(
            events[0],
            WindowEvent::Key {
                key: Key::A,
                scancode: 4,
                action: Action::Repeat,
                mods: Modifiers::CONTROL,
            }
        );
        assert_eq!(
            events[1],
            WindowEvent::Char {
                codepoint: 'a',
                mods: Modifiers::NONE,
                plain: true,
            }
        );
    }
}
