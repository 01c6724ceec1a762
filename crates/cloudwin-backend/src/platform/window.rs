//! A window on the streamed display.
//!
//! The stream has exactly one implicit framebuffer, so most window
//! management is bookkeeping: the position is always the origin, the frame
//! has no decorations, and the window is always focused and visible.  What a
//! window does own is its input queue, its [`WindowInput`] state and its
//! [`CloseSignal`].

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use cloudwin_core::{Action, Key, KeycodeTable, Modifiers, MouseButton, RemoteInputEvent, WindowId};

use crate::application::consume_input::{InputSink, TextDecoding, WindowInput};
use crate::application::window_registry::CloseSignal;
use crate::infrastructure::stream_service::QueueId;

#[derive(Debug)]
pub struct Window {
    id: WindowId,
    title: String,
    width: i32,
    height: i32,
    queue_id: QueueId,
    queue: Receiver<RemoteInputEvent>,
    input: WindowInput,
    close: Arc<CloseSignal>,
}

impl Window {
    pub(crate) fn new(
        title: &str,
        width: i32,
        height: i32,
        queue_id: QueueId,
        queue: Receiver<RemoteInputEvent>,
        text_decoding: TextDecoding,
    ) -> Self {
        let id = WindowId::new();
        Self {
            id,
            title: title.to_string(),
            width,
            height,
            queue_id,
            queue,
            input: WindowInput::new(id, text_decoding),
            close: Arc::new(CloseSignal::new()),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Id of the service queue feeding this window.
    pub fn queue_id(&self) -> QueueId {
        self.queue_id
    }

    pub(crate) fn close_signal(&self) -> &Arc<CloseSignal> {
        &self.close
    }

    /// Consumes every queued event, then delivers a pending close request.
    /// Never blocks.  Returns the number of input events consumed.
    pub(crate) fn drain(&mut self, table: &KeycodeTable, sink: &mut dyn InputSink) -> usize {
        let mut consumed = 0;
        while let Ok(event) = self.queue.try_recv() {
            self.input.consume(table, event, sink);
            consumed += 1;
        }
        if self.close.take_pending() {
            sink.window_close_request(self.id);
        }
        consumed
    }

    // ── Geometry ─────────────────────────────────────────────────────────────

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Always the origin.
    pub fn pos(&self) -> (i32, i32) {
        (0, 0)
    }

    /// Ignored.
    pub fn set_pos(&mut self, _x: i32, _y: i32) {}

    pub fn framebuffer_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// `(left, top, right, bottom)` of the undecorated frame.
    pub fn frame_size(&self) -> (i32, i32, i32, i32) {
        (0, 0, self.width, self.height)
    }

    // ── State ────────────────────────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn should_close(&self) -> bool {
        self.close.should_close()
    }

    pub fn set_should_close(&self, value: bool) {
        self.close.set_should_close(value);
    }

    pub fn is_focused(&self) -> bool {
        true
    }

    pub fn is_visible(&self) -> bool {
        true
    }

    pub fn is_maximized(&self) -> bool {
        true
    }

    pub fn is_iconified(&self) -> bool {
        false
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn cursor_pos(&self) -> (f64, f64) {
        self.input.cursor_pos()
    }

    pub fn set_cursor_pos(&mut self, x: f64, y: f64) {
        self.input.set_cursor_pos(x, y);
    }

    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers()
    }

    /// `Press` while `key` is held on the attached keyboard, `Release`
    /// otherwise.
    pub fn key(&self, key: Key) -> Action {
        self.input.key(key)
    }

    /// `Press` while `button` is down in the attached mouse's last snapshot.
    pub fn mouse_button(&self, button: MouseButton) -> Action {
        self.input.mouse_button(button)
    }

    pub fn input(&self) -> &WindowInput {
        &self.input
    }
}
