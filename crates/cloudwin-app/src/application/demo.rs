//! Handler driven by the `cloudwin-demo` binary.
//!
//! The demo has no real streaming service behind it.  It runs against the
//! loopback service and feeds one scripted input event per frame into its
//! window.  Once the script is exhausted it stops the stream, which closes
//! every window through the lifecycle monitor and ends the loop the same
//! way a real stream exit would.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cloudwin_backend::{LoopbackStreamService, StreamService, Window};
use cloudwin_core::events::{
    ButtonSnapshot, CursorActionModifier, DeviceHandle, HotplugKind, KeyboardHotplugEvent,
    KeyboardInputEvent, MouseHotplugEvent, MouseInputEvent, RemoteMouseButton, TextAction, TextEvent,
};
use cloudwin_core::{Action, Key, RemoteInputEvent, RemoteKeyCode, WindowId};
use tracing::{debug, info};

use super::event::WindowEvent;
use super::run_loop::{Context, EventHandler};
use crate::infrastructure::script::InputScript;

pub const DEMO_KEYBOARD: DeviceHandle = DeviceHandle(1);
pub const DEMO_MOUSE: DeviceHandle = DeviceHandle(2);

/// Default pacing between frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Session used when no script file is given: attach a keyboard and a
/// mouse, type, edit, move, click and scroll.
pub fn default_script() -> InputScript {
    let left_down = MouseInputEvent::button(DEMO_MOUSE, RemoteMouseButton::Left, true, ButtonSnapshot::default());
    let left_held = ButtonSnapshot::default().with(RemoteMouseButton::Left, true);

    InputScript::new(vec![
        RemoteInputEvent::KeyboardHotplug(KeyboardHotplugEvent {
            keyboard: DEMO_KEYBOARD,
            kind: HotplugKind::Attached,
        }),
        RemoteInputEvent::MouseHotplug(MouseHotplugEvent {
            mouse: DEMO_MOUSE,
            kind: HotplugKind::Attached,
        }),
        RemoteInputEvent::Text(TextEvent::text("hello")),
        RemoteInputEvent::Text(TextEvent::action(TextAction::Left, CursorActionModifier::SelectByWord)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::down(DEMO_KEYBOARD, RemoteKeyCode::LEFT_CONTROL)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::down(DEMO_KEYBOARD, RemoteKeyCode::C)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::up(DEMO_KEYBOARD, RemoteKeyCode::C)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::up(DEMO_KEYBOARD, RemoteKeyCode::LEFT_CONTROL)),
        RemoteInputEvent::Mouse(MouseInputEvent::move_absolute(DEMO_MOUSE, 960, 540)),
        RemoteInputEvent::Mouse(left_down),
        RemoteInputEvent::Mouse(MouseInputEvent::move_relative(DEMO_MOUSE, 10, 10)),
        RemoteInputEvent::Mouse(MouseInputEvent::button(DEMO_MOUSE, RemoteMouseButton::Left, false, left_held)),
        RemoteInputEvent::Mouse(MouseInputEvent::wheel(DEMO_MOUSE, 0, -1)),
    ])
}

pub struct DemoHandler {
    service: Arc<LoopbackStreamService>,
    window: WindowId,
    pending: VecDeque<RemoteInputEvent>,
    shutdown: Arc<AtomicBool>,
    frame_interval: Duration,
    stream_stopped: bool,
    received: usize,
}

impl DemoHandler {
    pub fn new(
        service: Arc<LoopbackStreamService>,
        window: WindowId,
        script: InputScript,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            service,
            window,
            pending: script.events.into(),
            shutdown,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            stream_stopped: false,
            received: 0,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Number of window events seen so far.
    pub fn received(&self) -> usize {
        self.received
    }

    fn feed_next(&mut self, ctx: &Context<'_>) {
        let Some(queue) = ctx.window(self.window).map(Window::queue_id) else {
            return;
        };
        if let Some(event) = self.pending.pop_front() {
            if !self.service.inject(queue, event) {
                debug!(%queue, "demo queue closed, scripted event discarded");
            }
        } else if !self.stream_stopped {
            info!("input script finished, stopping stream");
            self.service.stop_stream();
            self.stream_stopped = true;
        }
    }
}

impl EventHandler for DemoHandler {
    fn on_event(&mut self, ctx: &mut Context<'_>, window: WindowId, event: WindowEvent) {
        self.received += 1;
        info!(%window, ?event, "window event");

        if let WindowEvent::Key {
            key: Key::Escape,
            action: Action::Press,
            ..
        } = event
        {
            ctx.close_window(window);
        }
    }

    fn on_frame(&mut self, ctx: &mut Context<'_>) {
        if self.shutdown.load(Ordering::Relaxed) {
            info!("shutdown signal received");
            ctx.exit(0);
            return;
        }
        self.feed_next(ctx);
        if !self.frame_interval.is_zero() {
            std::thread::sleep(self.frame_interval);
        }
    }
}
