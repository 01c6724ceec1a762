//! Integration tests for the application wrapper.
//!
//! These tests run `Application` end-to-end against the loopback service,
//! including the sample script shipped for the demo binary.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use cloudwin_app::application::demo::DemoHandler;
use cloudwin_app::infrastructure::script::load_script;
use cloudwin_app::{Application, Context, EventHandler, WindowEvent};
use cloudwin_backend::{BackendConfig, LoopbackStreamService};
use cloudwin_core::events::{DeviceHandle, HotplugKind, MouseHotplugEvent, MouseInputEvent};
use cloudwin_core::{RemoteInputEvent, WindowId};

fn sample_script_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/session.toml"))
}

#[derive(Default)]
struct Collect {
    events: Vec<(WindowId, WindowEvent)>,
    frames: u32,
}

impl EventHandler for Collect {
    fn on_event(&mut self, _ctx: &mut Context<'_>, window: WindowId, event: WindowEvent) {
        self.events.push((window, event));
    }

    fn on_frame(&mut self, _ctx: &mut Context<'_>) {
        self.frames += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_sample_script_parses() {
    let script = load_script(sample_script_path()).expect("sample script must parse");
    assert_eq!(script.len(), 7);
}

#[test]
fn test_sample_script_plays_through_demo_handler() {
    // Arrange
    let script = load_script(sample_script_path()).unwrap();
    let service = Arc::new(LoopbackStreamService::new());
    let mut app = Application::new(service.clone(), BackendConfig::default()).unwrap();
    let window = app.add_default_window("demo").unwrap();
    let mut handler = DemoHandler::new(
        Arc::clone(&service),
        window,
        script,
        Arc::new(AtomicBool::new(false)),
    )
    .with_frame_interval(Duration::ZERO);

    // Act
    let code = app.execute(&mut handler);

    // Assert
    assert_eq!(code, 0);
    assert_eq!(app.window_count(), 0);
    // 6 chars, Enter press and release, 1 move, 1 wheel, maybe a close request.
    assert!(handler.received() >= 10, "received {}", handler.received());
}

#[test]
fn test_two_windows_receive_only_their_own_input() {
    // Arrange
    let service = Arc::new(LoopbackStreamService::new());
    let mut app = Application::new(service.clone(), BackendConfig::default()).unwrap();
    let left = app.add_window("left", 960, 1080).unwrap();
    let right = app.add_window("right", 960, 1080).unwrap();
    let right_queue = app.platform().window(right).unwrap().queue_id();
    let mouse = DeviceHandle(5);
    service.inject(
        right_queue,
        RemoteInputEvent::MouseHotplug(MouseHotplugEvent {
            mouse,
            kind: HotplugKind::Attached,
        }),
    );
    service.inject(
        right_queue,
        RemoteInputEvent::Mouse(MouseInputEvent::move_absolute(mouse, 12, 34)),
    );
    let mut handler = Collect::default();

    // Act
    assert_eq!(app.run_frame(&mut handler), None);

    // Assert
    assert_eq!(handler.frames, 1);
    assert_eq!(
        handler.events,
        vec![(right, WindowEvent::CursorPos { x: 12.0, y: 34.0 })]
    );
    assert_eq!(app.platform().window(left).unwrap().cursor_pos(), (0.0, 0.0));
    assert_eq!(app.platform().window(right).unwrap().cursor_pos(), (12.0, 34.0));
}

#[test]
fn test_removing_last_window_ends_loop() {
    let service = Arc::new(LoopbackStreamService::new());
    let mut app = Application::new(service, BackendConfig::default()).unwrap();
    let id = app.add_window("only", 1, 1).unwrap();
    app.remove_window(id).unwrap();

    let mut handler = Collect::default();
    assert_eq!(app.execute(&mut handler), 0);
    assert_eq!(handler.frames, 0);
}
