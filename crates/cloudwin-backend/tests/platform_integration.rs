//! Integration tests for the streaming backend.
//!
//! These tests drive `Platform` end-to-end against the loopback service:
//! lifecycle monitor, window queues, input translation and the Vulkan
//! surface path.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cloudwin_backend::application::consume_input::{RecordingSink, SinkEvent};
use cloudwin_backend::infrastructure::stream_service::FailurePoint;
use cloudwin_backend::infrastructure::surface::StreamDescriptorSurfaceCreateInfo;
use cloudwin_backend::{
    BackendConfig, BackendError, LoopbackStreamService, Platform, SurfaceHandle, TextDecoding,
    VkResultCode, VulkanInstance,
};
use cloudwin_core::events::{
    ButtonSnapshot, DeviceHandle, HotplugKind, KeyboardHotplugEvent, KeyboardInputEvent,
    MouseHotplugEvent, MouseInputEvent, RemoteMouseButton, TextAction, TextEvent,
};
use cloudwin_core::{
    Action, ErrorCode, Key, LifecycleEvent, Modifiers, MouseButton, RemoteInputEvent, RemoteKeyCode,
    StreamState,
};

const KEYBOARD: DeviceHandle = DeviceHandle(100);
const MOUSE: DeviceHandle = DeviceHandle(200);

// ── Helpers ───────────────────────────────────────────────────────────────────

fn start() -> (Platform, Arc<LoopbackStreamService>) {
    let service = Arc::new(LoopbackStreamService::new());
    let platform = Platform::init(service.clone(), BackendConfig::default()).expect("init must succeed");
    (platform, service)
}

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    done()
}

fn attach_devices() -> Vec<RemoteInputEvent> {
    vec![
        RemoteInputEvent::KeyboardHotplug(KeyboardHotplugEvent {
            keyboard: KEYBOARD,
            kind: HotplugKind::Attached,
        }),
        RemoteInputEvent::MouseHotplug(MouseHotplugEvent {
            mouse: MOUSE,
            kind: HotplugKind::Attached,
        }),
    ]
}

/// Vulkan instance stand-in with a scripted outcome.
struct FakeInstance {
    has_extension: bool,
    result: Result<SurfaceHandle, VkResultCode>,
}

impl VulkanInstance for FakeInstance {
    fn has_stream_descriptor_surface(&self) -> bool {
        self.has_extension
    }

    fn create_stream_descriptor_surface(
        &self,
        _info: &StreamDescriptorSurfaceCreateInfo,
    ) -> Result<SurfaceHandle, VkResultCode> {
        self.result
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn test_fatal_init_paths_leave_no_subscription_behind() {
    for point in [FailurePoint::Initialize, FailurePoint::SubscribeLifecycle] {
        let service = Arc::new(LoopbackStreamService::failing_at(point));

        let err = Platform::init(service.clone(), BackendConfig::default())
            .expect_err("init must fail");

        assert!(err.is_fatal(), "{point:?} must be fatal, got {err}");
        assert_eq!(service.subscriber_count(), 0);
    }
}

#[test]
fn test_stream_exit_closes_every_window_and_latches_termination() {
    // Arrange
    let (mut platform, service) = start();
    let ids: Vec<_> = (0..3)
        .map(|i| platform.create_window(&format!("w{i}"), 640, 480).unwrap())
        .collect();

    // Act
    service.publish(LifecycleEvent::StreamStateChanged(StreamState::Started));
    service.publish(LifecycleEvent::StreamStateChanged(StreamState::Exited));

    // Assert
    assert!(wait_until(|| platform.is_terminating()));
    assert!(wait_until(|| platform.windows().all(|w| w.should_close())));

    let mut sink = RecordingSink::new();
    platform.poll_events(&mut sink);
    let closed: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            SinkEvent::CloseRequest { window } => Some(*window),
            _ => None,
        })
        .collect();
    assert_eq!(closed, ids, "close requests must arrive in creation order");

    // A second poll does not repeat them.
    platform.poll_events(&mut sink);
    assert_eq!(sink.events.len(), ids.len());
}

#[test]
fn test_terminate_with_open_windows_stops_stream_and_closes_queues() {
    let (mut platform, service) = start();
    platform.create_window("a", 1, 1).unwrap();
    platform.create_window("b", 1, 1).unwrap();
    assert_eq!(service.open_queues().len(), 2);

    platform.terminate();

    assert!(service.is_stopped());
    assert!(service.open_queues().is_empty());
    assert_eq!(service.subscriber_count(), 0);
}

#[test]
fn test_non_terminal_states_keep_backend_running() {
    let (mut platform, service) = start();
    let id = platform.create_window("main", 1, 1).unwrap();

    service.publish(LifecycleEvent::StreamStateChanged(StreamState::Suspended));
    service.publish(LifecycleEvent::StreamStateChanged(StreamState::Started));
    std::thread::sleep(Duration::from_millis(20));

    assert!(!platform.is_terminating());
    assert!(!platform.window(id).unwrap().should_close());
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn test_keyboard_session_reports_modifiers_and_dedups_repeats() {
    // Arrange
    let (mut platform, service) = start();
    let id = platform.create_window("main", 1920, 1080).unwrap();
    let queue = platform.window(id).unwrap().queue_id();
    let mut script = attach_devices();
    script.extend([
        RemoteInputEvent::Keyboard(KeyboardInputEvent::down(KEYBOARD, RemoteKeyCode::LEFT_SHIFT)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::down(KEYBOARD, RemoteKeyCode::A)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::down(KEYBOARD, RemoteKeyCode::A)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::up(KEYBOARD, RemoteKeyCode::A)),
        RemoteInputEvent::Keyboard(KeyboardInputEvent::up(KEYBOARD, RemoteKeyCode::LEFT_SHIFT)),
    ]);
    for event in script {
        assert!(service.inject(queue, event));
    }
    let mut sink = RecordingSink::new();

    // Act
    let consumed = platform.poll_events(&mut sink);

    // Assert
    assert_eq!(consumed, 7);
    let keys: Vec<_> = sink
        .events
        .iter()
        .map(|e| match e {
            SinkEvent::Key { key, action, mods, .. } => (*key, *action, *mods),
            other => panic!("unexpected callback {other:?}"),
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            (Key::LeftShift, Action::Press, Modifiers::NONE),
            (Key::A, Action::Press, Modifiers::SHIFT),
            (Key::A, Action::Release, Modifiers::SHIFT),
            (Key::LeftShift, Action::Release, Modifiers::SHIFT),
        ]
    );
    assert_eq!(platform.window(id).unwrap().modifiers(), Modifiers::NONE);
}

#[test]
fn test_mouse_session_tracks_cursor_and_buttons() {
    // Arrange
    let (mut platform, service) = start();
    let id = platform.create_window("main", 1920, 1080).unwrap();
    let queue = platform.window(id).unwrap().queue_id();
    let mut script = attach_devices();
    script.extend([
        RemoteInputEvent::Mouse(MouseInputEvent::move_absolute(MOUSE, 100, 200)),
        RemoteInputEvent::Mouse(MouseInputEvent::move_relative(MOUSE, 5, -10)),
        RemoteInputEvent::Mouse(MouseInputEvent::button(
            MOUSE,
            RemoteMouseButton::Left,
            true,
            ButtonSnapshot::default(),
        )),
        RemoteInputEvent::Mouse(MouseInputEvent::wheel(MOUSE, 0, -1)),
    ]);
    for event in script {
        service.inject(queue, event);
    }
    let mut sink = RecordingSink::new();

    // Act
    platform.poll_events(&mut sink);

    // Assert
    assert_eq!(
        sink.events,
        vec![
            SinkEvent::CursorPos { window: id, x: 100.0, y: 200.0 },
            SinkEvent::CursorPos { window: id, x: 105.0, y: 190.0 },
            SinkEvent::MouseButton {
                window: id,
                button: MouseButton::Left,
                action: Action::Press,
                mods: Modifiers::NONE,
            },
            SinkEvent::Scroll { window: id, dx: 0.0, dy: -1.0 },
        ]
    );
    assert_eq!(platform.window(id).unwrap().cursor_pos(), (105.0, 190.0));
}

#[test]
fn test_text_and_editing_actions() {
    let (mut platform, service) = start();
    let id = platform.create_window("main", 1, 1).unwrap();
    let queue = platform.window(id).unwrap().queue_id();
    service.inject(queue, RemoteInputEvent::Text(TextEvent::text("hé")));
    service.inject(
        queue,
        RemoteInputEvent::Text(TextEvent::action(TextAction::Finish, Default::default())),
    );
    let mut sink = RecordingSink::new();

    platform.poll_events(&mut sink);

    assert_eq!(sink.events.len(), 4);
    assert!(matches!(sink.events[0], SinkEvent::Char { codepoint: 'h', plain: true, .. }));
    assert!(matches!(sink.events[1], SinkEvent::Char { codepoint: 'é', .. }));
    assert!(matches!(
        sink.events[2],
        SinkEvent::Key { key: Key::Enter, action: Action::Press, .. }
    ));
    assert!(matches!(
        sink.events[3],
        SinkEvent::Key { key: Key::Enter, action: Action::Release, .. }
    ));
}

#[test]
fn test_ascii_only_decoding_drops_non_ascii_text() {
    let service = Arc::new(LoopbackStreamService::new());
    let mut config = BackendConfig::default();
    config.input.text_decoding = TextDecoding::AsciiOnly;
    let mut platform = Platform::init(service.clone(), config).unwrap();
    let id = platform.create_window("main", 1, 1).unwrap();
    let queue = platform.window(id).unwrap().queue_id();
    service.inject(queue, RemoteInputEvent::Text(TextEvent::text("é")));
    service.inject(queue, RemoteInputEvent::Text(TextEvent::text("ok")));
    let mut sink = RecordingSink::new();

    platform.poll_events(&mut sink);

    let chars: String = sink
        .events
        .iter()
        .filter_map(|e| match e {
            SinkEvent::Char { codepoint, .. } => Some(*codepoint),
            _ => None,
        })
        .collect();
    assert_eq!(chars, "ok");
}

#[test]
fn test_input_for_destroyed_window_is_not_delivered() {
    let (mut platform, service) = start();
    let a = platform.create_window("a", 1, 1).unwrap();
    let queue = platform.window(a).unwrap().queue_id();
    platform.destroy_window(a).unwrap();

    assert!(!service.inject(queue, RemoteInputEvent::Text(TextEvent::text("x"))));
    let mut sink = RecordingSink::new();
    assert_eq!(platform.poll_events(&mut sink), 0);
    assert!(matches!(
        platform.destroy_window(a),
        Err(BackendError::NoSuchWindow(id)) if id == a
    ));
}

// ── Vulkan ────────────────────────────────────────────────────────────────────

#[test]
fn test_surface_errors_go_to_error_callback() {
    // Arrange
    let (mut platform, _service) = start();
    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);
    platform.set_error_callback(move |code, message| {
        sink.lock().unwrap().push((code, message.to_string()));
    });

    // Act
    let missing = platform.create_window_surface(&FakeInstance {
        has_extension: false,
        result: Ok(SurfaceHandle(1)),
    });
    let failed = platform.create_window_surface(&FakeInstance {
        has_extension: true,
        result: Err(VkResultCode::ERROR_OUT_OF_HOST_MEMORY),
    });
    let created = platform.create_window_surface(&FakeInstance {
        has_extension: true,
        result: Ok(SurfaceHandle(42)),
    });

    // Assert
    assert_eq!(missing, Err(VkResultCode::ERROR_EXTENSION_NOT_PRESENT));
    assert_eq!(failed, Err(VkResultCode::ERROR_OUT_OF_HOST_MEMORY));
    assert_eq!(created, Ok(SurfaceHandle(42)));

    let reported = reported.lock().unwrap();
    assert_eq!(reported.len(), 2);
    assert_eq!(reported[0].0, ErrorCode::ApiUnavailable);
    assert_eq!(reported[1].0, ErrorCode::PlatformError);
    assert_eq!(
        reported[1].1,
        "Failed to create Vulkan surface: A host memory allocation has failed"
    );
}

#[test]
fn test_required_extensions() {
    let (platform, _service) = start();
    assert_eq!(
        platform.required_instance_extensions(&["VK_GGP_stream_descriptor_surface", "VK_KHR_surface"]),
        Some(["VK_KHR_surface", "VK_GGP_stream_descriptor_surface"])
    );
    assert_eq!(platform.required_instance_extensions(&["VK_KHR_surface"]), None);
}
