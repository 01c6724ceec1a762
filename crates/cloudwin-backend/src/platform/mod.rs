//! Backend lifecycle and the platform window contract.
//!
//! [`Platform`] is the explicit process-wide backend context.  It exists
//! exactly while the backend is initialized: [`Platform::init`] brings the
//! streaming service up and starts the lifecycle monitor, and
//! [`Platform::terminate`] (or dropping the value) tears both down again.
//!
//! # Threads
//!
//! All `Platform` methods run on the thread that owns it.  The only other
//! thread is the lifecycle monitor, which touches nothing but the
//! termination flag and the window registry.

use std::sync::Arc;

use cloudwin_core::{ErrorCode, KeycodeTable, WindowId};
use tracing::{debug, error, info};

use crate::application::consume_input::InputSink;
use crate::application::lifecycle::{LifecycleMonitor, TerminationFlag};
use crate::application::window_registry::WindowRegistry;
use crate::infrastructure::storage::config::BackendConfig;
use crate::infrastructure::stream_service::{StreamService, SubscriptionId};
use crate::infrastructure::surface::{self, SurfaceHandle, VkResultCode, VulkanInstance};

mod error;
mod window;

pub use error::BackendError;
pub use window::Window;

/// Version string reported through the windowing API.
pub const VERSION_STRING: &str = concat!(env!("CARGO_PKG_VERSION"), " Stream");

/// Application error callback.
pub type ErrorCallback = Box<dyn FnMut(ErrorCode, &str) + Send>;

pub struct Platform {
    service: Arc<dyn StreamService>,
    config: BackendConfig,
    keycodes: KeycodeTable,
    registry: Arc<WindowRegistry>,
    termination: Arc<TerminationFlag>,
    subscription: Option<SubscriptionId>,
    monitor: Option<LifecycleMonitor>,
    windows: Vec<Window>,
    error_callback: Option<ErrorCallback>,
    terminated: bool,
}

impl Platform {
    /// Initializes the backend.
    ///
    /// # Errors
    ///
    /// Every error returned here is fatal ([`BackendError::is_fatal`]): the
    /// service could not be initialized, the lifecycle handler could not be
    /// registered, or the monitor thread could not be spawned.
    pub fn init(service: Arc<dyn StreamService>, config: BackendConfig) -> Result<Self, BackendError> {
        let keycodes = KeycodeTable::new();

        service.initialize().map_err(|e| {
            error!("stream service initialization failed: {e}");
            BackendError::ServiceInit(e)
        })?;

        let (subscription, events) = service.subscribe_lifecycle().map_err(|e| {
            error!("lifecycle handler registration failed: {e}");
            BackendError::HandlerRegistration(e)
        })?;

        let registry = Arc::new(WindowRegistry::new());
        let termination = Arc::new(TerminationFlag::new());
        let monitor = match LifecycleMonitor::spawn(
            events,
            Arc::clone(&registry),
            Arc::clone(&termination),
            config.lifecycle.poll_interval(),
        ) {
            Ok(monitor) => monitor,
            Err(e) => {
                error!("failed to spawn lifecycle monitor: {e}");
                service.unsubscribe_lifecycle(subscription);
                return Err(BackendError::MonitorSpawn(e));
            }
        };

        info!(version = VERSION_STRING, "streaming backend initialized");
        Ok(Self {
            service,
            config,
            keycodes,
            registry,
            termination,
            subscription: Some(subscription),
            monitor: Some(monitor),
            windows: Vec::new(),
            error_callback: None,
            terminated: false,
        })
    }

    /// Stops the stream, joins the monitor thread, unregisters the
    /// lifecycle handler and closes every remaining window queue.
    pub fn terminate(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.terminated {
            return;
        }
        info!("terminating streaming backend");

        self.service.stop_stream();
        // The service answers stop_stream with Exited, but the join below
        // must not depend on that event arriving.
        self.termination.set();
        if let Some(mut monitor) = self.monitor.take() {
            monitor.join();
        }
        if let Some(subscription) = self.subscription.take() {
            self.service.unsubscribe_lifecycle(subscription);
        }

        for window in self.windows.drain(..) {
            self.registry.unregister(window.id());
            self.service.close_input_queue(window.queue_id());
        }

        self.terminated = true;
        info!("streaming backend terminated");
    }

    /// `true` once the stream has exited or termination has begun.
    pub fn is_terminating(&self) -> bool {
        self.termination.is_set()
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn keycodes(&self) -> &KeycodeTable {
        &self.keycodes
    }

    pub fn version_string(&self) -> &'static str {
        VERSION_STRING
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    /// Installs the application error callback, returning the previous one.
    pub fn set_error_callback(
        &mut self,
        callback: impl FnMut(ErrorCode, &str) + Send + 'static,
    ) -> Option<ErrorCallback> {
        self.error_callback.replace(Box::new(callback))
    }

    /// Logs `message` and forwards it to the error callback, if any.
    pub fn report_error(&mut self, code: ErrorCode, message: &str) {
        error!(%code, "{message}");
        if let Some(callback) = self.error_callback.as_mut() {
            callback(code, message);
        }
    }

    // ── Windows ──────────────────────────────────────────────────────────────

    /// Creates a window with its own input queue.
    ///
    /// # Errors
    ///
    /// [`BackendError::WindowCreation`] if the service cannot open a queue.
    pub fn create_window(&mut self, title: &str, width: i32, height: i32) -> Result<WindowId, BackendError> {
        let (queue_id, queue) = match self.service.open_input_queue() {
            Ok(opened) => opened,
            Err(e) => {
                let err = BackendError::WindowCreation(e);
                self.report_error(err.code(), &err.to_string());
                return Err(err);
            }
        };

        let window = Window::new(
            title,
            width,
            height,
            queue_id,
            queue,
            self.config.input.text_decoding,
        );
        let id = window.id();
        self.registry.register(id, window.close_signal());
        self.windows.push(window);
        info!(window = %id, %queue_id, width, height, "window created");
        Ok(id)
    }

    /// Creates a window with the configured default size.
    ///
    /// # Errors
    ///
    /// See [`Platform::create_window`].
    pub fn create_default_window(&mut self, title: &str) -> Result<WindowId, BackendError> {
        let width = i32::try_from(self.config.window.default_width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.config.window.default_height).unwrap_or(i32::MAX);
        self.create_window(title, width, height)
    }

    /// Destroys a window and closes its input queue.
    ///
    /// # Errors
    ///
    /// [`BackendError::NoSuchWindow`] if `id` is not open.
    pub fn destroy_window(&mut self, id: WindowId) -> Result<(), BackendError> {
        let idx = self
            .windows
            .iter()
            .position(|w| w.id() == id)
            .ok_or(BackendError::NoSuchWindow(id))?;
        let window = self.windows.remove(idx);
        self.registry.unregister(id);
        self.service.close_input_queue(window.queue_id());
        info!(window = %id, "window destroyed");
        Ok(())
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// Open windows in creation order.
    pub fn windows(&self) -> impl Iterator<Item = &Window> + '_ {
        self.windows.iter()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    // ── Events ───────────────────────────────────────────────────────────────

    /// Drains every window's input queue in creation order and delivers
    /// pending close requests.  Never blocks.  Returns the number of input
    /// events consumed.
    pub fn poll_events(&mut self, sink: &mut dyn InputSink) -> usize {
        let mut consumed = 0;
        for window in &mut self.windows {
            consumed += window.drain(&self.keycodes, sink);
        }
        if consumed > 0 {
            debug!(consumed, "input events processed");
        }
        consumed
    }

    /// # Errors
    ///
    /// Always [`BackendError::NotImplemented`].
    pub fn wait_events(&mut self, _sink: &mut dyn InputSink) -> Result<usize, BackendError> {
        Err(BackendError::NotImplemented("wait_events"))
    }

    /// # Errors
    ///
    /// Always [`BackendError::NotImplemented`].
    pub fn wait_events_timeout(
        &mut self,
        _sink: &mut dyn InputSink,
        _timeout: std::time::Duration,
    ) -> Result<usize, BackendError> {
        Err(BackendError::NotImplemented("wait_events_timeout"))
    }

    // ── Vulkan ───────────────────────────────────────────────────────────────

    pub fn required_instance_extensions(&self, available: &[&str]) -> Option<[&'static str; 2]> {
        surface::required_instance_extensions(available)
    }

    /// Every queue family can present to the stream.
    pub fn physical_device_presentation_support(&self, _queue_family: u32) -> bool {
        true
    }

    /// Creates a surface presenting to the stream's primary descriptor.
    ///
    /// Failures are reported on the error channel and returned as the
    /// Vulkan result; they never stop the backend.
    pub fn create_window_surface(&mut self, instance: &dyn VulkanInstance) -> Result<SurfaceHandle, VkResultCode> {
        match surface::create_stream_surface(instance) {
            Ok(handle) => {
                debug!(surface = handle.0, "stream descriptor surface created");
                Ok(handle)
            }
            Err(e) => {
                self.report_error(e.error_code(), &e.to_string());
                Err(e.vk_result())
            }
        }
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("windows", &self.windows.len())
            .field("terminating", &self.is_terminating())
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}
