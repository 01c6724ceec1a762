//! The frame loop.
//!
//! [`Application`] owns the [`Platform`] and drives one [`EventHandler`].
//! Each frame it polls the backend (unless automatic polling is switched
//! off), dispatches the collected events, runs the handler's per-frame hook
//! and then destroys every window whose should-close flag is still set.  A
//! handler that wants to keep a window open after a close request clears
//! the flag from `on_event`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use cloudwin_backend::{BackendConfig, BackendError, Platform, StreamService, Window};
use cloudwin_core::{Action, Key, MouseButton, WindowId};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::event::{EventCollector, WindowEvent};

/// Error type for the application wrapper.
#[derive(Debug, Error)]
pub enum AppError {
    /// The backend could not start.  Always fatal.
    #[error("failed to start the streaming backend: {0}")]
    Init(#[source] BackendError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AppError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Init(_))
    }
}

/// Application callbacks.
pub trait EventHandler {
    /// Called once per event, in the order the backend produced them.
    /// Events the handler has no use for can simply be ignored.
    fn on_event(&mut self, ctx: &mut Context<'_>, window: WindowId, event: WindowEvent);

    /// Called once per frame after all events have been dispatched.
    fn on_frame(&mut self, _ctx: &mut Context<'_>) {}
}

/// What a handler may do while the loop is running.
pub struct Context<'a> {
    platform: &'a mut Platform,
    exit_code: &'a mut Option<i32>,
}

impl Context<'_> {
    /// Ends the loop after the current frame.  The first code wins.
    pub fn exit(&mut self, code: i32) {
        if self.exit_code.is_none() {
            info!(code, "exit requested");
            *self.exit_code = Some(code);
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_code.is_some()
    }

    pub fn platform(&self) -> &Platform {
        &*self.platform
    }

    pub fn platform_mut(&mut self) -> &mut Platform {
        &mut *self.platform
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.platform.window(id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.platform.window_mut(id)
    }

    /// State of `key` in `window`.  `Release` for unknown windows.
    pub fn key(&self, window: WindowId, key: Key) -> Action {
        self.platform.window(window).map_or(Action::Release, |w| w.key(key))
    }

    /// State of `button` in `window`.  `Release` for unknown windows.
    pub fn mouse_button(&self, window: WindowId, button: MouseButton) -> Action {
        self.platform
            .window(window)
            .map_or(Action::Release, |w| w.mouse_button(button))
    }

    /// # Errors
    ///
    /// [`AppError::Backend`] if the backend cannot open an input queue.
    pub fn create_window(&mut self, title: &str, width: i32, height: i32) -> Result<WindowId, AppError> {
        Ok(self.platform.create_window(title, width, height)?)
    }

    /// Marks a window for destruction at the end of the frame.  Returns
    /// `false` if the window does not exist.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        match self.platform.window(id) {
            Some(window) => {
                window.set_should_close(true);
                true
            }
            None => false,
        }
    }
}

pub struct Application {
    platform: Platform,
    auto_poll_events: bool,
    exit_code: Option<i32>,
    sizes: HashMap<WindowId, (i32, i32)>,
    collector: EventCollector,
}

impl Application {
    /// Starts the backend.
    ///
    /// # Errors
    ///
    /// [`AppError::Init`] if [`Platform::init`] fails.
    pub fn new(service: Arc<dyn StreamService>, config: BackendConfig) -> Result<Self, AppError> {
        let platform = Platform::init(service, config).map_err(AppError::Init)?;
        Ok(Self {
            platform,
            auto_poll_events: true,
            exit_code: None,
            sizes: HashMap::new(),
            collector: EventCollector::new(),
        })
    }

    /// # Errors
    ///
    /// [`AppError::Backend`] if the backend cannot open an input queue.
    pub fn add_window(&mut self, title: &str, width: i32, height: i32) -> Result<WindowId, AppError> {
        Ok(self.platform.create_window(title, width, height)?)
    }

    /// Adds a window with the configured default size.
    ///
    /// # Errors
    ///
    /// See [`Application::add_window`].
    pub fn add_default_window(&mut self, title: &str) -> Result<WindowId, AppError> {
        Ok(self.platform.create_default_window(title)?)
    }

    /// # Errors
    ///
    /// [`AppError::Backend`] wrapping [`BackendError::NoSuchWindow`].
    pub fn remove_window(&mut self, id: WindowId) -> Result<(), AppError> {
        self.platform.destroy_window(id)?;
        self.sizes.remove(&id);
        Ok(())
    }

    pub fn window_count(&self) -> usize {
        self.platform.window_count()
    }

    /// When `false`, the loop no longer polls the backend and the handler
    /// is responsible for calling [`Platform::poll_events`] itself.
    pub fn set_auto_poll_events(&mut self, enabled: bool) {
        self.auto_poll_events = enabled;
    }

    pub fn auto_poll_events(&self) -> bool {
        self.auto_poll_events
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut Platform {
        &mut self.platform
    }

    /// Runs frames until the handler exits or no window is left.  Returns
    /// the exit code (0 when the last window closed).
    pub fn execute<H: EventHandler + ?Sized>(&mut self, handler: &mut H) -> i32 {
        info!(windows = self.platform.window_count(), "entering frame loop");
        let mut frames: u64 = 0;
        let code = loop {
            if let Some(code) = self.run_frame(handler) {
                break code;
            }
            frames += 1;
        };
        info!(frames, code, "frame loop finished");
        code
    }

    /// Runs a single frame.  Returns the exit code once the loop should end.
    pub fn run_frame<H: EventHandler + ?Sized>(&mut self, handler: &mut H) -> Option<i32> {
        if let Some(code) = self.loop_finished() {
            return Some(code);
        }

        if self.auto_poll_events {
            self.platform.poll_events(&mut self.collector);
        }
        self.collect_resizes();

        let events: Vec<_> = self.collector.drain().collect();
        let mut ctx = Context {
            platform: &mut self.platform,
            exit_code: &mut self.exit_code,
        };
        for (window, event) in events {
            handler.on_event(&mut ctx, window, event);
        }
        handler.on_frame(&mut ctx);

        self.destroy_closed_windows();
        self.loop_finished()
    }

    /// Stops the stream and shuts the backend down.
    pub fn terminate(self) {
        self.platform.terminate();
    }

    fn loop_finished(&self) -> Option<i32> {
        if self.exit_code.is_some() {
            return self.exit_code;
        }
        if self.platform.window_count() == 0 {
            debug!("no windows left");
            return Some(0);
        }
        None
    }

    /// Queues a `Size` event for every window whose size changed since the
    /// last frame.  Windows seen for the first time only record their size.
    fn collect_resizes(&mut self) {
        for window in self.platform.windows() {
            let size = window.size();
            match self.sizes.entry(window.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(size);
                }
                Entry::Occupied(mut slot) if *slot.get() != size => {
                    slot.insert(size);
                    let (width, height) = size;
                    self.collector.push(window.id(), WindowEvent::Size { width, height });
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    fn destroy_closed_windows(&mut self) {
        let closing: Vec<WindowId> = self
            .platform
            .windows()
            .filter(|w| w.should_close())
            .map(Window::id)
            .collect();
        for id in closing {
            if let Err(e) = self.platform.destroy_window(id) {
                warn!(window = %id, "failed to destroy closed window: {e}");
            }
            self.sizes.remove(&id);
        }
    }
}
