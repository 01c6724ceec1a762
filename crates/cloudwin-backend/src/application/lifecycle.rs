//! Stream lifecycle monitor.
//!
//! A dedicated thread waits on the process-wide lifecycle subscription.  When
//! the streaming service reports that the stream has exited, the monitor
//! latches the [`TerminationFlag`] and asks every open window to close, so a
//! well-behaved application leaves its frame loop on the next poll.
//!
//! # Poll interval
//!
//! The subscription is read with `recv_timeout(poll_interval)` rather than a
//! blocking `recv`, so the thread re-checks the termination flag at least
//! once per interval and shutdown never depends on the service sending one
//! more event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cloudwin_core::{LifecycleEvent, StreamState};
use tracing::{debug, error, info, warn};

use super::window_registry::WindowRegistry;

/// Name given to the monitor thread.
pub const MONITOR_THREAD_NAME: &str = "cloudwin-lifecycle";

/// One-way latch: once set it stays set for the life of the backend.
#[derive(Debug, Default)]
pub struct TerminationFlag(AtomicBool);

impl TerminationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag.  Returns `true` if it was already set.
    pub fn set(&self) -> bool {
        self.0.swap(true, Ordering::AcqRel)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Applies one lifecycle event.
pub fn handle_lifecycle_event(event: &LifecycleEvent, registry: &WindowRegistry, flag: &TerminationFlag) {
    let LifecycleEvent::StreamStateChanged(state) = event;
    match state {
        StreamState::Exited => {
            flag.set();
            let closed = registry.request_close_all();
            info!(windows = closed, "stream exited, close requested on all windows");
        }
        other => debug!(state = ?other, "stream state changed"),
    }
}

/// Handle to the running monitor thread.
#[derive(Debug)]
pub struct LifecycleMonitor {
    handle: Option<JoinHandle<()>>,
}

impl LifecycleMonitor {
    /// Spawns the monitor thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(
        subscription: Receiver<LifecycleEvent>,
        registry: Arc<WindowRegistry>,
        flag: Arc<TerminationFlag>,
        poll_interval: Duration,
    ) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name(MONITOR_THREAD_NAME.to_string())
            .spawn(move || monitor_loop(subscription, &registry, &flag, poll_interval))?;
        debug!(?poll_interval, "lifecycle monitor started");
        Ok(Self { handle: Some(handle) })
    }

    /// Returns `true` once the thread has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Waits for the thread to exit.  Safe to call after it already has.
    ///
    /// The caller must have set the termination flag (or dropped the
    /// subscription sender), otherwise this blocks until the stream exits.
    pub fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            error!("lifecycle monitor thread panicked");
        } else {
            debug!("lifecycle monitor joined");
        }
    }
}

fn monitor_loop(
    subscription: Receiver<LifecycleEvent>,
    registry: &WindowRegistry,
    flag: &TerminationFlag,
    poll_interval: Duration,
) {
    while !flag.is_set() {
        match subscription.recv_timeout(poll_interval) {
            Ok(event) => handle_lifecycle_event(&event, registry, flag),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("lifecycle subscription closed, monitor exiting");
                break;
            }
        }
    }
    info!("lifecycle monitor stopped");
}
