//! Registry of open windows shared with the lifecycle monitor thread.
//!
//! The main thread owns every window.  The monitor thread only needs to ask
//! windows to close, so each window publishes an `Arc<CloseSignal>` and the
//! registry keeps a `Weak` to it.  A window that is dropped without being
//! unregistered simply fails to upgrade and is pruned on the next snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use cloudwin_core::WindowId;
use tracing::debug;

/// Close state of one window, written from any thread.
#[derive(Debug, Default)]
pub struct CloseSignal {
    should_close: AtomicBool,
    pending: AtomicBool,
}

impl CloseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches should-close and queues a close-request notification for the
    /// next poll on the owning thread.
    pub fn request_close(&self) {
        self.should_close.store(true, Ordering::Release);
        self.pending.store(true, Ordering::Release);
    }

    pub fn should_close(&self) -> bool {
        self.should_close.load(Ordering::Acquire)
    }

    /// Sets or clears should-close without queuing a notification.
    pub fn set_should_close(&self, value: bool) {
        self.should_close.store(value, Ordering::Release);
    }

    /// Returns `true` once per close request.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    entries: Mutex<Vec<(WindowId, Weak<CloseSignal>)>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(WindowId, Weak<CloseSignal>)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, window: WindowId, signal: &Arc<CloseSignal>) {
        self.lock().push((window, Arc::downgrade(signal)));
        debug!(%window, "window registered");
    }

    /// Removes `window`.  Returns `false` if it was not registered.
    pub fn unregister(&self, window: WindowId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|(id, _)| *id != window);
        let removed = entries.len() != before;
        if removed {
            debug!(%window, "window unregistered");
        }
        removed
    }

    /// Live windows in registration order.  Dead entries are pruned.
    pub fn snapshot(&self) -> Vec<(WindowId, Arc<CloseSignal>)> {
        let mut entries = self.lock();
        entries.retain(|(_, weak)| weak.strong_count() > 0);
        entries
            .iter()
            .filter_map(|(id, weak)| weak.upgrade().map(|signal| (*id, signal)))
            .collect()
    }

    /// Requests close on every live window and returns how many there were.
    pub fn request_close_all(&self) -> usize {
        let windows = self.snapshot();
        for (window, signal) in &windows {
            debug!(%window, "close requested");
            signal.request_close();
        }
        windows.len()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
