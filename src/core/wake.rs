//! Wake signal shared by producers and the waiting owner thread.

use std::time::Duration;

use parking_lot::{Condvar, MutexGuard};

/// Notification channel paired with the registry's queue mutex.
///
/// Producers call [`WakeSignal::notify`] after inserting; the owner thread
/// blocks in [`WakeSignal::wait_for`] with the queue guard held, which is
/// released while parked and re-acquired before returning. Notifications are
/// not buffered, and wakes may be spurious, so callers always re-check state.
#[derive(Debug, Default)]
pub struct WakeSignal {
    inner: Condvar,
}

impl WakeSignal {
    /// Create a new signal.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Condvar::new(),
        }
    }

    /// Park until notified or `timeout` elapses. Returns `true` on timeout.
    pub fn wait_for<T>(&self, guard: &mut MutexGuard<'_, T>, timeout: Duration) -> bool {
        if timeout.is_zero() {
            return true;
        }
        self.inner.wait_for(guard, timeout).timed_out()
    }

    /// Wake every parked waiter.
    pub fn notify(&self) {
        self.inner.notify_all();
    }
}
