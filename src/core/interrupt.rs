//! Cooperative cancellation hooks for the wait loop.
//!
//! [`CallbackRegistry::wait_until_due`](crate::core::CallbackRegistry::wait_until_due)
//! polls its [`InterruptCheck`] after every wake. Nothing wakes the loop when an
//! interrupt is requested, so detection latency is bounded by the loop's sleep cap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled by the wait loop after each wake.
pub trait InterruptCheck: Send + Sync {
    /// `true` aborts the wait with [`RegistryError::Interrupted`](crate::core::RegistryError::Interrupted).
    fn interrupted(&self) -> bool;
}

impl<F> InterruptCheck for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn interrupted(&self) -> bool {
        self()
    }
}

/// Interrupt check that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl InterruptCheck for NeverInterrupt {
    fn interrupted(&self) -> bool {
        false
    }
}

/// Shared flag another thread can raise to cancel a wait.
///
/// The flag is consumed by the wait that observes it, so a later wait starts
/// clean.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// New, lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current (or next) wait.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Whether a request is pending.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl InterruptCheck for InterruptFlag {
    fn interrupted(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}
