//! Thread-safe registry of deferred callbacks.
//!
//! Producers on any thread insert work with a delay; a single owner thread
//! waits for the earliest due time and extracts everything that has come due.
//! All queue state lives behind one `parking_lot::Mutex`, so the heap is never
//! observed half-updated.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use crate::builders::RegistryBuilder;
use crate::config::RegistryConfig;
use crate::core::queue::DueQueue;
use crate::core::wake::WakeSignal;
use crate::core::{HostFunction, InterruptCheck, ItemDescription, RegistryError, ScheduledItem, Work};
use crate::util::clock::{Clock, Timestamp};
use crate::util::thread::OwnerCheck;

/// Min-queue of scheduled items keyed by `(due, sequence)`.
///
/// # Threading
///
/// - [`insert_native`](Self::insert_native) may be called from any thread.
/// - [`insert_host`](Self::insert_host), [`take_due`](Self::take_due),
///   [`wait_until_due`](Self::wait_until_due) and [`snapshot`](Self::snapshot)
///   are owner-thread only. Violations fail a debug assertion; release builds
///   do not check.
/// - Non-blocking queries ([`is_empty`](Self::is_empty), [`is_due`](Self::is_due),
///   [`next_due_time`](Self::next_due_time)) are safe anywhere.
///
/// # Example
///
/// ```
/// use deferred_callbacks::core::CallbackRegistry;
///
/// let registry = CallbackRegistry::new();
/// registry.insert_native(|| println!("later"), 0.0);
///
/// assert!(registry.wait_until_due(1.0).unwrap());
/// for item in registry.take_due(0, registry.now()) {
///     item.invoke();
/// }
/// assert!(registry.is_empty());
/// ```
pub struct CallbackRegistry {
    queue: Mutex<DueQueue>,
    wake: WakeSignal,
    clock: Arc<dyn Clock>,
    interrupt: Arc<dyn InterruptCheck>,
    owner: Arc<dyn OwnerCheck>,
    config: RegistryConfig,
}

impl CallbackRegistry {
    /// Registry with the default configuration, system clock, no interrupt
    /// source, owned by the calling thread.
    #[must_use]
    pub fn new() -> Self {
        RegistryBuilder::new().build_with_defaults()
    }

    /// Start building a customized registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        interrupt: Arc<dyn InterruptCheck>,
        owner: Arc<dyn OwnerCheck>,
    ) -> Self {
        Self {
            queue: Mutex::new(DueQueue::new()),
            wake: WakeSignal::new(),
            clock,
            interrupt,
            owner,
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Current time according to the registry's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Whether the calling thread passes the owner check.
    #[must_use]
    pub fn is_owner_thread(&self) -> bool {
        self.owner.is_owner()
    }

    /// Schedule a native closure `delay_secs` from now. Callable from any thread.
    ///
    /// Returns the item's sequence number.
    pub fn insert_native<F>(&self, func: F, delay_secs: f64) -> u64
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.insert(Work::native(func), delay_secs)
    }

    /// Schedule a host-managed function `delay_secs` from now. Owner thread only.
    ///
    /// Returns the item's sequence number.
    pub fn insert_host<H>(&self, func: H, delay_secs: f64) -> u64
    where
        H: HostFunction + 'static,
    {
        self.insert(Work::host(func), delay_secs)
    }

    /// Schedule `work` `delay_secs` from now and wake a waiting owner.
    ///
    /// Host-managed work must be inserted on the owner thread. A NaN delay is
    /// treated as zero.
    pub fn insert(&self, work: Work, delay_secs: f64) -> u64 {
        if work.is_host_managed() {
            self.debug_assert_owner("insert of host-managed work");
        }
        let delay_secs = if delay_secs.is_nan() {
            warn!("NaN delay treated as 0");
            0.0
        } else {
            delay_secs
        };

        let due = self.clock.now().offset_secs(delay_secs);
        let item = Arc::new(ScheduledItem::new(due, work));
        let sequence = item.sequence();

        let mut queue = self.queue.lock();
        queue.push(item);
        self.wake.notify();
        drop(queue);

        debug!(sequence, delay_secs, "callback scheduled");
        sequence
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// `true` iff nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// `true` iff something is queued and the earliest item is due at or
    /// before `time`.
    #[must_use]
    pub fn is_due(&self, time: Timestamp) -> bool {
        self.queue.lock().is_due(time)
    }

    /// [`is_due`](Self::is_due) at the clock's current time.
    #[must_use]
    pub fn is_due_now(&self) -> bool {
        let now = self.clock.now();
        self.is_due(now)
    }

    /// Earliest due time, if anything is queued.
    #[must_use]
    pub fn next_due_time(&self) -> Option<Timestamp> {
        self.queue.lock().next_due()
    }

    /// Remove and return items due at or before `time`, earliest first.
    ///
    /// At most `max_count` items are returned; `0` means no limit. Owner
    /// thread only.
    pub fn take_due(&self, max_count: usize, time: Timestamp) -> Vec<Arc<ScheduledItem>> {
        self.debug_assert_owner("take_due");
        let mut queue = self.queue.lock();
        let mut taken = Vec::new();
        while max_count == 0 || taken.len() < max_count {
            let Some(item) = queue.pop_due(time) else {
                break;
            };
            taken.push(item);
        }
        let remaining = queue.len();
        drop(queue);

        if !taken.is_empty() {
            debug!(taken = taken.len(), remaining, "took due callbacks");
        }
        taken
    }

    /// Block until something is due or `timeout_secs` elapses. Owner thread only.
    ///
    /// A negative timeout waits effectively forever. Each sleep is capped at
    /// [`RegistryConfig::max_sleep_secs`], and after every wake the interrupt
    /// check is polled with the queue lock released.
    ///
    /// Returns whether an item is due when the wait ends.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Interrupted`] if the interrupt check fires. The queue
    /// is left untouched.
    pub fn wait_until_due(&self, timeout_secs: f64) -> Result<bool, RegistryError> {
        self.debug_assert_owner("wait_until_due");
        let timeout_secs = if timeout_secs < 0.0 {
            self.config.unbounded_timeout_secs
        } else {
            timeout_secs
        };
        let expires = self.clock.now().offset_secs(timeout_secs);
        let max_sleep = self.config.max_sleep();

        let mut queue = self.queue.lock();
        loop {
            let wake_at = match queue.next_due() {
                Some(next) if next < expires => next,
                _ => expires,
            };
            let now = self.clock.now();
            if wake_at <= now {
                break;
            }

            let sleep_for = wake_at.saturating_duration_since(now).min(max_sleep);
            trace!(sleep_secs = sleep_for.as_secs_f64(), "waiting for due callbacks");
            let block_for = self.clock.sleep_interval(sleep_for);
            self.wake.wait_for(&mut queue, block_for);

            let interrupted = MutexGuard::unlocked(&mut queue, || self.interrupt.interrupted());
            if interrupted {
                warn!("wait for due callbacks interrupted");
                return Err(RegistryError::Interrupted);
            }
        }

        Ok(queue.is_due(self.clock.now()))
    }

    /// Describe every queued item in extraction order without removing any.
    /// Owner thread only.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ItemDescription> {
        self.debug_assert_owner("snapshot");
        let mut copy = self.queue.lock().clone();
        let now = self.clock.now();

        let mut described = Vec::with_capacity(copy.len());
        while let Some(item) = copy.pop() {
            described.push(item.describe(now));
        }
        described
    }

    /// [`snapshot`](Self::snapshot) rendered as a JSON array.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from host descriptions.
    pub fn snapshot_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.snapshot())
    }

    fn debug_assert_owner(&self, operation: &str) {
        debug_assert!(
            self.owner.is_owner(),
            "{operation} must run on the registry's owner thread"
        );
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("len", &self.len())
            .field("next_due", &self.next_due_time())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
