//! Scheduled items: a due time, a sequence number, and opaque work.

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::util::clock::Timestamp;

/// Process-wide sequence source. Starts at zero and is never reset.
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn next_sequence() -> u64 {
    NEXT_SEQUENCE.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Host-managed function value.
///
/// Such values may only be created, cloned, described and invoked on the
/// registry's owner thread. The registry checks the owner on insertion and
/// snapshot; callers invoking extracted items are responsible for the rest.
pub trait HostFunction: Send + Sync {
    /// Run the function.
    fn call(&self);

    /// Structured description for diagnostics.
    fn describe(&self) -> serde_json::Value;
}

type NativeFn = Box<dyn Fn() + Send + Sync>;

/// The opaque payload of a scheduled item.
pub enum Work {
    /// A native function bound to its argument. Safe to build on any thread.
    Native(NativeFn),
    /// A host-managed function value. Owner thread only.
    Host(Box<dyn HostFunction>),
}

impl Work {
    /// Wrap a native closure.
    pub fn native<F>(func: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::Native(Box::new(func))
    }

    /// Wrap a host-managed function.
    pub fn host<H>(func: H) -> Self
    where
        H: HostFunction + 'static,
    {
        Self::Host(Box::new(func))
    }

    /// Whether this payload carries owner-thread restrictions.
    #[must_use]
    pub const fn is_host_managed(&self) -> bool {
        matches!(self, Self::Host(_))
    }

    fn describe(&self) -> serde_json::Value {
        match self {
            Self::Native(_) => serde_json::Value::String("native function".into()),
            Self::Host(func) => func.describe(),
        }
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Native(..)"),
            Self::Host(_) => f.write_str("Host(..)"),
        }
    }
}

/// Diagnostic view of a queued item, as produced by
/// [`CallbackRegistry::snapshot`](crate::core::CallbackRegistry::snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescription {
    /// Sequence number of the item.
    pub id: u64,
    /// Seconds from "now" until the item is due; negative when overdue.
    pub when: f64,
    /// Description of the work payload.
    pub callback: serde_json::Value,
}

/// A unit of work waiting for its due time.
///
/// Items are totally ordered by `(due, sequence)`: earlier due time first, and
/// among equal due times the one created first. Sequence numbers are unique,
/// so two items compare equal only when they are the same item.
pub struct ScheduledItem {
    due: Timestamp,
    sequence: u64,
    work: Work,
}

impl ScheduledItem {
    /// Create an item and assign it the next sequence number.
    pub(crate) fn new(due: Timestamp, work: Work) -> Self {
        Self {
            due,
            sequence: next_sequence(),
            work,
        }
    }

    /// When the item becomes eligible for extraction.
    #[must_use]
    pub const fn due(&self) -> Timestamp {
        self.due
    }

    /// Unique, creation-ordered identifier.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The payload.
    #[must_use]
    pub const fn work(&self) -> &Work {
        &self.work
    }

    /// Run the payload. Host-managed payloads must be invoked on the owner thread.
    pub fn invoke(&self) {
        match &self.work {
            Work::Native(func) => func(),
            Work::Host(func) => func.call(),
        }
    }

    /// Describe the item relative to `now`. Does not mutate anything.
    ///
    /// Host-managed payloads must be described on the owner thread.
    #[must_use]
    pub fn describe(&self, now: Timestamp) -> ItemDescription {
        ItemDescription {
            id: self.sequence,
            when: self.due.diff_secs(now),
            callback: self.work.describe(),
        }
    }
}

impl fmt::Debug for ScheduledItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledItem")
            .field("due", &self.due)
            .field("sequence", &self.sequence)
            .field("work", &self.work)
            .finish()
    }
}

impl PartialEq for ScheduledItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledItem {}

impl PartialOrd for ScheduledItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}
