//! Owner-thread predicates.
//!
//! Extraction, waiting, snapshots and host-managed insertions are only valid on
//! the registry's owner thread. The registry asks an [`OwnerCheck`] before each
//! of those operations and fails a debug assertion when it answers `false`.

use std::thread::{self, ThreadId};

/// Answers "is the calling thread the owner?".
pub trait OwnerCheck: Send + Sync {
    /// `true` when the current thread may run owner-only operations.
    fn is_owner(&self) -> bool;
}

impl<F> OwnerCheck for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_owner(&self) -> bool {
        self()
    }
}

/// Owner check pinned to one OS thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerThread {
    id: ThreadId,
}

impl OwnerThread {
    /// Pin ownership to the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    /// Pin ownership to a specific thread.
    #[must_use]
    pub const fn from_id(id: ThreadId) -> Self {
        Self { id }
    }

    /// The owning thread.
    #[must_use]
    pub const fn id(&self) -> ThreadId {
        self.id
    }
}

impl OwnerCheck for OwnerThread {
    fn is_owner(&self) -> bool {
        thread::current().id() == self.id
    }
}
