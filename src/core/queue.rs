//! In-memory min-queue of scheduled items ordered by due time, then sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::core::ScheduledItem;
use crate::util::clock::Timestamp;

/// Wrapper that flips item order so the max-heap pops the earliest item first.
#[derive(Clone)]
struct HeapEntry {
    item: Arc<ScheduledItem>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: earliest (due, sequence) is the heap maximum.
        other.item.cmp(&self.item)
    }
}

/// Binary heap of shared item handles.
/// O(log n) push and pop, O(1) peek at the earliest item.
#[derive(Clone, Default)]
pub(crate) struct DueQueue {
    entries: BinaryHeap<HeapEntry>,
}

impl DueQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: Arc<ScheduledItem>) {
        self.entries.push(HeapEntry { item });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the earliest item.
    pub(crate) fn next_due(&self) -> Option<Timestamp> {
        self.entries.peek().map(|entry| entry.item.due())
    }

    /// Non-empty and the earliest item is due at or before `time`.
    pub(crate) fn is_due(&self, time: Timestamp) -> bool {
        self.next_due().is_some_and(|due| due <= time)
    }

    /// Pop the earliest item if it is due at or before `time`.
    pub(crate) fn pop_due(&mut self, time: Timestamp) -> Option<Arc<ScheduledItem>> {
        if self.is_due(time) {
            self.entries.pop().map(|entry| entry.item)
        } else {
            None
        }
    }

    /// Pop the earliest item regardless of due time.
    pub(crate) fn pop(&mut self) -> Option<Arc<ScheduledItem>> {
        self.entries.pop().map(|entry| entry.item)
    }
}
