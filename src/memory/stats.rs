/*!
 * Allocation Statistics
 * Lock-free counters for record allocation and teardown
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by a strategy (or a foreign runtime)
///
/// Relaxed atomics: foreign wrappers may be released from any thread.
#[derive(Debug, Default)]
pub struct AllocationStats {
    nodes_allocated: AtomicU64,
    nodes_released: AtomicU64,
    buffers_released: AtomicU64,
    sequences_released: AtomicU64,
    tables_released: AtomicU64,
    handles_closed: AtomicU64,
}

impl AllocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn node_allocated(&self) {
        self.nodes_allocated.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn node_released(&self) {
        self.nodes_released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn buffer_released(&self) {
        self.buffers_released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn sequence_released(&self) {
        self.sequences_released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn table_released(&self) {
        self.tables_released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn handle_closed(&self) {
        self.handles_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records allocated and not yet released
    pub fn live_nodes(&self) -> usize {
        let allocated = self.nodes_allocated.load(Ordering::Relaxed);
        let released = self.nodes_released.load(Ordering::Relaxed);
        allocated.saturating_sub(released) as usize
    }

    pub fn snapshot(&self) -> AllocationSnapshot {
        AllocationSnapshot {
            nodes_allocated: self.nodes_allocated.load(Ordering::Relaxed),
            nodes_released: self.nodes_released.load(Ordering::Relaxed),
            buffers_released: self.buffers_released.load(Ordering::Relaxed),
            sequences_released: self.sequences_released.load(Ordering::Relaxed),
            tables_released: self.tables_released.load(Ordering::Relaxed),
            handles_closed: self.handles_closed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `AllocationStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocationSnapshot {
    pub nodes_allocated: u64,
    pub nodes_released: u64,
    pub buffers_released: u64,
    pub sequences_released: u64,
    pub tables_released: u64,
    pub handles_closed: u64,
}

impl AllocationSnapshot {
    pub fn live_nodes(&self) -> u64 {
        self.nodes_allocated.saturating_sub(self.nodes_released)
    }

    /// Every allocated node has been released
    pub fn is_balanced(&self) -> bool {
        self.nodes_allocated == self.nodes_released
    }
}
