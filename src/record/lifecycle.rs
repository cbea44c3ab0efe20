/*!
 * Record Lifecycle
 *
 * Two-phase teardown:
 * 1. dispose: variant-dispatched structural teardown of owned payload
 * 2. release: the node itself, through the strategy that allocated it
 *
 * Foreign object wrappers skip dispose: their payload reference is released
 * under the foreign runtime's lock and the wrapper goes back to the native
 * strategy, whatever the dropping thread has bound.
 */

use super::value::{Record, RecordKind};
use crate::memory::AllocationStats;
use log::trace;

/// Generic structural teardown
///
/// Children are dropped, so each one runs its own lifecycle through its own
/// strategy. Every released resource is tallied in `stats`. There is no
/// partial failure and no rollback.
///
/// Runs at most once per record: returns `false` without touching `stats` when
/// the payload was already disposed.
pub fn dispose(record: &mut Record, stats: &AllocationStats) -> bool {
    if record.disposed {
        return false;
    }
    record.disposed = true;

    match &mut record.kind {
        RecordKind::String(buf) => {
            drop(std::mem::take(buf));
            stats.buffer_released();
        }
        RecordKind::Long(_) | RecordKind::Double(_) => {}
        RecordKind::List(items) => {
            for item in items.drain(..) {
                drop(item);
            }
            drop(std::mem::take(items));
            stats.sequence_released();
        }
        RecordKind::Key(key) => {
            if let Some(name) = key.name.take() {
                drop(name);
                stats.buffer_released();
            }
            drop(key.value.take());
        }
        RecordKind::KeyHandler(handle) => {
            if let Some(handle) = handle.take() {
                handle.close();
                stats.handle_closed();
            }
        }
        RecordKind::HashSet(map) => {
            for (_, value) in map.drain() {
                drop(value);
            }
            drop(std::mem::take(map));
            stats.table_released();
        }
        RecordKind::ForeignObject(object) => {
            drop(object.take());
        }
    }
    true
}

/// Top-level free entry point
///
/// Equivalent to dropping the record; spelled out for call sites that hand a
/// record back explicitly.
#[inline]
pub fn free_record(record: Record) {
    drop(record);
}

impl Record {
    /// Tear the record down now
    #[inline]
    pub fn free(self) {
        free_record(self);
    }
}

impl Drop for Record {
    fn drop(&mut self) {
        let record_type = self.record_type();
        let strategy = self.strategy.clone();

        if let RecordKind::ForeignObject(object) = &mut self.kind {
            drop(object.take());
            strategy.release(record_type);
            return;
        }

        trace!("Disposing {} record under {} strategy", record_type, strategy.profile());
        strategy.dispose(self);
        strategy.release(record_type);
    }
}
