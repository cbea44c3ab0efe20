/*!
 * Allocation Strategies
 * Native and foreign-managed implementations of `AllocationStrategy`
 */

use super::stats::AllocationStats;
use super::traits::AllocationStrategy;
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::{RecordType, StrategyProfile};
use crate::record::foreign::ForeignRuntime;
use crate::record::{lifecycle, Record};
use log::trace;
use std::fmt;
use std::sync::Arc;

/// Plain heap strategy used by engine threads
#[derive(Debug)]
pub struct NativeStrategy {
    stats: Arc<AllocationStats>,
    max_live: Option<usize>,
}

impl NativeStrategy {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(AllocationStats::new()),
            max_live: None,
        }
    }

    /// Native strategy that refuses allocations past `limit` live records
    pub fn with_limit(limit: usize) -> Self {
        Self {
            stats: Arc::new(AllocationStats::new()),
            max_live: Some(limit),
        }
    }

    pub fn stats(&self) -> &Arc<AllocationStats> {
        &self.stats
    }
}

impl Default for NativeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationStrategy for NativeStrategy {
    fn profile(&self) -> StrategyProfile {
        StrategyProfile::Native
    }

    fn allocate(&self, _record_type: RecordType) -> RecordResult<()> {
        if let Some(limit) = self.max_live {
            let live = self.stats.live_nodes();
            if live >= limit {
                return Err(RecordError::AllocationFailed {
                    profile: StrategyProfile::Native,
                    live,
                    limit,
                });
            }
        }
        self.stats.node_allocated();
        Ok(())
    }

    fn dispose(&self, record: &mut Record) {
        lifecycle::dispose(record, &self.stats);
    }

    fn release(&self, record_type: RecordType) -> bool {
        trace!("Releasing native {} record node", record_type);
        self.stats.node_released();
        true
    }
}

/// Strategy for threads executing foreign-runtime code
///
/// Allocation and teardown are delegated to the runtime, which also owns the
/// node memory: `release` never deallocates.
pub struct ForeignManagedStrategy {
    runtime: Arc<dyn ForeignRuntime>,
}

impl ForeignManagedStrategy {
    pub fn new(runtime: Arc<dyn ForeignRuntime>) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &Arc<dyn ForeignRuntime> {
        &self.runtime
    }
}

impl fmt::Debug for ForeignManagedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignManagedStrategy")
            .field("runtime", &self.runtime.name())
            .finish()
    }
}

impl AllocationStrategy for ForeignManagedStrategy {
    fn profile(&self) -> StrategyProfile {
        StrategyProfile::ForeignManaged
    }

    fn allocate(&self, record_type: RecordType) -> RecordResult<()> {
        self.runtime.allocate_record(record_type)
    }

    fn dispose(&self, record: &mut Record) {
        self.runtime.dispose_record(record);
    }

    fn release(&self, _record_type: RecordType) -> bool {
        false
    }
}
