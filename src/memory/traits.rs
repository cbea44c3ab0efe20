/*!
 * Memory Traits
 * Allocation strategy abstraction
 */

use crate::core::errors::RecordResult;
use crate::core::types::{RecordType, StrategyProfile};
use crate::record::Record;
use std::fmt;

/// Allocate / dispose / release triple bound to an execution context
///
/// Captured by every record at construction, so teardown always runs through
/// the strategy that allocated the record regardless of the thread dropping it.
pub trait AllocationStrategy: Send + Sync + fmt::Debug {
    /// Profile this strategy implements
    fn profile(&self) -> StrategyProfile;

    /// Account for a new record node
    ///
    /// Fails with `AllocationFailed` on resource exhaustion.
    fn allocate(&self, record_type: RecordType) -> RecordResult<()>;

    /// Structural teardown of the record's owned payload
    fn dispose(&self, record: &mut Record);

    /// Release the node itself
    ///
    /// Returns `false` when the strategy has no deallocator (no-op).
    fn release(&self, record_type: RecordType) -> bool;
}
