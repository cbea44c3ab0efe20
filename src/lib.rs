/*!
 * Flow Record Library
 * Polymorphic pipeline values, their lifecycle and binary wire format
 */

pub mod core;
pub mod memory;
pub mod record;

// Re-exports
pub use crate::core::{RecordConfig, RecordError, RecordResult, RecordType, StrategyProfile};
pub use crate::core::serialization::{BufferReader, BufferWriter, BytesReader, BytesWriter};
pub use memory::{AllocationSnapshot, AllocationStats, AllocationStrategy, ExecutionContext};
pub use record::{
    deserialize_record, free_record, serialize_record, ForeignRef, ForeignRuntime, KeyHandle,
    Record, SharedObjectRuntime,
};
