/*!
 * Foreign Objects
 *
 * Records whose payload is owned and reference-counted by an embedded runtime.
 * The rest of the record model only sees an opaque `ForeignRef` whose clone is
 * an acquire and whose drop is a release, both performed under the runtime's
 * own lock.
 */

use super::lifecycle;
use super::value::{Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::serialization::{BufferReader, BufferWriter};
use crate::core::types::{ForeignObjectId, RecordType};
use crate::memory::AllocationStats;
use ahash::HashMap;
use bytes::Bytes;
use log::{trace, warn};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Hooks an embedded runtime provides to the record subsystem
pub trait ForeignRuntime: Send + Sync {
    /// Runtime name for logging/debugging
    fn name(&self) -> &str;

    /// Allocate a record node on behalf of a `ForeignManaged` context
    fn allocate_record(&self, record_type: RecordType) -> RecordResult<()>;

    /// Teardown entry point for records allocated by this runtime
    fn dispose_record(&self, record: &mut Record);

    /// Thread-safe reference count increment
    fn acquire(&self, object: ForeignObjectId);

    /// Thread-safe reference count decrement
    fn release(&self, object: ForeignObjectId);

    /// Pickle an object into the writer
    fn encode(&self, object: ForeignObjectId, writer: &mut dyn BufferWriter) -> RecordResult<()>;

    /// Unpickle an object; the caller owns one reference to the result
    fn decode(&self, reader: &mut dyn BufferReader) -> RecordResult<ForeignObjectId>;
}

/// Owned reference to a foreign object
///
/// Cloning acquires another reference; dropping releases one.
pub struct ForeignRef {
    runtime: Arc<dyn ForeignRuntime>,
    id: ForeignObjectId,
}

impl ForeignRef {
    /// Take over a reference the caller already holds (no increment)
    pub fn adopt(runtime: Arc<dyn ForeignRuntime>, id: ForeignObjectId) -> Self {
        Self { runtime, id }
    }

    #[inline]
    pub fn id(&self) -> ForeignObjectId {
        self.id
    }

    pub fn runtime(&self) -> &Arc<dyn ForeignRuntime> {
        &self.runtime
    }

    fn same_runtime(&self, other: &ForeignRef) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.runtime) as *const (),
            Arc::as_ptr(&other.runtime) as *const (),
        )
    }
}

impl Clone for ForeignRef {
    fn clone(&self) -> Self {
        self.runtime.acquire(self.id);
        Self {
            runtime: self.runtime.clone(),
            id: self.id,
        }
    }
}

impl Drop for ForeignRef {
    fn drop(&mut self) {
        self.runtime.release(self.id);
    }
}

impl PartialEq for ForeignRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.same_runtime(other)
    }
}

impl fmt::Debug for ForeignRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignRef")
            .field("runtime", &self.runtime.name())
            .field("id", &self.id)
            .finish()
    }
}

impl Record {
    pub fn foreign_object(&self) -> RecordResult<Option<&ForeignRef>> {
        match &self.kind {
            RecordKind::ForeignObject(object) => Ok(object.as_ref()),
            _ => Err(self.mismatch(RecordType::ForeignObject)),
        }
    }

    /// Install a new payload; the superseded reference is released
    pub fn set_foreign_object(&mut self, object: Option<ForeignRef>) -> RecordResult<()> {
        match &mut self.kind {
            RecordKind::ForeignObject(slot) => {
                *slot = object;
                Ok(())
            }
            _ => Err(self.mismatch(RecordType::ForeignObject)),
        }
    }

    /// Detach the payload, the caller takes over its reference
    pub fn take_foreign_object(&mut self) -> RecordResult<Option<ForeignRef>> {
        match &mut self.kind {
            RecordKind::ForeignObject(slot) => Ok(slot.take()),
            _ => Err(self.mismatch(RecordType::ForeignObject)),
        }
    }
}

// ============================================================================
// Shared object runtime
// ============================================================================

struct ForeignSlot {
    refs: usize,
    payload: Bytes,
}

#[derive(Default)]
struct ObjectTable {
    next_id: ForeignObjectId,
    objects: HashMap<ForeignObjectId, ForeignSlot>,
}

impl ObjectTable {
    fn insert(&mut self, payload: Bytes) -> ForeignObjectId {
        self.next_id += 1;
        let id = self.next_id;
        self.objects.insert(id, ForeignSlot { refs: 1, payload });
        id
    }
}

/// Embedded runtime holding opaque byte objects under one global lock
///
/// Objects are reference counted; the last release frees them. Records built
/// under a `ForeignManaged` context backed by this runtime are accounted in
/// its own `AllocationStats`.
pub struct SharedObjectRuntime {
    name: String,
    table: Mutex<ObjectTable>,
    stats: AllocationStats,
}

impl SharedObjectRuntime {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: Mutex::new(ObjectTable::default()),
            stats: AllocationStats::new(),
        }
    }

    /// Create an object holding `payload`; the returned reference is its only one
    pub fn create(self: &Arc<Self>, payload: impl Into<Bytes>) -> ForeignRef {
        let id = self.table.lock().insert(payload.into());
        trace!("{}: created foreign object {}", self.name, id);
        ForeignRef::adopt(self.clone(), id)
    }

    /// Current reference count, `None` once the object is gone
    pub fn ref_count(&self, id: ForeignObjectId) -> Option<usize> {
        self.table.lock().objects.get(&id).map(|slot| slot.refs)
    }

    pub fn payload(&self, id: ForeignObjectId) -> Option<Bytes> {
        self.table.lock().objects.get(&id).map(|slot| slot.payload.clone())
    }

    pub fn live_objects(&self) -> usize {
        self.table.lock().objects.len()
    }

    /// Records allocated and disposed through this runtime
    pub fn stats(&self) -> &AllocationStats {
        &self.stats
    }
}

impl fmt::Debug for SharedObjectRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedObjectRuntime")
            .field("name", &self.name)
            .field("live_objects", &self.live_objects())
            .finish()
    }
}

impl ForeignRuntime for SharedObjectRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn allocate_record(&self, _record_type: RecordType) -> RecordResult<()> {
        self.stats.node_allocated();
        Ok(())
    }

    fn dispose_record(&self, record: &mut Record) {
        // The runtime reclaims the node together with its payload.
        if lifecycle::dispose(record, &self.stats) {
            self.stats.node_released();
        }
    }

    fn acquire(&self, object: ForeignObjectId) {
        match self.table.lock().objects.get_mut(&object) {
            Some(slot) => slot.refs += 1,
            None => warn!("{}: acquire of unknown foreign object {}", self.name, object),
        }
    }

    fn release(&self, object: ForeignObjectId) {
        let mut table = self.table.lock();
        let remaining = match table.objects.get_mut(&object) {
            Some(slot) => {
                slot.refs -= 1;
                slot.refs
            }
            None => {
                warn!("{}: release of unknown foreign object {}", self.name, object);
                return;
            }
        };
        if remaining == 0 {
            table.objects.remove(&object);
            trace!("{}: freed foreign object {}", self.name, object);
        }
    }

    fn encode(&self, object: ForeignObjectId, writer: &mut dyn BufferWriter) -> RecordResult<()> {
        let payload = self
            .payload(object)
            .ok_or_else(|| RecordError::Foreign(format!("unknown foreign object {}", object)))?;
        writer.write_buffer(&payload);
        Ok(())
    }

    fn decode(&self, reader: &mut dyn BufferReader) -> RecordResult<ForeignObjectId> {
        let payload = reader.read_buffer()?;
        Ok(self.table.lock().insert(payload))
    }
}
