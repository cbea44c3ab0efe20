/*!
 * Record Value
 * Tagged union exchanged between pipeline steps, plus scalar/string accessors
 */

use super::foreign::ForeignRef;
use super::handle::KeyHandle;
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::{RecordType, StrategyProfile};
use crate::memory::AllocationStrategy;
use ahash::HashMap;
use std::fmt;
use std::sync::Arc;

/// Payload of a key record: optional name, optional nested value
#[derive(Default)]
pub(crate) struct KeyPayload {
    pub(crate) name: Option<String>,
    pub(crate) value: Option<Box<Record>>,
}

/// Variant payloads
///
/// Containers own their children outright; nothing is shared between parents.
pub(crate) enum RecordKind {
    String(Vec<u8>),
    Long(i64),
    Double(f64),
    List(Vec<Record>),
    Key(KeyPayload),
    HashSet(HashMap<String, Record>),
    KeyHandler(Option<Box<dyn KeyHandle>>),
    ForeignObject(Option<ForeignRef>),
}

impl RecordKind {
    #[inline]
    pub(crate) fn record_type(&self) -> RecordType {
        match self {
            RecordKind::String(_) => RecordType::String,
            RecordKind::Long(_) => RecordType::Long,
            RecordKind::Double(_) => RecordType::Double,
            RecordKind::List(_) => RecordType::List,
            RecordKind::Key(_) => RecordType::Key,
            RecordKind::HashSet(_) => RecordType::HashSet,
            RecordKind::KeyHandler(_) => RecordType::KeyHandler,
            RecordKind::ForeignObject(_) => RecordType::ForeignObject,
        }
    }
}

/// Polymorphic pipeline value
///
/// Built only through `ExecutionContext` constructors. The record remembers the
/// strategy that allocated it and is torn down through that strategy exactly
/// once, when dropped (see `lifecycle`).
pub struct Record {
    pub(crate) kind: RecordKind,
    pub(crate) strategy: Arc<dyn AllocationStrategy>,
    /// Payload already torn down by `lifecycle::dispose`
    pub(crate) disposed: bool,
}

impl Record {
    #[inline]
    pub(crate) fn from_parts(kind: RecordKind, strategy: Arc<dyn AllocationStrategy>) -> Self {
        Self {
            kind,
            strategy,
            disposed: false,
        }
    }

    #[inline]
    pub fn record_type(&self) -> RecordType {
        self.kind.record_type()
    }

    /// Profile of the strategy that allocated this record
    #[inline]
    pub fn profile(&self) -> StrategyProfile {
        self.strategy.profile()
    }

    #[inline]
    pub fn is_serializable(&self) -> bool {
        self.record_type().is_serializable()
    }

    #[inline]
    pub(crate) fn mismatch(&self, expected: RecordType) -> RecordError {
        RecordError::mismatch(expected, self.record_type())
    }

    // ------------------------------------------------------------------
    // String
    // ------------------------------------------------------------------

    /// Borrow the string bytes (may contain NUL)
    pub fn string(&self) -> RecordResult<&[u8]> {
        match &self.kind {
            RecordKind::String(buf) => Ok(buf),
            _ => Err(self.mismatch(RecordType::String)),
        }
    }

    pub fn string_len(&self) -> RecordResult<usize> {
        self.string().map(<[u8]>::len)
    }

    /// Replace the string payload, handing the previous buffer back to the caller
    pub fn set_string(&mut self, value: impl Into<Vec<u8>>) -> RecordResult<Vec<u8>> {
        match &mut self.kind {
            RecordKind::String(buf) => Ok(std::mem::replace(buf, value.into())),
            _ => Err(self.mismatch(RecordType::String)),
        }
    }

    // ------------------------------------------------------------------
    // Long / Double
    // ------------------------------------------------------------------

    pub fn long(&self) -> RecordResult<i64> {
        match self.kind {
            RecordKind::Long(num) => Ok(num),
            _ => Err(self.mismatch(RecordType::Long)),
        }
    }

    pub fn set_long(&mut self, value: i64) -> RecordResult<()> {
        match &mut self.kind {
            RecordKind::Long(num) => {
                *num = value;
                Ok(())
            }
            _ => Err(self.mismatch(RecordType::Long)),
        }
    }

    pub fn double(&self) -> RecordResult<f64> {
        match self.kind {
            RecordKind::Double(num) => Ok(num),
            _ => Err(self.mismatch(RecordType::Double)),
        }
    }

    pub fn set_double(&mut self, value: f64) -> RecordResult<()> {
        match &mut self.kind {
            RecordKind::Double(num) => {
                *num = value;
                Ok(())
            }
            _ => Err(self.mismatch(RecordType::Double)),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RecordKind::String(buf) => f
                .debug_tuple("String")
                .field(&String::from_utf8_lossy(buf))
                .finish(),
            RecordKind::Long(num) => f.debug_tuple("Long").field(num).finish(),
            RecordKind::Double(num) => f.debug_tuple("Double").field(num).finish(),
            RecordKind::List(items) => f.debug_tuple("List").field(items).finish(),
            RecordKind::Key(key) => f
                .debug_struct("Key")
                .field("name", &key.name)
                .field("value", &key.value)
                .finish(),
            RecordKind::HashSet(map) => f.debug_tuple("HashSet").field(map).finish(),
            RecordKind::KeyHandler(handle) => f
                .debug_tuple("KeyHandler")
                .field(&handle.as_ref().map(|h| String::from_utf8_lossy(h.name()).into_owned()))
                .finish(),
            RecordKind::ForeignObject(object) => f
                .debug_tuple("ForeignObject")
                .field(&object.as_ref().map(ForeignRef::id))
                .finish(),
        }
    }
}

/// Structural equality, ignoring the allocating strategy
///
/// Key handlers never compare equal; foreign objects compare by identity.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (RecordKind::String(a), RecordKind::String(b)) => a == b,
            (RecordKind::Long(a), RecordKind::Long(b)) => a == b,
            (RecordKind::Double(a), RecordKind::Double(b)) => a.to_bits() == b.to_bits() || a == b,
            (RecordKind::List(a), RecordKind::List(b)) => a == b,
            (RecordKind::Key(a), RecordKind::Key(b)) => a.name == b.name && a.value == b.value,
            (RecordKind::HashSet(a), RecordKind::HashSet(b)) => a == b,
            (RecordKind::ForeignObject(a), RecordKind::ForeignObject(b)) => a == b,
            _ => false,
        }
    }
}
