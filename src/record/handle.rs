/*!
 * Key Handler Records
 * Borrowed handles to keys held open in the host store
 */

use super::value::{Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::RecordType;

/// Open resource handle supplied by the host key-value store
///
/// The record never owns the underlying key; closing the handle is the only
/// teardown it performs.
pub trait KeyHandle: Send {
    /// Name of the key the handle refers to
    fn name(&self) -> &[u8];

    /// Close the handle; consumes it so it can only happen once
    fn close(self: Box<Self>);
}

impl Record {
    /// Borrow the wrapped handle
    pub fn key_handler(&self) -> RecordResult<&dyn KeyHandle> {
        match &self.kind {
            RecordKind::KeyHandler(Some(handle)) => Ok(handle.as_ref()),
            RecordKind::KeyHandler(None) => Err(RecordError::IncompleteRecord {
                record_type: RecordType::KeyHandler,
                missing: "handle".to_string(),
            }),
            _ => Err(self.mismatch(RecordType::KeyHandler)),
        }
    }
}
