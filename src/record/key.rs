/*!
 * Key Records
 * A named slot holding an optional nested record
 */

use super::value::{KeyPayload, Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::RecordType;

/// Key names travel as NUL-terminated strings, so NUL never appears in one
pub(crate) fn validate_key_name(name: String) -> RecordResult<String> {
    if name.contains('\0') {
        return Err(RecordError::InvalidKeyName(name));
    }
    Ok(name)
}

impl Record {
    fn key_payload(&self) -> RecordResult<&KeyPayload> {
        match &self.kind {
            RecordKind::Key(key) => Ok(key),
            _ => Err(self.mismatch(RecordType::Key)),
        }
    }

    fn key_payload_mut(&mut self) -> RecordResult<&mut KeyPayload> {
        let actual = self.record_type();
        match &mut self.kind {
            RecordKind::Key(key) => Ok(key),
            _ => Err(RecordError::mismatch(RecordType::Key, actual)),
        }
    }

    pub fn key_name(&self) -> RecordResult<Option<&str>> {
        self.key_payload().map(|key| key.name.as_deref())
    }

    /// Install a new name, returning the previous one to the caller
    ///
    /// A name containing NUL is rejected and the current name is kept.
    pub fn set_key_name(&mut self, name: impl Into<String>) -> RecordResult<Option<String>> {
        let key = self.key_payload_mut()?;
        let name = validate_key_name(name.into())?;
        Ok(key.name.replace(name))
    }

    pub fn key_value(&self) -> RecordResult<Option<&Record>> {
        self.key_payload().map(|key| key.value.as_deref())
    }

    pub fn key_value_mut(&mut self) -> RecordResult<Option<&mut Record>> {
        self.key_payload_mut().map(|key| key.value.as_deref_mut())
    }

    /// Replace the nested value; a superseded value is freed
    pub fn set_key_value(&mut self, value: Option<Record>) -> RecordResult<()> {
        let key = self.key_payload_mut()?;
        drop(key.value.take());
        key.value = value.map(Box::new);
        Ok(())
    }

    /// Detach the nested value, ownership moves to the caller
    pub fn take_key_value(&mut self) -> RecordResult<Option<Record>> {
        Ok(self.key_payload_mut()?.value.take().map(|boxed| *boxed))
    }
}
