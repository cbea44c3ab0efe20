/*!
 * List Records
 * Ordered, index-addressable sequence of owned records
 */

use super::value::{Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::RecordType;

impl Record {
    fn list_items(&self) -> RecordResult<&Vec<Record>> {
        match &self.kind {
            RecordKind::List(items) => Ok(items),
            _ => Err(self.mismatch(RecordType::List)),
        }
    }

    fn list_items_mut(&mut self) -> RecordResult<&mut Vec<Record>> {
        let actual = self.record_type();
        match &mut self.kind {
            RecordKind::List(items) => Ok(items),
            _ => Err(RecordError::mismatch(RecordType::List, actual)),
        }
    }

    pub fn list_len(&self) -> RecordResult<usize> {
        self.list_items().map(Vec::len)
    }

    /// Append at the tail (amortized O(1)); the list takes ownership
    pub fn list_push(&mut self, element: Record) -> RecordResult<()> {
        self.list_items_mut()?.push(element);
        Ok(())
    }

    /// Detach the tail element, ownership moves to the caller
    pub fn list_pop(&mut self) -> RecordResult<Option<Record>> {
        Ok(self.list_items_mut()?.pop())
    }

    pub fn list_get(&self, index: usize) -> RecordResult<&Record> {
        let items = self.list_items()?;
        items.get(index).ok_or(RecordError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    pub fn list_get_mut(&mut self, index: usize) -> RecordResult<&mut Record> {
        let items = self.list_items_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfBounds { index, len })
    }

    pub fn list_iter(&self) -> RecordResult<std::slice::Iter<'_, Record>> {
        self.list_items().map(|items| items.iter())
    }
}
