/*!
 * Record Codec
 *
 * Recursive, self-describing encoding: every node is `[type tag][payload]`.
 *
 * - String: length-prefixed buffer
 * - Long: integer
 * - Double: IEEE-754 bit pattern as an integer (lossless)
 * - List: element count, then each element in order
 * - Key: name string, presence flag, then the value iff present
 * - ForeignObject: opaque bytes produced by the foreign runtime
 * - HashSet, KeyHandler: not serializable
 */

use super::foreign::ForeignRef;
use super::value::{Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::limits::{DEFAULT_ENCODE_CAPACITY, MAX_PREALLOCATED_ELEMENTS};
use crate::core::serialization::{frame, unframe, BufferReader, BufferWriter, BytesReader, BytesWriter};
use crate::core::types::RecordType;
use crate::memory::ExecutionContext;
use bytes::Bytes;
use log::{trace, warn};

const VALUE_MISSING: i64 = 0;
const VALUE_PRESENT: i64 = 1;

/// Encode `record` and its whole subtree into `writer`
pub fn serialize_record(writer: &mut dyn BufferWriter, record: &Record) -> RecordResult<()> {
    let record_type = record.record_type();
    if !record_type.is_serializable() {
        warn!("Refusing to serialize {} record", record_type);
        return Err(RecordError::NotSerializable(record_type));
    }

    writer.write_long(record_type.tag());
    match &record.kind {
        RecordKind::String(buf) => writer.write_buffer(buf),
        RecordKind::Long(num) => writer.write_long(*num),
        RecordKind::Double(num) => writer.write_long(num.to_bits() as i64),
        RecordKind::List(items) => {
            writer.write_long(items.len() as i64);
            for item in items {
                serialize_record(writer, item)?;
            }
        }
        RecordKind::Key(key) => {
            let name = key.name.as_deref().ok_or_else(|| RecordError::IncompleteRecord {
                record_type,
                missing: "key name".to_string(),
            })?;
            writer.write_string(name);
            match &key.value {
                Some(value) => {
                    writer.write_long(VALUE_PRESENT);
                    serialize_record(writer, value)?;
                }
                None => writer.write_long(VALUE_MISSING),
            }
        }
        RecordKind::ForeignObject(object) => {
            let object = object.as_ref().ok_or_else(|| RecordError::IncompleteRecord {
                record_type,
                missing: "foreign payload".to_string(),
            })?;
            object.runtime().encode(object.id(), writer)?;
        }
        RecordKind::HashSet(_) | RecordKind::KeyHandler(_) => {
            unreachable!("non-serializable variants rejected above")
        }
    }
    Ok(())
}

/// Decode one record (and its subtree) through the context's active strategy
pub fn deserialize_record(ctx: &ExecutionContext, reader: &mut dyn BufferReader) -> RecordResult<Record> {
    decode_node(ctx, reader, 0)
}

fn decode_node(ctx: &ExecutionContext, reader: &mut dyn BufferReader, depth: usize) -> RecordResult<Record> {
    let limit = ctx.config().max_decode_depth;
    if depth > limit {
        return Err(RecordError::DepthExceeded { limit });
    }

    let tag = reader.read_long()?;
    let record_type = RecordType::from_tag(tag).ok_or(RecordError::UnknownTag(tag))?;

    match record_type {
        RecordType::String => {
            let buf = reader.read_buffer()?;
            ctx.string(buf.to_vec())
        }
        RecordType::Long => ctx.long(reader.read_long()?),
        RecordType::Double => ctx.double(f64::from_bits(reader.read_long()? as u64)),
        RecordType::List => {
            let raw = reader.read_long()?;
            let count = usize::try_from(raw).map_err(|_| RecordError::InvalidLength(raw))?;
            let mut list = ctx.list_with_capacity(count.min(MAX_PREALLOCATED_ELEMENTS))?;
            for _ in 0..count {
                list.list_push(decode_node(ctx, reader, depth + 1)?)?;
            }
            Ok(list)
        }
        RecordType::Key => {
            let name = reader.read_string()?;
            let value = match reader.read_long()? {
                VALUE_MISSING => None,
                VALUE_PRESENT => Some(decode_node(ctx, reader, depth + 1)?),
                other => return Err(RecordError::InvalidPresenceFlag(other)),
            };
            ctx.key_with(name, value)
        }
        RecordType::ForeignObject => {
            let runtime = ctx
                .foreign_runtime()
                .ok_or(RecordError::ForeignRuntimeUnavailable)?
                .clone();
            let id = runtime.decode(reader)?;
            ctx.foreign_object(Some(ForeignRef::adopt(runtime, id)))
        }
        RecordType::HashSet | RecordType::KeyHandler => {
            warn!("Encountered non-deserializable {} tag", record_type);
            Err(RecordError::NotSerializable(record_type))
        }
    }
}

/// Encode a record into a versioned, size-prefixed frame
pub fn to_bytes(record: &Record) -> RecordResult<Bytes> {
    let mut writer = BytesWriter::with_capacity(DEFAULT_ENCODE_CAPACITY);
    serialize_record(&mut writer, record)?;
    trace!("Encoded {} record into {} bytes", record.record_type(), writer.len());
    frame(&writer.freeze())
}

/// Decode a frame produced by `to_bytes`
///
/// The frame must hold exactly one record; leftover payload bytes are an error.
pub fn from_bytes(ctx: &ExecutionContext, bytes: &Bytes) -> RecordResult<Record> {
    let mut reader = BytesReader::new(unframe(bytes)?);
    let record = deserialize_record(ctx, &mut reader)?;
    match reader.remaining() {
        0 => Ok(record),
        remaining => Err(RecordError::TrailingBytes { remaining }),
    }
}
