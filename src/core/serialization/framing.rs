/*!
 * Versioned Frames
 * Version and size prefix for encoded records crossing a process boundary
 *
 * Format: [1-byte version][4-byte LE length][payload]
 */

use crate::core::errors::{RecordError, RecordResult};
use crate::core::limits::{FRAME_FORMAT_VERSION, FRAME_HEADER_LEN};
use bytes::{BufMut, Bytes, BytesMut};

/// Wrap an encoded payload in a versioned frame
pub fn frame(payload: &[u8]) -> RecordResult<Bytes> {
    let len = u32::try_from(payload.len())
        .map_err(|_| RecordError::InvalidLength(payload.len() as i64))?;

    let mut out = BytesMut::with_capacity(FRAME_HEADER_LEN + payload.len());
    out.put_u8(FRAME_FORMAT_VERSION);
    out.put_u32_le(len);
    out.put_slice(payload);
    Ok(out.freeze())
}

/// Validate a frame header and return the payload slice (zero-copy)
pub fn unframe(bytes: &Bytes) -> RecordResult<Bytes> {
    if bytes.len() < FRAME_HEADER_LEN {
        return Err(RecordError::Truncated {
            needed: FRAME_HEADER_LEN,
            remaining: bytes.len(),
        });
    }

    let version = bytes[0];
    if version != FRAME_FORMAT_VERSION {
        return Err(RecordError::InvalidVersion {
            expected: FRAME_FORMAT_VERSION,
            actual: version,
        });
    }

    let len = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
    if bytes.len() < FRAME_HEADER_LEN + len {
        return Err(RecordError::Truncated {
            needed: FRAME_HEADER_LEN + len,
            remaining: bytes.len(),
        });
    }

    Ok(bytes.slice(FRAME_HEADER_LEN..FRAME_HEADER_LEN + len))
}
