/*!
 * Serialization Utilities
 *
 * Byte-level primitives underneath the record codec:
 * - Sequential buffer writer/reader over `bytes`
 * - Versioned, size-prefixed frames for transport and persistence
 */

pub mod buffer;
pub mod framing;

pub use buffer::{BufferReader, BufferWriter, BytesReader, BytesWriter};
pub use framing::{frame, unframe};
