/*!
 * Record Limits and Constants
 *
 * Defaults for record construction and decoding, grouped by concern.
 */

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Initial backing capacity of an empty list record
pub const DEFAULT_LIST_CAPACITY: usize = 8;

// =============================================================================
// DECODING
// =============================================================================

/// Maximum nesting of list/key records accepted by the decoder
/// Bounds recursion on untrusted input
pub const DEFAULT_MAX_DECODE_DEPTH: usize = 512;

/// Upper bound on capacity reserved up front for a decoded list
/// Larger lists still decode, they just grow incrementally
pub const MAX_PREALLOCATED_ELEMENTS: usize = 4096;

// =============================================================================
// WIRE FORMAT
// =============================================================================

/// Initial buffer size when encoding a record into a frame
pub const DEFAULT_ENCODE_CAPACITY: usize = 256;

/// Width of a fixed-width integer on the wire
pub const LONG_WIDTH: usize = 8;

/// Version byte written at the start of a record frame
pub const FRAME_FORMAT_VERSION: u8 = 1;

/// Frame header: version byte plus u32 payload length
pub const FRAME_HEADER_LEN: usize = 5;
