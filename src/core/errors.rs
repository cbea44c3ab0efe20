/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{RecordType, StrategyProfile, Tag};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record subsystem errors
///
/// Everything except `AllocationFailed` is a contract violation: the caller broke
/// a rule of the record API and the operation is aborted.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RecordError {
    #[error("Type mismatch: expected {expected} record, got {actual}")]
    #[diagnostic(
        code(record::type_mismatch),
        help("Check the record type before using a variant-specific accessor.")
    )]
    TypeMismatch {
        expected: RecordType,
        actual: RecordType,
    },

    #[error("Index {index} out of bounds for list of length {len}")]
    #[diagnostic(code(record::index_out_of_bounds))]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unsupported allocation profile: {0}")]
    #[diagnostic(
        code(record::unsupported_profile),
        help("Use `native`, or register a foreign runtime before selecting `foreign_managed`.")
    )]
    UnsupportedProfile(String),

    #[error("Resource exhaustion under {profile} strategy: {live} live records, limit {limit}")]
    #[diagnostic(
        code(record::allocation_failed),
        help("Free unused records or raise `max_live_records`.")
    )]
    AllocationFailed {
        profile: StrategyProfile,
        live: usize,
        limit: usize,
    },

    #[error("{0} records cannot be serialized")]
    #[diagnostic(
        code(record::not_serializable),
        help("Key handlers and hash sets have no cross-boundary representation.")
    )]
    NotSerializable(RecordType),

    #[error("Unknown record type tag: {0}")]
    #[diagnostic(code(record::unknown_tag))]
    UnknownTag(Tag),

    #[error("Incomplete {record_type} record: missing {missing}")]
    #[diagnostic(code(record::incomplete))]
    IncompleteRecord {
        record_type: RecordType,
        missing: String,
    },

    #[error("No foreign runtime registered with this execution context")]
    #[diagnostic(
        code(record::foreign_runtime_unavailable),
        help("Attach a runtime with `ExecutionContext::with_foreign_runtime`.")
    )]
    ForeignRuntimeUnavailable,

    #[error("Foreign runtime error: {0}")]
    #[diagnostic(code(record::foreign))]
    Foreign(String),

    #[error("Buffer truncated: needed {needed} bytes, {remaining} remaining")]
    #[diagnostic(code(record::truncated))]
    Truncated { needed: usize, remaining: usize },

    #[error("Invalid length prefix: {0}")]
    #[diagnostic(code(record::invalid_length))]
    InvalidLength(i64),

    #[error("Invalid key name {0:?}: key names cannot contain NUL")]
    #[diagnostic(
        code(record::invalid_key_name),
        help("Key names travel as NUL-terminated strings; strip embedded NUL bytes first.")
    )]
    InvalidKeyName(String),

    #[error("Invalid value presence flag: {0}")]
    #[diagnostic(code(record::invalid_presence_flag))]
    InvalidPresenceFlag(i64),

    #[error("{remaining} trailing bytes after decoded record")]
    #[diagnostic(
        code(record::trailing_bytes),
        help("A frame carries exactly one record.")
    )]
    TrailingBytes { remaining: usize },

    #[error("Malformed string: {0}")]
    #[diagnostic(code(record::malformed_string))]
    MalformedString(String),

    #[error("Record nesting exceeds depth limit {limit}")]
    #[diagnostic(
        code(record::depth_exceeded),
        help("Raise `max_decode_depth` if the payload is trusted.")
    )]
    DepthExceeded { limit: usize },

    #[error("Invalid frame version: expected {expected}, got {actual}")]
    #[diagnostic(code(record::invalid_version))]
    InvalidVersion { expected: u8, actual: u8 },
}

impl RecordError {
    /// Build a type mismatch error
    #[inline]
    pub(crate) fn mismatch(expected: RecordType, actual: RecordType) -> Self {
        RecordError::TypeMismatch { expected, actual }
    }

    /// Whether the error signals resource exhaustion rather than a caller bug
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, RecordError::AllocationFailed { .. })
    }
}

/// Result type for record operations
pub type RecordResult<T> = std::result::Result<T, RecordError>;
