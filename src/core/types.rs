/*!
 * Core Types
 * Record tags and allocation profiles shared across the crate
 */

use super::errors::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire tag type
pub type Tag = i64;

/// Identifier of an object owned by a foreign runtime
pub type ForeignObjectId = u64;

/// Record variant tag
///
/// Fixed at construction; the discriminants double as the wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    String,
    Long,
    Double,
    List,
    Key,
    KeyHandler,
    HashSet,
    ForeignObject,
}

impl RecordType {
    /// Wire tag written in front of every encoded node
    #[inline]
    pub const fn tag(self) -> Tag {
        match self {
            RecordType::String => 1,
            RecordType::Long => 2,
            RecordType::Double => 3,
            RecordType::List => 4,
            RecordType::Key => 5,
            RecordType::KeyHandler => 6,
            RecordType::HashSet => 7,
            RecordType::ForeignObject => 8,
        }
    }

    /// Resolve a wire tag, `None` if unknown
    pub const fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            1 => Some(RecordType::String),
            2 => Some(RecordType::Long),
            3 => Some(RecordType::Double),
            4 => Some(RecordType::List),
            5 => Some(RecordType::Key),
            6 => Some(RecordType::KeyHandler),
            7 => Some(RecordType::HashSet),
            8 => Some(RecordType::ForeignObject),
            _ => None,
        }
    }

    /// Whether the variant has a cross-boundary representation
    #[inline]
    pub const fn is_serializable(self) -> bool {
        !matches!(self, RecordType::KeyHandler | RecordType::HashSet)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordType::String => write!(f, "STRING"),
            RecordType::Long => write!(f, "LONG"),
            RecordType::Double => write!(f, "DOUBLE"),
            RecordType::List => write!(f, "LIST"),
            RecordType::Key => write!(f, "KEY"),
            RecordType::KeyHandler => write!(f, "KEY_HANDLER"),
            RecordType::HashSet => write!(f, "HASH_SET"),
            RecordType::ForeignObject => write!(f, "FOREIGN_OBJECT"),
        }
    }
}

/// Allocation profile bound to an execution context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyProfile {
    /// Plain heap allocation, generic dispose, native release
    #[default]
    Native,
    /// Allocation and teardown owned by the foreign runtime; release is a no-op
    ForeignManaged,
}

impl fmt::Display for StrategyProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrategyProfile::Native => write!(f, "native"),
            StrategyProfile::ForeignManaged => write!(f, "foreign_managed"),
        }
    }
}

impl FromStr for StrategyProfile {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "default" => Ok(StrategyProfile::Native),
            "foreign_managed" | "foreign" => Ok(StrategyProfile::ForeignManaged),
            other => Err(RecordError::UnsupportedProfile(other.to_string())),
        }
    }
}
