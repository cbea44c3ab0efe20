/*!
 * Record Configuration
 * Per-context settings for allocation and decoding
 */

use super::limits::{DEFAULT_LIST_CAPACITY, DEFAULT_MAX_DECODE_DEPTH};
use super::types::StrategyProfile;
use serde::{Deserialize, Serialize};

/// Settings consumed by an `ExecutionContext`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RecordConfig {
    /// Strategy bound when the context is created
    pub default_profile: StrategyProfile,
    /// Backing capacity reserved by `ExecutionContext::list`
    pub list_initial_capacity: usize,
    /// Maximum list/key nesting accepted while decoding
    pub max_decode_depth: usize,
    /// Cap on live natively-allocated records, `None` for unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_live_records: Option<usize>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            default_profile: StrategyProfile::Native,
            list_initial_capacity: DEFAULT_LIST_CAPACITY,
            max_decode_depth: DEFAULT_MAX_DECODE_DEPTH,
            max_live_records: None,
        }
    }
}

impl RecordConfig {
    pub fn with_profile(mut self, profile: StrategyProfile) -> Self {
        self.default_profile = profile;
        self
    }

    pub fn with_max_live_records(mut self, limit: usize) -> Self {
        self.max_live_records = Some(limit);
        self
    }

    pub fn with_max_decode_depth(mut self, depth: usize) -> Self {
        self.max_decode_depth = depth;
        self
    }
}
