/*!
 * Execution Context
 * Explicit per-thread binding of the active allocation strategy
 */

use super::stats::AllocationStats;
use super::strategy::{ForeignManagedStrategy, NativeStrategy};
use super::traits::AllocationStrategy;
use crate::core::config::RecordConfig;
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::StrategyProfile;
use crate::record::foreign::{ForeignRef, ForeignRuntime};
use crate::record::handle::KeyHandle;
use crate::record::{validate_key_name, KeyPayload, Record, RecordKind};
use ahash::HashMap;
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Record factory owned by one execution thread
///
/// Holds the strategy every constructor goes through. Engine threads keep the
/// native strategy; threads running foreign-runtime code switch to
/// `ForeignManaged` before building records.
pub struct ExecutionContext {
    config: RecordConfig,
    native: Arc<NativeStrategy>,
    foreign: Option<Arc<dyn ForeignRuntime>>,
    active: Arc<dyn AllocationStrategy>,
}

impl ExecutionContext {
    /// Create a context bound to the native strategy
    pub fn new(config: RecordConfig) -> Self {
        let native = Arc::new(match config.max_live_records {
            Some(limit) => NativeStrategy::with_limit(limit),
            None => NativeStrategy::new(),
        });
        debug!(
            "Execution context created (list capacity {}, decode depth {})",
            config.list_initial_capacity, config.max_decode_depth
        );

        Self {
            config,
            active: native.clone(),
            native,
            foreign: None,
        }
    }

    /// Create a context and bind the configured default profile
    pub fn from_config(config: RecordConfig, foreign: Option<Arc<dyn ForeignRuntime>>) -> RecordResult<Self> {
        let profile = config.default_profile;
        let mut ctx = Self::new(config);
        ctx.foreign = foreign;
        ctx.set_strategy(profile)?;
        Ok(ctx)
    }

    /// Register the foreign runtime used by `ForeignManaged` and foreign objects
    pub fn with_foreign_runtime(mut self, runtime: Arc<dyn ForeignRuntime>) -> Self {
        self.foreign = Some(runtime);
        self
    }

    /// Bind the allocation strategy for subsequent constructions
    ///
    /// Records already built keep the strategy that allocated them.
    pub fn set_strategy(&mut self, profile: StrategyProfile) -> RecordResult<()> {
        let active: Arc<dyn AllocationStrategy> = match profile {
            StrategyProfile::Native => self.native.clone(),
            StrategyProfile::ForeignManaged => {
                let runtime = self.foreign.clone().ok_or_else(|| {
                    RecordError::UnsupportedProfile(format!(
                        "{} (no foreign runtime registered)",
                        profile
                    ))
                })?;
                Arc::new(ForeignManagedStrategy::new(runtime))
            }
        };
        self.active = active;
        debug!("Allocation strategy set to {}", profile);
        Ok(())
    }

    #[inline]
    pub fn profile(&self) -> StrategyProfile {
        self.active.profile()
    }

    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    /// Counters of the native strategy (wrappers of foreign objects included)
    pub fn native_stats(&self) -> &Arc<AllocationStats> {
        self.native.stats()
    }

    pub fn foreign_runtime(&self) -> Option<&Arc<dyn ForeignRuntime>> {
        self.foreign.as_ref()
    }

    fn alloc(&self, kind: RecordKind) -> RecordResult<Record> {
        self.active.allocate(kind.record_type())?;
        Ok(Record::from_parts(kind, self.active.clone()))
    }

    pub fn string(&self, value: impl Into<Vec<u8>>) -> RecordResult<Record> {
        self.alloc(RecordKind::String(value.into()))
    }

    pub fn long(&self, value: i64) -> RecordResult<Record> {
        self.alloc(RecordKind::Long(value))
    }

    pub fn double(&self, value: f64) -> RecordResult<Record> {
        self.alloc(RecordKind::Double(value))
    }

    /// Empty list with the configured initial capacity
    pub fn list(&self) -> RecordResult<Record> {
        self.list_with_capacity(self.config.list_initial_capacity)
    }

    pub fn list_with_capacity(&self, capacity: usize) -> RecordResult<Record> {
        self.alloc(RecordKind::List(Vec::with_capacity(capacity)))
    }

    /// Key record with no name and no value
    pub fn key(&self) -> RecordResult<Record> {
        self.alloc(RecordKind::Key(KeyPayload::default()))
    }

    /// Named key; a name containing NUL is rejected before anything is allocated
    pub fn key_with(&self, name: impl Into<String>, value: Option<Record>) -> RecordResult<Record> {
        let name = validate_key_name(name.into())?;
        self.alloc(RecordKind::Key(KeyPayload {
            name: Some(name),
            value: value.map(Box::new),
        }))
    }

    pub fn hash_set(&self) -> RecordResult<Record> {
        self.alloc(RecordKind::HashSet(HashMap::default()))
    }

    /// Wrap a borrowed store handle; dropping the record closes it
    pub fn key_handler(&self, handle: Box<dyn KeyHandle>) -> RecordResult<Record> {
        self.alloc(RecordKind::KeyHandler(Some(handle)))
    }

    /// Foreign object wrapper
    ///
    /// The wrapper node always comes from the native strategy; only the payload
    /// belongs to the foreign runtime.
    pub fn foreign_object(&self, object: Option<ForeignRef>) -> RecordResult<Record> {
        let kind = RecordKind::ForeignObject(object);
        self.native.allocate(kind.record_type())?;
        Ok(Record::from_parts(kind, self.native.clone()))
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(RecordConfig::default())
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("profile", &self.profile())
            .field("foreign_runtime", &self.foreign.as_ref().map(|rt| rt.name().to_string()))
            .field("live_native_records", &self.native.stats().live_nodes())
            .finish()
    }
}
