/*!
 * Memory Module
 * Allocation strategies and the execution context that binds them
 */

pub mod context;
pub mod stats;
pub mod strategy;
pub mod traits;

// Re-export for convenience
pub use context::ExecutionContext;
pub use stats::{AllocationSnapshot, AllocationStats};
pub use strategy::{ForeignManagedStrategy, NativeStrategy};
pub use traits::AllocationStrategy;
