/*!
 * Core Module
 * Fundamental record types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod serialization;
pub mod types;

// Re-export for convenience
pub use config::RecordConfig;
pub use errors::*;
pub use types::*;
