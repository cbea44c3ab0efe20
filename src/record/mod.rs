/*!
 * Record Module
 *
 * The polymorphic value flowing between pipeline steps:
 * - `value`: the tagged union, scalar and string accessors
 * - `list`, `key`, `hash_set`: container variants owning their children
 * - `handle`: borrowed store handles
 * - `foreign`: payloads owned by an embedded runtime
 * - `lifecycle`: recursive dispose / release
 * - `codec`: binary wire format
 */

pub mod codec;
pub mod foreign;
pub mod handle;
mod hash_set;
mod key;
pub mod lifecycle;
mod list;
mod value;

pub(crate) use key::validate_key_name;
pub(crate) use value::{KeyPayload, RecordKind};

pub use codec::{deserialize_record, from_bytes, serialize_record, to_bytes};
pub use foreign::{ForeignRef, ForeignRuntime, SharedObjectRuntime};
pub use handle::KeyHandle;
pub use lifecycle::free_record;
pub use value::Record;
