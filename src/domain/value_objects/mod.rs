//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cache_key;
mod capability_kind;
mod environment;
mod script_name;

pub use cache_key::CacheKey;
pub use capability_kind::CapabilityKind;
pub use environment::{Environment, EnvironmentOverlay, PATH_VAR};
pub use script_name::ScriptName;
