//! Content Store Implementations
//!
//! Concrete implementations of the ContentStore port.

mod local;
mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

/// Store paths are relative to the store root; a leading `/` is ignored
fn normalize_store_path(path: &str) -> &str {
    path.trim_start_matches('/')
}
