//! Dependency sandboxes
//!
//! Cached, isolated environments holding a script's runtime packages.

mod cache;

pub use cache::{CacheEntry, DependencyCache};
