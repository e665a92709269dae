//! File System Helpers
//!
//! Recursive copies used by the working directory capability and the
//! directory-backed content store.

mod tree;

pub use tree::{copy_file, copy_path, copy_tree};
