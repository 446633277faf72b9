//! File-backed storage primitives.

pub mod atomic_file;
pub mod key_value;

pub use atomic_file::{AtomicFile, FileFormat};
pub use key_value::KeyValueStore;
