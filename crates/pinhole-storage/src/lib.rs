//! Storage backends for scoped identifier uniqueness.

pub mod memory;

pub use memory::InMemoryStore;
pub use pinhole_core::{ExistenceCheck, Scope, StorageError, UniqueStore};
