use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use pinhole_core::store::Result;
use pinhole_core::{ExistenceCheck, Identifier, Scope, StorageError, UniqueStore};
use tracing::debug;

/// In-memory implementation of [`UniqueStore`] using DashMap.
///
/// Values are kept in one DashSet per scope. Both maps shard their locks,
/// so claims in different buckets don't block each other. Each claim is a
/// single atomic insert, which makes it the uniqueness constraint for
/// `(scope, value)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    claimed: DashMap<Scope, DashSet<Identifier>>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            claimed: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with room for `capacity` scopes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            claimed: DashMap::with_capacity(capacity),
        }
    }

    /// Number of claimed values across all scopes.
    pub fn len(&self) -> usize {
        self.claimed.iter().map(|values| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.iter().all(|values| values.is_empty())
    }
}

#[async_trait]
impl ExistenceCheck for InMemoryStore {
    async fn exists(&self, scope: &Scope, value: &Identifier) -> Result<bool> {
        Ok(self
            .claimed
            .get(scope)
            .is_some_and(|values| values.contains(value)))
    }
}

#[async_trait]
impl UniqueStore for InMemoryStore {
    async fn claim(&self, scope: &Scope, value: &Identifier) -> Result<()> {
        let inserted = self
            .claimed
            .entry(scope.clone())
            .or_default()
            .insert(value.clone());

        if !inserted {
            return Err(StorageError::Conflict(format!("{}={}", scope, value)));
        }

        debug!(scope = %scope, value = %value, "claimed identifier");
        Ok(())
    }

    async fn release(&self, scope: &Scope, value: &Identifier) -> Result<bool> {
        let released = self
            .claimed
            .get(scope)
            .is_some_and(|values| values.remove(value).is_some());
        if released {
            debug!(scope = %scope, value = %value, "released identifier");
        }
        Ok(released)
    }
}
