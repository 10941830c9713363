use crate::error::StorageError;
use crate::identifier::Identifier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The namespace an identifier must be unique in, e.g. a column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub table: String,
    pub column: String,
}

impl Scope {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Returns the scope key, `table.column`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Read access a collision resolver needs from a persistence backend.
#[async_trait]
pub trait ExistenceCheck: Send + Sync + 'static {
    /// Checks whether `value` is already taken within `scope`.
    async fn exists(&self, scope: &Scope, value: &Identifier) -> Result<bool>;
}

/// A backend that enforces uniqueness of `(scope, value)` at write time.
///
/// The existence check alone is racy: two callers can both observe a value
/// as free. `claim` is the write that settles the race.
#[async_trait]
pub trait UniqueStore: ExistenceCheck {
    /// Records `value` as taken within `scope`.
    /// Returns `Err(Conflict)` if it already is.
    async fn claim(&self, scope: &Scope, value: &Identifier) -> Result<()>;

    /// Frees `value` within `scope`.
    /// Returns `true` if it was taken.
    async fn release(&self, scope: &Scope, value: &Identifier) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_key() {
        let scope = Scope::new("users", "public_id");
        assert_eq!(scope.key(), "users.public_id");
        assert_eq!(scope.to_string(), "users.public_id");
    }
}
