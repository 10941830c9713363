use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// A generated identifier.
///
/// Identifiers are only produced by generators; they are never mutated.
/// Values up to 23 bytes are stored inline.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(SmolStr);

impl Identifier {
    /// Wraps an already generated value.
    ///
    /// Use this only for values produced by trusted sources (generators,
    /// or values read back from a store).
    pub fn new_unchecked(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in symbols, not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0.into()
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.into_string()
    }
}

impl std::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Identifier").field(&self.0).finish()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
