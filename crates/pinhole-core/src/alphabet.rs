use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;

const SLUG_SYMBOLS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC_SYMBOLS: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const URL_SAFE_SYMBOLS: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Symbols are indexed by single random bytes.
pub const MAX_SIZE: usize = 256;

/// An ordered, duplicate-free set of symbols identifiers are drawn from.
///
/// Alphabets are immutable once built and cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Arc<[char]>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`, in order.
    ///
    /// Fails if `symbols` is empty, longer than [`MAX_SIZE`], or repeats a
    /// character. A repeated symbol would be drawn more often than the others.
    pub fn new(symbols: impl AsRef<str>) -> Result<Self> {
        let symbols: Vec<char> = symbols.as_ref().chars().collect();
        if symbols.is_empty() {
            return Err(Error::configuration("alphabet cannot be empty"));
        }

        if symbols.len() > MAX_SIZE {
            return Err(Error::configuration(format!(
                "alphabet cannot exceed {} symbols, got {}",
                MAX_SIZE,
                symbols.len()
            )));
        }

        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(Error::configuration(format!(
                    "alphabet contains duplicate symbol '{}'",
                    c
                )));
            }
        }

        Ok(Self {
            symbols: symbols.into(),
        })
    }

    /// Digits and lowercase letters (36 symbols). The default alphabet.
    pub fn slug() -> Self {
        Self::builtin(SLUG_SYMBOLS)
    }

    /// Digits, uppercase and lowercase letters (62 symbols).
    pub fn alphanumeric() -> Self {
        Self::builtin(ALPHANUMERIC_SYMBOLS)
    }

    /// Alphanumerics plus `-` and `_` (64 symbols), sized for the masking fast path.
    pub fn url_safe() -> Self {
        Self::builtin(URL_SAFE_SYMBOLS)
    }

    fn builtin(symbols: &str) -> Self {
        Self {
            symbols: symbols.chars().collect::<Vec<_>>().into(),
        }
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns the symbol at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Returns the alphabet left after removing `excluded`, in the same order.
    ///
    /// Fails if nothing is left.
    pub fn without(&self, excluded: &[char]) -> Result<Self> {
        if excluded.is_empty() {
            return Ok(self.clone());
        }

        let symbols: Vec<char> = self
            .symbols
            .iter()
            .copied()
            .filter(|c| !excluded.contains(c))
            .collect();

        if symbols.is_empty() {
            return Err(Error::configuration(
                "excluded characters cover the whole alphabet",
            ));
        }

        Ok(Self {
            symbols: symbols.into(),
        })
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::slug()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Alphabet {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Alphabet> for String {
    fn from(value: Alphabet) -> Self {
        value.to_string()
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet")
            .field("symbols", &self.to_string())
            .field("size", &self.size())
            .finish()
    }
}
