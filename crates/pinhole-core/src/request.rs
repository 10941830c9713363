use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use typed_builder::TypedBuilder;

/// Identifier length used when none is configured.
pub const DEFAULT_LENGTH: usize = 18;

/// A character class the first symbol of an identifier can be required to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Alphabetic,
    Numeric,
    Lowercase,
    Uppercase,
}

impl CharClass {
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Alphabetic => c.is_alphabetic(),
            CharClass::Numeric => c.is_numeric(),
            CharClass::Lowercase => c.is_lowercase(),
            CharClass::Uppercase => c.is_uppercase(),
        }
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharClass::Alphabetic => write!(f, "alphabetic"),
            CharClass::Numeric => write!(f, "numeric"),
            CharClass::Lowercase => write!(f, "lowercase"),
            CharClass::Uppercase => write!(f, "uppercase"),
        }
    }
}

/// Post-generation constraints.
///
/// A candidate that violates a filter is discarded whole and regenerated.
/// Filters never patch individual characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct Filters {
    /// Required class of the first character.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub first_char: Option<CharClass>,
    /// Characters that never appear in generated output.
    #[builder(default, setter(into))]
    #[serde(default)]
    pub excluded: Vec<char>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.first_char.is_none() && self.excluded.is_empty()
    }

    /// Returns whether `candidate` satisfies every filter.
    ///
    /// A rejected candidate must be regenerated whole.
    pub fn accepts(&self, candidate: &str) -> bool {
        if let Some(class) = self.first_char {
            if !candidate.chars().next().is_some_and(|c| class.matches(c)) {
                return false;
            }
        }

        !candidate.chars().any(|c| self.excluded.contains(&c))
    }
}

/// Parameters for one identifier generation.
///
/// Requests are plain immutable values; nothing is shared between calls.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Number of symbols in each identifier.
    #[builder(default = DEFAULT_LENGTH)]
    #[serde(default = "default_length")]
    pub length: usize,
    #[builder(default)]
    #[serde(default)]
    pub alphabet: Alphabet,
    #[builder(default)]
    #[serde(default)]
    pub filters: Filters,
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GenerationRequest {
    /// Checks that the request can ever be satisfied.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(Error::configuration("length must be positive"));
        }

        let usable = self.usable_alphabet()?;

        if let Some(class) = self.filters.first_char {
            if !usable.symbols().iter().any(|c| class.matches(*c)) {
                return Err(Error::configuration(format!(
                    "no usable symbol in the alphabet is {}",
                    class
                )));
            }
        }

        Ok(())
    }

    /// The alphabet with excluded characters removed.
    ///
    /// Drawing uniformly from it is the same as drawing from the full
    /// alphabet and discarding candidates that contain an excluded symbol,
    /// without the discards.
    pub fn usable_alphabet(&self) -> Result<Alphabet> {
        self.alphabet.without(&self.filters.excluded)
    }
}
