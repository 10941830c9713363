//! Random identifier generation.
//!
//! Identifiers are drawn symbol by symbol from an [`Alphabet`] using
//! cryptographically secure bytes. A 64-symbol alphabet takes a masking
//! fast path; every other size uses rejection sampling, so no symbol is
//! favoured by the byte-to-index mapping.

pub mod entropy;
mod random;

pub use entropy::{EntropySource, OsEntropy};
pub use random::IdGenerator;

use pinhole_core::{Alphabet, Identifier, Result};

/// Trait for generating identifiers.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness within a scope is the collision resolver's job.
pub trait Generator: Send + Sync + 'static {
    /// Generates a fresh identifier candidate.
    fn generate(&self) -> Result<Identifier>;
}

/// Generates a `length`-symbol identifier from `alphabet` using OS entropy.
pub fn generate(length: usize, alphabet: &Alphabet) -> Result<Identifier> {
    random::draw(&OsEntropy, length, alphabet)
}

/// Like [`generate`], building the alphabet from `symbols` first.
pub fn generate_from(length: usize, symbols: &str) -> Result<Identifier> {
    let alphabet = Alphabet::new(symbols)?;
    generate(length, &alphabet)
}
