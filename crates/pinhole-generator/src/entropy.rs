use pinhole_core::{Error, Result};
use rand::rngs::OsRng;
use rand::TryRngCore;

/// A source of cryptographically secure random bytes.
pub trait EntropySource: Send + Sync {
    /// Fills `dest` with fresh random bytes.
    ///
    /// May block briefly while the underlying source gathers entropy.
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// Entropy read from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::Entropy(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_fills_buffer() {
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];
        OsEntropy.fill(&mut first).unwrap();
        OsEntropy.fill(&mut second).unwrap();
        assert_ne!(first, second);
    }
}
