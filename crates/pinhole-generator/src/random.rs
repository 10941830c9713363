use crate::entropy::{EntropySource, OsEntropy};
use crate::Generator;
use pinhole_core::{Alphabet, Error, GenerationRequest, Identifier, Result};
use tracing::trace;

/// Alphabet size served by the masking fast path. 256 is a multiple of it,
/// so `byte & 63` is uniform and no byte is ever rejected.
const FAST_PATH_SIZE: usize = 64;
const FAST_PATH_MASK: u8 = 63;

/// Batch size headroom over the expected byte count, as tenths (1.6).
const STEP_FACTOR_TENTHS: u128 = 16;

/// Draws a `length`-symbol identifier from `alphabet` without filters.
pub(crate) fn draw<E: EntropySource + ?Sized>(
    entropy: &E,
    length: usize,
    alphabet: &Alphabet,
) -> Result<Identifier> {
    if length == 0 {
        return Err(Error::Configuration("length must be positive".to_string()));
    }

    let symbols = alphabet.symbols();
    let value: String = match symbols.len() {
        0 => return Err(Error::Configuration("alphabet cannot be empty".to_string())),
        // Nothing to choose between; don't spend entropy on it.
        1 => symbols[0].to_string().repeat(length),
        FAST_PATH_SIZE => draw_masked(entropy, length, symbols)?,
        _ => draw_rejecting(entropy, length, symbols)?,
    };

    trace!(length, alphabet_size = symbols.len(), "drew identifier");
    Ok(Identifier::new_unchecked(value))
}

fn draw_masked<E: EntropySource + ?Sized>(
    entropy: &E,
    length: usize,
    symbols: &[char],
) -> Result<String> {
    let mut bytes = vec![0u8; length];
    entropy.fill(&mut bytes)?;

    Ok(bytes
        .iter()
        .map(|byte| symbols[usize::from(byte & FAST_PATH_MASK)])
        .collect())
}

fn draw_rejecting<E: EntropySource + ?Sized>(
    entropy: &E,
    length: usize,
    symbols: &[char],
) -> Result<String> {
    let size = symbols.len();
    // Smallest all-ones mask covering [0, size). Rejects fewer than half the bytes.
    let mask = size.next_power_of_two() - 1;
    let step = batch_size(mask, length, size);

    let mut out = String::with_capacity(length);
    let mut accepted = 0;
    let mut bytes = vec![0u8; step];

    loop {
        entropy.fill(&mut bytes)?;
        for byte in &bytes {
            let candidate = usize::from(*byte) & mask;
            if candidate >= size {
                continue;
            }
            out.push(symbols[candidate]);
            accepted += 1;
            if accepted == length {
                return Ok(out);
            }
        }
    }
}

/// `ceil(1.6 * mask * length / size)`, in integer arithmetic.
fn batch_size(mask: usize, length: usize, size: usize) -> usize {
    let numerator = STEP_FACTOR_TENTHS * mask as u128 * length as u128;
    let denominator = 10 * size as u128;
    let step = numerator.div_ceil(denominator);
    usize::try_from(step).unwrap_or(usize::MAX).max(1)
}

/// Generates identifiers for a fixed [`GenerationRequest`].
///
/// The generator is stateless apart from its entropy source and can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct IdGenerator<E: EntropySource = OsEntropy> {
    request: GenerationRequest,
    // Request alphabet minus excluded symbols.
    usable: Alphabet,
    entropy: E,
}

impl IdGenerator<OsEntropy> {
    /// Creates a generator backed by operating system entropy.
    pub fn new(request: GenerationRequest) -> Result<Self> {
        Self::with_entropy(request, OsEntropy)
    }
}

impl Default for IdGenerator<OsEntropy> {
    fn default() -> Self {
        let request = GenerationRequest::default();
        Self {
            usable: request.alphabet.clone(),
            request,
            entropy: OsEntropy,
        }
    }
}

impl<E: EntropySource> IdGenerator<E> {
    /// Creates a generator drawing bytes from `entropy`.
    ///
    /// Fails if the request can never be satisfied.
    pub fn with_entropy(request: GenerationRequest, entropy: E) -> Result<Self> {
        request.validate()?;
        let usable = request.usable_alphabet()?;
        Ok(Self {
            request,
            usable,
            entropy,
        })
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Draws an identifier ignoring the configured request.
    pub fn generate_raw(&self, length: usize, alphabet: &Alphabet) -> Result<Identifier> {
        draw(&self.entropy, length, alphabet)
    }

    /// Draws the next identifier for the configured request.
    ///
    /// Excluded symbols are never drawn. A candidate whose first character
    /// is outside the required class is discarded whole and redrawn.
    pub fn next_id(&self) -> Result<Identifier> {
        let filters = &self.request.filters;

        loop {
            let candidate = draw(&self.entropy, self.request.length, &self.usable)?;
            if filters.accepts(candidate.as_str()) {
                return Ok(candidate);
            }
            trace!(candidate = %candidate, "candidate rejected by filters");
        }
    }
}

impl<E: EntropySource + 'static> Generator for IdGenerator<E> {
    fn generate(&self) -> Result<Identifier> {
        self.next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::test_entropy::ScriptedEntropy;
    use pinhole_core::{CharClass, Filters};

    fn digits() -> Alphabet {
        Alphabet::new("0123456789").unwrap()
    }

    #[test]
    fn zero_length_is_rejected() {
        let entropy = ScriptedEntropy::new([0u8; 0]);
        let err = draw(&entropy, 0, &Alphabet::slug()).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration("length must be positive".to_string())
        );
        assert!(entropy.requests().is_empty());
    }

    #[test]
    fn single_symbol_consumes_no_entropy() {
        let entropy = ScriptedEntropy::new([0u8; 0]);
        let id = draw(&entropy, 5, &Alphabet::new("A").unwrap()).unwrap();
        assert_eq!(id.as_str(), "AAAAA");
        assert!(entropy.requests().is_empty());
    }

    #[test]
    fn fast_path_masks_each_byte() {
        let entropy = ScriptedEntropy::new([0, 63, 64, 255, 130]);
        let id = draw(&entropy, 5, &Alphabet::url_safe()).unwrap();
        // 0 -> '0', 63 -> '_', 64 & 63 = 0, 255 & 63 = 63, 130 & 63 = 2
        assert_eq!(id.as_str(), "0_0_2");
        assert_eq!(entropy.requests(), vec![5]);
        assert_eq!(entropy.remaining(), 0);
    }

    #[test]
    fn rejection_path_skips_out_of_range_bytes() {
        // size 10, mask 15, step = ceil(1.6 * 15 * 3 / 10) = 8
        let entropy = ScriptedEntropy::new([10, 3, 15, 7, 200, 1, 1, 1]);
        let id = draw(&entropy, 3, &digits()).unwrap();
        // 10 and 15 are rejected, 200 & 15 = 8
        assert_eq!(id.as_str(), "378");
        assert_eq!(entropy.requests(), vec![8]);
    }

    #[test]
    fn rejection_path_fetches_another_batch() {
        // size 10, mask 15, step = ceil(1.6 * 15 * 2 / 10) = 5
        let entropy = ScriptedEntropy::new([10, 11, 12, 13, 14, 1, 2, 0, 0, 0]);
        let id = draw(&entropy, 2, &digits()).unwrap();
        assert_eq!(id.as_str(), "12");
        assert_eq!(entropy.requests(), vec![5, 5]);
    }

    #[test]
    fn entropy_failure_propagates() {
        let entropy = ScriptedEntropy::new([1, 2]);
        let err = draw(&entropy, 3, &digits()).unwrap_err();
        assert!(matches!(err, Error::Entropy(_)));
    }

    #[test]
    fn batch_size_matches_formula() {
        assert_eq!(batch_size(31, 18, 26), 35); // ceil(34.33)
        assert_eq!(batch_size(63, 18, 36), 51); // ceil(50.4)
        assert_eq!(batch_size(15, 5, 10), 12); // exactly 12
        assert_eq!(batch_size(1, 1, 2), 1); // ceil(0.8)
    }

    #[test]
    fn power_of_two_sizes_never_reject() {
        let alphabet = Alphabet::new("abcd").unwrap();
        // mask 3, step = ceil(1.6 * 3 * 4 / 4) = 5
        let entropy = ScriptedEntropy::new([0, 1, 2, 3, 7]);
        let id = draw(&entropy, 4, &alphabet).unwrap();
        assert_eq!(id.as_str(), "abcd");
        assert_eq!(entropy.requests(), vec![5]);
    }

    #[test]
    fn first_char_filter_regenerates_whole_candidate() {
        let request = GenerationRequest::builder()
            .length(2)
            .alphabet(Alphabet::new("a1").unwrap())
            .filters(Filters::builder().first_char(CharClass::Alphabetic).build())
            .build();
        // size 2, mask 1, step = ceil(1.6 * 1 * 2 / 2) = 2
        let entropy = ScriptedEntropy::new([1, 0, 0, 1]);
        let generator = IdGenerator::with_entropy(request, entropy).unwrap();

        let id = generator.next_id().unwrap();
        assert_eq!(id.as_str(), "a1");
        assert_eq!(generator.entropy.requests(), vec![2, 2]);
    }

    #[test]
    fn excluded_symbols_are_never_drawn() {
        let request = GenerationRequest::builder()
            .length(2)
            .alphabet(Alphabet::new("abc").unwrap())
            .filters(Filters::builder().excluded(vec!['c']).build())
            .build();
        // drawn from "ab": size 2, mask 1, step = ceil(1.6 * 1 * 2 / 2) = 2
        let entropy = ScriptedEntropy::new([1, 0]);
        let generator = IdGenerator::with_entropy(request, entropy).unwrap();

        assert_eq!(generator.next_id().unwrap().as_str(), "ba");
        assert_eq!(generator.entropy.requests(), vec![2]);
    }

    #[test]
    fn exclusions_leaving_one_symbol_consume_no_entropy() {
        let request = GenerationRequest::builder()
            .length(3)
            .alphabet(Alphabet::new("ab").unwrap())
            .filters(Filters::builder().excluded(vec!['b']).build())
            .build();
        let generator = IdGenerator::with_entropy(request, ScriptedEntropy::new([0u8; 0])).unwrap();

        assert_eq!(generator.next_id().unwrap().as_str(), "aaa");
        assert!(generator.entropy.requests().is_empty());
    }

    #[test]
    fn long_identifiers_with_exclusions() {
        let excluded = vec!['0', 'o', '1', 'l'];
        let request = GenerationRequest::builder()
            .length(200)
            .filters(Filters::builder().excluded(excluded.clone()).build())
            .build();
        let generator = IdGenerator::new(request).unwrap();

        for _ in 0..100 {
            let id = generator.next_id().unwrap();
            assert_eq!(id.len(), 200);
            assert!(!id.as_str().chars().any(|c| excluded.contains(&c)));
        }
    }

    #[test]
    fn invalid_request_is_rejected_up_front() {
        let request = GenerationRequest::builder().length(0).build();
        assert!(matches!(
            IdGenerator::new(request),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn generate_raw_ignores_request() {
        let generator = IdGenerator::default();
        let id = generator.generate_raw(4, &digits()).unwrap();
        assert_eq!(id.len(), 4);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn default_generator_produces_default_ids() {
        let id = IdGenerator::default().generate().unwrap();
        assert_eq!(id.len(), 18);
        assert!(id.as_str().chars().all(|c| Alphabet::slug().contains(c)));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IdGenerator>();
    }
}
