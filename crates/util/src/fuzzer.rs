use rand::seq::SliceRandom;
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded random source for the test matrices.
///
/// Uses the xoshiro256** PRNG.  The seed is kept on the struct so a
/// failing run can print it and be replayed exactly.
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a fuzzer with an optional seed.
    ///
    /// Without a seed, a random one is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Deterministic convenience constructor from a single word.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]` (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random boolean, `true` with the given probability.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Random element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// In-place uniform shuffle.
    pub fn shuffle<T>(&mut self, elements: &mut [T]) {
        elements.shuffle(&mut self.rng);
    }

    /// Repeat a callback `times` times and collect the results.
    pub fn repeat<T, F>(&mut self, times: usize, mut callback: F) -> Vec<T>
    where
        F: FnMut(&mut Self) -> T,
    {
        (0..times).map(|_| callback(self)).collect()
    }
}
