//! Deterministic PRNG backing every seed stream.
//!
//! Attribute generation must reproduce the same creature for the same token
//! id on every platform and across restarts, so the generator is pure integer
//! arithmetic with no global state.

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point; token chunks of
/// all zeros are legal, so this case is reachable.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns the next value as a non-negative 63-bit integer.
    ///
    /// Used wherever a draw is handed on as a seed (variant palettes), so the
    /// value round-trips through signed storage unchanged.
    pub fn next_int(&mut self) -> u64 {
        self.next_u64() >> 1
    }

    /// Returns a value in [0, max) by modulo reduction.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }
}
