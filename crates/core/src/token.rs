//! Token id validation and seed-stream derivation.
//!
//! A token id is the decimal representation of a 256-bit unsigned integer.
//! Its digit string is split into four contiguous chunks, each seeding one
//! independent [`Xorshift64`] stream.

use crate::error::EngineError;
use crate::prng::Xorshift64;

/// 2^256 - 1, the largest token id.
const MAX_TOKEN_ID: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// A validated decimal token id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenId(String);

impl TokenId {
    /// Validates a decimal token id.
    ///
    /// Leading zeros are kept; they change the chunking and therefore the
    /// koi, so callers must normalize before calling in.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        if raw.is_empty() {
            return Err(EngineError::InvalidTokenId("empty token id".to_string()));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::InvalidTokenId(format!(
                "'{raw}' is not a decimal integer"
            )));
        }
        if exceeds_u256(raw) {
            return Err(EngineError::InvalidTokenId(format!(
                "'{raw}' exceeds 256 bits"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// The validated digit string, leading zeros included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the digits into four chunks and parses each into a seed.
    ///
    /// Chunk length is `len / 4`; the last chunk takes the remainder. Empty
    /// chunks (ids shorter than four digits) seed 0 and chunks above
    /// `i64::MAX` saturate to it.
    pub fn chunk_seeds(&self) -> [u64; 4] {
        let digits = self.0.as_str();
        let chunk = digits.len() / 4;
        let bounds = [(0, chunk), (chunk, chunk * 2), (chunk * 2, chunk * 3)];
        let mut seeds = [0u64; 4];
        for (seed, (start, end)) in seeds.iter_mut().zip(bounds) {
            *seed = parse_chunk(&digits[start..end]);
        }
        seeds[3] = parse_chunk(&digits[chunk * 3..]);
        seeds
    }

    /// Builds the four seed streams for one generation call.
    pub fn seed_streams(&self) -> SeedStreams {
        let [s1, s2, s3, s4] = self.chunk_seeds().map(Xorshift64::new);
        SeedStreams {
            variant: s1,
            counts: s2,
            layers: s3,
            colors: s4,
        }
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TokenId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The four independent generators derived from one token id.
///
/// Created fresh per call and consumed by it; never shared.
#[derive(Debug)]
pub struct SeedStreams {
    /// S1: variant selection and the variant's palette seed.
    pub variant: Xorshift64,
    /// S2: per-category layer counts.
    pub counts: Xorshift64,
    /// S3: per-category layer picks.
    pub layers: Xorshift64,
    /// S4: body and fin background colors.
    pub colors: Xorshift64,
}

fn parse_chunk(digits: &str) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    // digits are pre-validated, so overflow is the only failure
    digits.parse::<i64>().unwrap_or(i64::MAX) as u64
}

fn exceeds_u256(digits: &str) -> bool {
    let significant = digits.trim_start_matches('0');
    match significant.len().cmp(&MAX_TOKEN_ID.len()) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => significant > MAX_TOKEN_ID,
    }
}
