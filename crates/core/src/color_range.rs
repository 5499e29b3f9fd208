//! Per-channel color envelopes that turn a scalar seed into a color.
//!
//! Every channel maps independently as `lo + seed % (hi - lo)`, so a resolved
//! channel lies in `[lo, hi)` and never reaches `hi`. Rendered koi depend on
//! this exact arithmetic.

use crate::color::Rgb8;
use crate::error::EngineError;
use crate::prng::Xorshift64;

/// Half-open `[lo, hi)` envelopes for the red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    channels: [(u8, u8); 3],
}

/// Reds for kohaku patterns and showa/shigure accents.
pub const RED: ColorRange = ColorRange::new((145, 255), (0, 75), (0, 54));
/// Oranges; same envelope as [`YELLOW`].
pub const ORANGE: ColorRange = ColorRange::new((145, 255), (145, 255), (0, 75));
/// Off-whites used for most bodies and fins.
pub const WHITE: ColorRange = ColorRange::new((210, 255), (210, 255), (210, 255));
/// Near-blacks (sumi) for utsuri, showa and shigure patterns.
pub const BLACK: ColorRange = ColorRange::new((0, 54), (0, 54), (0, 54));
/// Yellows for monochrome bodies.
pub const YELLOW: ColorRange = ColorRange::new((145, 255), (145, 255), (0, 75));

impl ColorRange {
    /// Builds a range from `(lo, hi)` pairs for red, green and blue.
    pub const fn new(r: (u8, u8), g: (u8, u8), b: (u8, u8)) -> Self {
        Self { channels: [r, g, b] }
    }

    /// Maps `seed` into the envelope.
    ///
    /// A degenerate channel (`hi <= lo`) always yields `lo`.
    pub fn apply(&self, seed: u64) -> Rgb8 {
        let [r, g, b] = self.channels.map(|(lo, hi)| limit(lo, hi, seed));
        Rgb8 { r, g, b }
    }

    /// Whether every channel of `color` lies inside this envelope.
    pub fn contains(&self, color: Rgb8) -> bool {
        [color.r, color.g, color.b]
            .iter()
            .zip(self.channels.iter())
            .all(|(&c, &(lo, hi))| if hi <= lo { c == lo } else { c >= lo && c < hi })
    }
}

fn limit(lo: u8, hi: u8, seed: u64) -> u8 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo) as u64;
    lo + (seed % span) as u8
}

/// Picks one of `ranges` with a secondary generator seeded from `seed`, then
/// applies `seed` to the chosen range.
///
/// Lets a variant choose among plausible hue families while staying a pure
/// function of one seed.
pub fn pick_among(seed: u64, ranges: &[ColorRange]) -> Result<Rgb8, EngineError> {
    if ranges.is_empty() {
        return Err(EngineError::InvalidPalette(
            "pick_among requires at least 1 color range".to_string(),
        ));
    }
    let index = Xorshift64::new(seed).next_usize(ranges.len());
    Ok(ranges[index].apply(seed))
}
