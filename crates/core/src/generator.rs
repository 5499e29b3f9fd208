//! Attribute generation: token id in, [`Attributes`] out.
//!
//! Pure function of the digit string. The order of draws from each seed
//! stream below is fixed; changing it changes every koi ever minted.

use crate::attributes::Attributes;
use crate::error::EngineError;
use crate::layer::{Category, ColoredLayer};
use crate::prng::Xorshift64;
use crate::token::TokenId;
use crate::variant::{Variant, VariantKind};
use log::trace;

/// Exclusive bound of the per-category pick seeds and the color seeds.
const SUB_SEED_BOUND: usize = 255;

/// Generates the attributes of the koi identified by a decimal token id.
///
/// Returns `EngineError::InvalidTokenId` for empty, non-decimal or
/// out-of-range ids.
pub fn generate(token_id: &str) -> Result<Attributes, EngineError> {
    generate_for(&TokenId::parse(token_id)?)
}

/// Generates attributes for an already validated token id.
pub fn generate_for(token_id: &TokenId) -> Result<Attributes, EngineError> {
    let mut streams = token_id.seed_streams();

    let kind = VariantKind::ALL[streams.variant.next_usize(VariantKind::ALL.len())];
    let variant = Variant::new(kind, streams.variant.next_int())?;

    // counts and picks come from separate streams; only per-stream order matters
    let [body_layers, head_layers, fin_layers] = Category::ALL.map(|category| {
        let (min, max) = variant.layer_count_range(category);
        let count = layer_count(min, max, &mut streams.counts);
        let seed = streams.layers.next_usize(SUB_SEED_BOUND) as u64;
        pick_layers(&variant.candidates(category), count, seed)
    });

    let body_seed = streams.colors.next_usize(SUB_SEED_BOUND) as u64;
    let fin_seed = streams.colors.next_usize(SUB_SEED_BOUND) as u64;

    trace!(
        "token {token_id}: {kind} with {}/{}/{} patterns",
        body_layers.len(),
        head_layers.len(),
        fin_layers.len()
    );

    Ok(Attributes {
        variant: kind,
        body_layers,
        head_layers,
        fin_layers,
        body_color: variant.body_color(body_seed)?,
        fin_color: variant.fin_background_color(fin_seed),
        primary_color: variant.primary_color(),
    })
}

/// Draws a pattern count in `[min, max)`, or exactly `max` when the bounds
/// are equal.
///
/// The upper bound is exclusive; minted koi depend on it.
fn layer_count(min: usize, max: usize, rng: &mut Xorshift64) -> usize {
    if min >= max {
        return max;
    }
    rng.next_usize(max - min) + min
}

/// Picks `count` layers from `pool` with replacement, using a generator
/// seeded from `seed`.
fn pick_layers(pool: &[ColoredLayer], count: usize, seed: u64) -> Vec<ColoredLayer> {
    if count == 0 || pool.is_empty() {
        return Vec::new();
    }
    let mut rng = Xorshift64::new(seed);
    (0..count)
        .map(|_| pool[rng.next_usize(pool.len())])
        .collect()
}
