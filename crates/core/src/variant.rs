//! The fixed catalog of koi varieties.
//!
//! Each [`Variant`] carries the palette it derived from a single seed, so all
//! of one koi's patterns share a hue family. The catalog order in
//! [`VariantKind::ALL`] is part of the output contract: reordering it changes
//! which koi every token id produces.

use crate::color::Rgb8;
use crate::color_range::{pick_among, BLACK, ORANGE, RED, WHITE, YELLOW};
use crate::error::EngineError;
use crate::layer::{numbered, Category, ColoredLayer, LayerName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity of a koi variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// White body, red patterns.
    Kohaku,
    /// Red and black patterns over a red, orange or white body.
    Showa,
    /// Black patterns over a white, orange or red body.
    Utsuri,
    /// A single solid color, no patterns.
    Monochrome,
    /// White body, black patterns, red head.
    Shigure,
}

impl VariantKind {
    /// Catalog in selection order.
    pub const ALL: [VariantKind; 5] = [
        VariantKind::Kohaku,
        VariantKind::Showa,
        VariantKind::Utsuri,
        VariantKind::Monochrome,
        VariantKind::Shigure,
    ];

    /// Lowercase name, as used in metadata and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::Kohaku => "kohaku",
            VariantKind::Showa => "showa",
            VariantKind::Utsuri => "utsuri",
            VariantKind::Monochrome => "monochrome",
            VariantKind::Shigure => "shigure",
        }
    }

    /// Looks a variant up by its lowercase name.
    pub fn from_name(name: &str) -> Option<VariantKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A koi variety with its seed-derived palette resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Kohaku { color: Rgb8 },
    Showa { red: Rgb8, black: Rgb8, base: Rgb8 },
    Utsuri { color: Rgb8 },
    Monochrome { color: Rgb8 },
    Shigure { black: Rgb8, red: Rgb8 },
}

impl Variant {
    /// Resolves the palette of `kind` from one seed.
    pub fn new(kind: VariantKind, seed: u64) -> Result<Self, EngineError> {
        Ok(match kind {
            VariantKind::Kohaku => Variant::Kohaku {
                color: RED.apply(seed),
            },
            VariantKind::Showa => Variant::Showa {
                red: RED.apply(seed),
                black: BLACK.apply(seed),
                base: pick_among(seed, &[RED, ORANGE, WHITE])?,
            },
            VariantKind::Utsuri => Variant::Utsuri {
                color: BLACK.apply(seed),
            },
            VariantKind::Monochrome => Variant::Monochrome {
                color: pick_among(seed, &[WHITE, ORANGE, RED, YELLOW])?,
            },
            VariantKind::Shigure => Variant::Shigure {
                black: BLACK.apply(seed),
                red: RED.apply(seed),
            },
        })
    }

    /// The kind this variant was resolved from.
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Kohaku { .. } => VariantKind::Kohaku,
            Variant::Showa { .. } => VariantKind::Showa,
            Variant::Utsuri { .. } => VariantKind::Utsuri,
            Variant::Monochrome { .. } => VariantKind::Monochrome,
            Variant::Shigure { .. } => VariantKind::Shigure,
        }
    }

    /// `(min, max)` bounds on the number of pattern layers for `category`.
    ///
    /// Counts are drawn from `min..max`; `min >= max` always yields `max`.
    pub fn layer_count_range(&self, category: Category) -> (usize, usize) {
        match (self, category) {
            (Variant::Monochrome { .. }, _) => (0, 0),
            (Variant::Shigure { .. }, Category::Body) => (0, 2),
            (Variant::Shigure { .. }, Category::Head) => (1, 1),
            (Variant::Shigure { .. }, Category::Fin) => (0, 1),
            (_, Category::Body) => (1, 4),
            (_, Category::Head) => (0, 1),
            (_, Category::Fin) => (0, 1),
        }
    }

    /// Ordered candidate pool that pattern picks index into.
    pub fn candidates(&self, category: Category) -> Vec<ColoredLayer> {
        use Category::{Body, Fin, Head};
        match (*self, category) {
            (Variant::Kohaku { color }, Body) => numbered(Body, 1, 10, color),
            (Variant::Kohaku { color }, Head) => numbered(Head, 1, 5, color),
            (Variant::Kohaku { color }, Fin) => numbered(Fin, 1, 2, color),

            (Variant::Showa { red, black, .. }, Body) => {
                let mut pool = numbered(Body, 1, 8, red);
                pool.extend(numbered(Body, 1, 8, black));
                pool
            }
            (Variant::Showa { red, .. }, Head) => numbered(Head, 1, 5, red),
            (Variant::Showa { red, black, .. }, Fin) => {
                let mut pool = numbered(Fin, 1, 2, red);
                pool.extend(numbered(Fin, 1, 2, black));
                pool
            }

            (Variant::Utsuri { color }, Body) => numbered(Body, 1, 8, color),
            (Variant::Utsuri { color }, Head) => numbered(Head, 1, 5, color),
            (Variant::Utsuri { color }, Fin) => numbered(Fin, 1, 2, color),

            (Variant::Monochrome { .. }, _) => Vec::new(),

            (Variant::Shigure { black, .. }, Body) => numbered(Body, 1, 8, black),
            (Variant::Shigure { red, .. }, Head) => numbered(Head, 6, 7, red),
            (Variant::Shigure { black, .. }, Fin) => numbered(Fin, 1, 2, black),
        }
    }

    /// Body silhouette color for a seed drawn from the color stream.
    pub fn body_color(&self, seed: u64) -> Result<Rgb8, EngineError> {
        Ok(match *self {
            Variant::Kohaku { .. } | Variant::Shigure { .. } => WHITE.apply(seed),
            Variant::Showa { base, .. } => base,
            Variant::Utsuri { .. } => pick_among(seed, &[WHITE, ORANGE, RED])?,
            Variant::Monochrome { color } => color,
        })
    }

    /// Fin silhouette color for a seed drawn from the color stream.
    pub fn fin_background_color(&self, seed: u64) -> Rgb8 {
        match *self {
            Variant::Showa { base, .. } => base,
            Variant::Monochrome { color } => color,
            Variant::Kohaku { .. } | Variant::Utsuri { .. } | Variant::Shigure { .. } => {
                WHITE.apply(seed)
            }
        }
    }

    /// The color that best represents this koi (UI accents, thumbnails).
    pub fn primary_color(&self) -> Rgb8 {
        match *self {
            Variant::Kohaku { color }
            | Variant::Utsuri { color }
            | Variant::Monochrome { color } => color,
            Variant::Showa { red, .. } | Variant::Shigure { red, .. } => red,
        }
    }
}

/// Every layer name any variant can emit, plus the base layers.
///
/// An asset set must provide all of these before serving.
pub fn catalog_layer_names() -> BTreeSet<LayerName> {
    let mut names = BTreeSet::from([LayerName::Body, LayerName::Fin, LayerName::Outline]);
    for kind in VariantKind::ALL {
        // pool names do not depend on the palette seed
        let Ok(variant) = Variant::new(kind, 0) else {
            continue;
        };
        for category in Category::ALL {
            names.extend(variant.candidates(category).into_iter().map(|l| l.name));
        }
    }
    names
}
