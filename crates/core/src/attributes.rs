//! Materialized traits of one koi.

use crate::color::Rgb8;
use crate::layer::{Category, ColoredLayer};
use crate::variant::VariantKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Concrete, immutable result of generating one token id.
///
/// Holds everything the compositor needs and everything metadata consumers
/// display, so it can be cached or serialized independently of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub variant: VariantKind,
    pub body_layers: Vec<ColoredLayer>,
    pub head_layers: Vec<ColoredLayer>,
    pub fin_layers: Vec<ColoredLayer>,
    pub body_color: Rgb8,
    pub fin_color: Rgb8,
    pub primary_color: Rgb8,
}

impl Attributes {
    /// Pattern layers of one category.
    pub fn layers(&self, category: Category) -> &[ColoredLayer] {
        match category {
            Category::Body => &self.body_layers,
            Category::Head => &self.head_layers,
            Category::Fin => &self.fin_layers,
        }
    }

    /// All pattern layers in draw order: body, head, fin.
    pub fn pattern_layers(&self) -> impl Iterator<Item = &ColoredLayer> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.layers(category).iter())
    }

    /// Total number of pattern layers across categories.
    pub fn pattern_quantity(&self) -> usize {
        self.body_layers.len() + self.head_layers.len() + self.fin_layers.len()
    }

    /// Public trait summary, as served to metadata and marketplace clients.
    pub fn metadata(&self) -> Value {
        json!({
            "species": self.variant,
            "primaryColor": self.primary_color,
            "bodyColor": self.body_color,
            "finColor": self.fin_color,
            "patternQuantity": self.pattern_quantity(),
            "isDark": self.primary_color.is_dark(),
        })
    }
}
