//! Layer names identifying raw mask artwork.
//!
//! Every mask file in the asset directory is named after exactly one
//! [`LayerName`]: the three base layers (`body`, `fin`, `outline`) and the
//! numbered pattern layers (`body_3`, `head_1`, `fin_2`, ...).

use crate::color::Rgb8;
use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pattern categories, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Body,
    Head,
    Fin,
}

impl Category {
    /// All categories in draw order.
    pub const ALL: [Category; 3] = [Category::Body, Category::Head, Category::Fin];

    /// Lowercase name, also the prefix of pattern layer names.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Body => "body",
            Category::Head => "head",
            Category::Fin => "fin",
        }
    }
}

/// Identifier of one raw mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerName {
    /// Body silhouette, painted with the body color.
    Body,
    /// Fin silhouette, painted with the fin background color.
    Fin,
    /// Top-most line art, painted as-is.
    Outline,
    /// A numbered pattern mask within a category.
    Pattern { category: Category, index: u8 },
}

impl LayerName {
    /// Pattern layer `index` of `category`.
    pub const fn pattern(category: Category, index: u8) -> Self {
        LayerName::Pattern { category, index }
    }

    /// Asset file name for this layer inside the asset directory.
    pub fn file_name(&self) -> String {
        format!("{self}.png")
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerName::Body => f.write_str("body"),
            LayerName::Fin => f.write_str("fin"),
            LayerName::Outline => f.write_str("outline"),
            LayerName::Pattern { category, index } => {
                write!(f, "{}_{index}", category.as_str())
            }
        }
    }
}

impl FromStr for LayerName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => return Ok(LayerName::Body),
            "fin" => return Ok(LayerName::Fin),
            "outline" => return Ok(LayerName::Outline),
            _ => {}
        }
        let unknown = || EngineError::UnknownAsset(s.to_string());
        let (prefix, index) = s.split_once('_').ok_or_else(unknown)?;
        let category = match prefix {
            "body" => Category::Body,
            "head" => Category::Head,
            "fin" => Category::Fin,
            _ => return Err(unknown()),
        };
        // patterns are numbered from 1 and written without leading zeros
        if index.is_empty()
            || index.starts_with('0')
            || !index.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(unknown());
        }
        let index = index.parse::<u8>().map_err(|_| unknown())?;
        Ok(LayerName::Pattern { category, index })
    }
}

impl Serialize for LayerName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LayerName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A pattern layer paired with the color it is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredLayer {
    pub name: LayerName,
    pub color: Rgb8,
}

impl ColoredLayer {
    /// Pairs a layer with the color it is painted in.
    pub fn new(name: LayerName, color: Rgb8) -> Self {
        Self { name, color }
    }
}

/// Builds `<category>_<lo>..=<category>_<hi>` all in one color.
pub(crate) fn numbered(category: Category, lo: u8, hi: u8, color: Rgb8) -> Vec<ColoredLayer> {
    (lo..=hi)
        .map(|i| ColoredLayer::new(LayerName::pattern(category, i), color))
        .collect()
}
