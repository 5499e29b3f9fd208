#![deny(unsafe_code)]
//! Core types for koi-engine.
//!
//! Turns a decimal token id into [`Attributes`]: four chunk-seeded
//! [`Xorshift64`] streams select a [`Variant`] from the fixed catalog, count
//! and pick its pattern layers, and resolve colors through [`ColorRange`]s.
//! Nothing here touches pixels; see `koi-engine-render` for compositing.

pub mod attributes;
pub mod color;
pub mod color_range;
pub mod config;
pub mod error;
pub mod generator;
pub mod layer;
pub mod prng;
pub mod token;
pub mod variant;

pub use attributes::Attributes;
pub use color::Rgb8;
pub use color_range::ColorRange;
pub use config::{check_size, EngineConfig, MAX_SIZE};
pub use error::EngineError;
pub use generator::{generate, generate_for};
pub use layer::{Category, ColoredLayer, LayerName};
pub use prng::Xorshift64;
pub use token::TokenId;
pub use variant::{catalog_layer_names, Variant, VariantKind};
