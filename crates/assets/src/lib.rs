#![deny(unsafe_code)]
//! Mask assets for koi-engine.
//!
//! [`AssetStore`] holds the full-resolution line-art masks loaded once at
//! startup; [`MaskCache`] memoizes them pre-scaled per output size.

pub mod cache;
pub mod store;

pub use cache::{MaskCache, WarmStats, SCALE_FILTER};
pub use store::AssetStore;
