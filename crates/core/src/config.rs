//! Engine configuration.
//!
//! Values come from a JSON object. Missing keys or values of the wrong type
//! fall back to defaults, so a partial config file is always usable.

use crate::error::EngineError;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const DEFAULT_ASSET_DIR: &str = "images/koi";
/// Sizes served by the image, thumbnail and in-app endpoints.
const DEFAULT_WARM_SIZES: [u32; 3] = [200, 350, 1024];
const DEFAULT_SIZE: u32 = 1024;
const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Largest edge length, in pixels, that can be scaled, cached or rendered.
pub const MAX_SIZE: u32 = 4096;

/// Accepts `size` if it is non-zero and at most [`MAX_SIZE`].
///
/// Every scale and render checks this before allocating.
pub fn check_size(size: u32) -> Result<u32, EngineError> {
    if size == 0 || size > MAX_SIZE {
        return Err(EngineError::InvalidDimensions);
    }
    Ok(size)
}

/// Runtime settings for asset loading, cache warming and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Directory holding one `<layer-name>.png` mask per layer.
    pub asset_dir: PathBuf,
    /// Sizes warmed into the mask cache at startup.
    pub warm_sizes: Vec<u32>,
    /// Colorization worker threads; 0 lets rayon pick.
    pub worker_threads: usize,
    pub default_size: u32,
    pub thumbnail_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            warm_sizes: DEFAULT_WARM_SIZES.to_vec(),
            worker_threads: 0,
            default_size: DEFAULT_SIZE,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl EngineConfig {
    /// Extracts settings from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            asset_dir: PathBuf::from(param_string(params, "asset_dir", DEFAULT_ASSET_DIR)),
            warm_sizes: param_u32_list(params, "warm_sizes").unwrap_or(defaults.warm_sizes),
            worker_threads: param_usize(params, "worker_threads", defaults.worker_threads),
            default_size: param_u32(params, "default_size", DEFAULT_SIZE),
            thumbnail_size: param_u32(params, "thumbnail_size", DEFAULT_THUMBNAIL_SIZE),
        }
    }

    /// Reads a JSON config file.
    ///
    /// Unlike [`EngineConfig::from_json`], a missing file or malformed JSON
    /// is an error: an operator pointed at this file on purpose.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        let params: Value = serde_json::from_str(&text)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        if !params.is_object() {
            return Err(EngineError::Config(format!(
                "{}: expected a JSON object",
                path.display()
            )));
        }
        Ok(Self::from_json(&params))
    }
}

fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .and_then(|v| check_size(v).ok())
        .unwrap_or(default)
}

fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// A list of usable sizes; `None` if missing or if any entry is invalid.
fn param_u32_list(params: &Value, name: &str) -> Option<Vec<u32>> {
    params
        .get(name)?
        .as_array()?
        .iter()
        .map(|v| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(|n| check_size(n).ok())
        })
        .collect()
}
