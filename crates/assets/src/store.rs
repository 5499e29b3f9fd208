//! Full-resolution mask artwork, loaded once at startup.
//!
//! The store is read-only after construction. Every load problem surfaces
//! here as [`EngineError::AssetLoadFailure`] so a server can refuse to start
//! instead of failing individual requests later.

use image::RgbaImage;
use koi_engine_core::{catalog_layer_names, EngineError, LayerName};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Read-only mapping from layer name to its full-resolution RGBA mask.
#[derive(Debug, Default)]
pub struct AssetStore {
    masks: HashMap<LayerName, RgbaImage>,
}

impl AssetStore {
    /// Loads every `<layer-name>.png` in `dir`.
    ///
    /// Files whose stem is not a layer name, and non-PNG files, are skipped.
    /// A missing directory or any unreadable/undecodable mask is an error.
    pub fn load(dir: &Path) -> Result<Self, EngineError> {
        let started = Instant::now();
        let failure = |path: &Path, reason: String| EngineError::AssetLoadFailure {
            path: path.display().to_string(),
            reason,
        };

        let mut paths = std::fs::read_dir(dir)
            .map_err(|e| failure(dir, e.to_string()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| failure(dir, e.to_string()))?;
        paths.sort();

        let mut masks = HashMap::new();
        for path in paths {
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let Some(name) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<LayerName>().ok())
            else {
                debug!("skipping {}: not a layer name", path.display());
                continue;
            };
            let mask = image::open(&path)
                .map_err(|e| failure(path.as_path(), e.to_string()))?
                .to_rgba8();
            masks.insert(name, mask);
        }

        info!(
            "loaded {} masks from {} in {:?}",
            masks.len(),
            dir.display(),
            started.elapsed()
        );
        Ok(Self { masks })
    }

    /// Builds a store from masks already in memory.
    pub fn from_masks(masks: HashMap<LayerName, RgbaImage>) -> Self {
        Self { masks }
    }

    /// Returns the full-resolution mask for `name`.
    pub fn get(&self, name: LayerName) -> Result<&RgbaImage, EngineError> {
        self.masks
            .get(&name)
            .ok_or_else(|| EngineError::UnknownAsset(name.to_string()))
    }

    /// Whether a mask for `name` was loaded.
    pub fn contains(&self, name: LayerName) -> bool {
        self.masks.contains_key(&name)
    }

    /// Loaded layer names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = LayerName> + '_ {
        self.masks.keys().copied()
    }

    /// Number of loaded masks.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Whether no masks were loaded.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Checks that every layer the generator can emit has a mask.
    ///
    /// Returns the first missing name (in catalog order) as
    /// `EngineError::UnknownAsset`.
    pub fn verify_catalog(&self) -> Result<(), EngineError> {
        match catalog_layer_names()
            .into_iter()
            .find(|name| !self.contains(*name))
        {
            Some(missing) => Err(EngineError::UnknownAsset(missing.to_string())),
            None => Ok(()),
        }
    }
}
