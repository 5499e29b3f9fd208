//! Multi-resolution cache of pre-scaled, uncolored masks.
//!
//! Rescaling a full-resolution mask is the most expensive step of a render,
//! so scaled masks are memoized per `(size, layer)`. Entries are created
//! lazily on a miss or eagerly via [`MaskCache::build_caches_for_sizes`], and
//! are never evicted: the set of served sizes is small and fixed.

use crate::store::AssetStore;
use dashmap::DashMap;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use koi_engine_core::{check_size, EngineError, LayerName};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Resampling filter used for every scale, so cached and freshly scaled
/// masks are interchangeable.
pub const SCALE_FILTER: FilterType = FilterType::CatmullRom;

/// Outcome of an eager warm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmStats {
    /// Distinct sizes requested.
    pub sizes: usize,
    /// Masks scaled by this call; keys already cached are skipped.
    pub scaled: usize,
    pub elapsed: Duration,
}

/// Concurrent `(size, layer) -> scaled mask` table over an [`AssetStore`].
///
/// Concurrent misses on one key may both scale; the later insert wins and
/// both callers receive an equivalent mask.
#[derive(Debug)]
pub struct MaskCache {
    store: Arc<AssetStore>,
    scaled: DashMap<(u32, LayerName), Arc<RgbaImage>>,
    scale_count: AtomicUsize,
}

impl MaskCache {
    /// Creates an empty cache over `store`.
    pub fn new(store: Arc<AssetStore>) -> Self {
        Self {
            store,
            scaled: DashMap::new(),
            scale_count: AtomicUsize::new(0),
        }
    }

    /// The full-resolution store backing this cache.
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Returns `name` scaled to `size`×`size`, scaling and caching on a miss.
    ///
    /// Sizes outside `1..=MAX_SIZE` are `EngineError::InvalidDimensions`.
    pub fn get_image(&self, name: LayerName, size: u32) -> Result<Arc<RgbaImage>, EngineError> {
        let size = check_size(size)?;
        let key = (size, name);
        // the guard must be released before inserting into the same shard
        if let Some(hit) = self.scaled.get(&key).map(|entry| Arc::clone(entry.value())) {
            return Ok(hit);
        }
        let started = Instant::now();
        let mask = Arc::new(self.scale(name, size)?);
        self.scaled.insert(key, Arc::clone(&mask));
        warn!("cache miss: scaled {name} to {size} in {:?}", started.elapsed());
        Ok(mask)
    }

    /// Scales every loaded mask to every size in `sizes`.
    ///
    /// Sizes fan out in parallel, and so do the masks within each size.
    /// Returns `EngineError::InvalidDimensions` (before doing any work) if a
    /// size is zero or above `MAX_SIZE`.
    pub fn build_caches_for_sizes(&self, sizes: &[u32]) -> Result<WarmStats, EngineError> {
        for &size in sizes {
            check_size(size)?;
        }
        let started = Instant::now();
        let sizes: BTreeSet<u32> = sizes.iter().copied().collect();
        let names: Vec<LayerName> = self.store.names().collect();

        let scaled = sizes
            .par_iter()
            .map(|&size| self.build_cache_for_size(size, &names))
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        // bulk scaling leaves the shards over-allocated
        self.scaled.shrink_to_fit();

        Ok(WarmStats {
            sizes: sizes.len(),
            scaled,
            elapsed: started.elapsed(),
        })
    }

    fn build_cache_for_size(&self, size: u32, names: &[LayerName]) -> Result<usize, EngineError> {
        let started = Instant::now();
        let scaled = names
            .par_iter()
            .filter(|&&name| !self.scaled.contains_key(&(size, name)))
            .map(|&name| {
                let mask = self.scale(name, size)?;
                self.scaled.insert((size, name), Arc::new(mask));
                Ok::<usize, EngineError>(1)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;
        info!(
            "cache built for size {size}: {scaled} masks in {:?}",
            started.elapsed()
        );
        Ok(scaled)
    }

    fn scale(&self, name: LayerName, size: u32) -> Result<RgbaImage, EngineError> {
        let size = check_size(size)?;
        let source = self.store.get(name)?;
        self.scale_count.fetch_add(1, Ordering::Relaxed);
        debug!("scaling {name} to {size}");
        Ok(imageops::resize(source, size, size, SCALE_FILTER))
    }

    /// Whether `(name, size)` is already cached.
    pub fn contains(&self, name: LayerName, size: u32) -> bool {
        self.scaled.contains_key(&(size, name))
    }

    /// Number of cached `(size, layer)` entries.
    pub fn len(&self) -> usize {
        self.scaled.len()
    }

    /// Whether nothing has been scaled yet.
    pub fn is_empty(&self) -> bool {
        self.scaled.is_empty()
    }

    /// Total resize operations performed since construction.
    pub fn scale_count(&self) -> usize {
        self.scale_count.load(Ordering::Relaxed)
    }
}
